use ::log::Level;
use ratatui::{prelude::*, widgets::*};

use crate::{state::DebugConsoleState, theme::Theme};

/// Render the debug console as a Quake-style drop-down panel
pub fn render_debug_console(f: &mut Frame, area: Rect, console: &DebugConsoleState, theme: &Theme) {
    let console_height = (area.height * console.height_percent) / 100;
    let console_area = Rect {
        height: console_height.min(area.height),
        ..area
    };

    f.render_widget(Clear, console_area);

    // A poisoned buffer only means a panic mid-log; the entries are still fine
    let logs = console
        .logs
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let total_logs = logs.len();
    let visible_height = console_height.saturating_sub(2) as usize;

    let max_offset = total_logs.saturating_sub(visible_height);
    let scroll_offset = if console.auto_scroll {
        max_offset
    } else {
        console.scroll_offset.min(max_offset)
    };

    let log_items: Vec<ListItem> = logs
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|entry| {
            let level_color = match entry.level {
                Level::Error => theme.status_error,
                Level::Warn => theme.status_warning,
                Level::Info => theme.text_primary,
                Level::Debug => theme.text_secondary,
                Level::Trace => theme.text_muted,
            };

            let target: String = if entry.target.chars().count() > 24 {
                let head: String = entry.target.chars().take(21).collect();
                format!("{}...", head)
            } else {
                format!("{:24}", entry.target)
            };

            let text = format!(
                "{} {:5} {} {}",
                entry.timestamp.format("%H:%M:%S%.3f"),
                entry.level,
                target,
                entry.message
            );

            ListItem::new(text).style(Style::default().fg(level_color))
        })
        .collect();

    let logs_list = List::new(log_items).block(
        Block::bordered()
            .title(format!(
                " Debug Console ({}/{}) {} ",
                scroll_offset + visible_height.min(total_logs),
                total_logs,
                if console.auto_scroll {
                    "[AUTO]"
                } else {
                    "[MANUAL]"
                }
            ))
            .title_bottom(" ` Close | j/k Scroll | a Auto-scroll | c Clear ")
            .border_style(Style::default().fg(theme.accent_primary))
            .style(Style::default().bg(theme.bg_secondary)),
    );

    f.render_widget(logs_list, console_area);
}
