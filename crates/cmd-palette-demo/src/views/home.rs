use ratatui::{prelude::*, widgets::*};

use crate::state::AppState;

const KEYS: [(&str, &str); 7] = [
    ("Ctrl+P", "Open or hide the command palette"),
    ("Esc", "Close the palette and abandon the running command"),
    ("↑/↓ Ctrl+J/K", "Move the selection"),
    ("Enter", "Run the selected command or option"),
    ("Ctrl+N", "Switch to the next palette context"),
    ("`", "Toggle the debug console"),
    ("q", "Quit"),
];

/// Render the screen behind the palette: help text and counters
pub fn render_home(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;

    let block = Block::bordered()
        .title(" cmd-palette demo ")
        .title_style(theme.panel_border())
        .border_style(theme.panel_border())
        .style(Style::default().bg(theme.bg_primary));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Counter: ", theme.muted()),
            Span::styled(state.ui.counter.to_string(), theme.text()),
            Span::styled("   Theme: ", theme.muted()),
            Span::styled(theme.name.label(), theme.text()),
        ]),
        Line::from(""),
    ];

    if state.ui.show_help {
        lines.extend(KEYS.iter().map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("  {:14}", key), theme.key_hint()),
                Span::styled(*description, Style::default().fg(theme.text_secondary)),
            ])
        }));
    } else {
        lines.push(Line::styled(
            "Help hidden - run \"Toggle help\" from the palette to show it",
            theme.muted(),
        ));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the one-line status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let mut spans = vec![Span::styled(
        format!(
            " Context {}/{} ",
            state.ui.active_context + 1,
            state.ui.context_count
        ),
        Style::default()
            .fg(theme.selected_fg)
            .bg(theme.selected_bg),
    )];

    if let Some(status) = &state.ui.status {
        spans.push(Span::styled(format!(" {}", status), theme.text()));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_secondary)),
        area,
    );
}
