use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    prelude::*,
    widgets::*,
};

use crate::{
    theme::{PaletteStyle, Theme},
    view_models::command_palette::CommandPaletteViewModel,
};

/// Outer rows taken by borders, input box, breadcrumb and footer
const CHROME_ROWS: u16 = 7;

/// Popup area of the palette for a given terminal area and style
pub fn popup_area(area: Rect, style: &PaletteStyle) -> Rect {
    let popup_width = (area.width * 70 / 100).clamp(20.min(area.width), 100);
    let popup_height = (style.result_rows + CHROME_ROWS).min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 4;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Number of result rows that fit in the popup
pub fn visible_rows(area: Rect, style: &PaletteStyle) -> usize {
    popup_area(area, style).height.saturating_sub(CHROME_ROWS).max(1) as usize
}

/// Render the command palette popup
/// Pure presentation - uses pre-computed view model
///
/// `query_focused` places the terminal cursor at the end of the query.
pub fn render_command_palette(
    f: &mut Frame,
    area: Rect,
    vm: &CommandPaletteViewModel,
    theme: &Theme,
    style: &PaletteStyle,
    query_focused: bool,
) {
    let popup_area = popup_area(area, style);

    f.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(vm.title.clone())
        .title_style(theme.panel_border())
        .border_style(theme.panel_border())
        .style(Style::default().bg(theme.bg_panel));
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Breadcrumb
            Constraint::Min(1),    // Results list
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let input_paragraph = Paragraph::new(vm.input_text.clone())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent_primary))
                .style(Style::default().bg(theme.bg_secondary)),
        )
        .style(
            Style::default()
                .fg(theme.text_primary)
                .bg(theme.bg_secondary),
        );
    f.render_widget(input_paragraph, chunks[0]);
    if query_focused {
        let width = u16::try_from(vm.input_text.chars().count()).unwrap_or(u16::MAX);
        let max_x = chunks[0].right().saturating_sub(2);
        f.set_cursor_position((
            chunks[0].x.saturating_add(1).saturating_add(width).min(max_x),
            chunks[0].y + 1,
        ));
    }

    let breadcrumb = match &vm.breadcrumb {
        Some(path) => Line::from(vec![
            Span::styled(path.clone(), Style::default().fg(theme.accent_secondary)),
            Span::styled(format!("  ({} options)", vm.total_items), theme.muted()),
        ]),
        None => Line::styled(format!("{} commands", vm.total_items), theme.muted()),
    };
    f.render_widget(Paragraph::new(breadcrumb), chunks[1]);

    if vm.visible_rows.is_empty() {
        let no_results = Paragraph::new(vm.empty_message)
            .style(theme.muted())
            .alignment(Alignment::Center);
        f.render_widget(no_results, chunks[2]);
    } else {
        let result_lines: Vec<Line> = vm
            .visible_rows
            .iter()
            .map(|row| {
                let base = Style::default().fg(row.fg_color).bg(row.bg_color);
                let base = if row.is_selected {
                    base.add_modifier(Modifier::BOLD)
                } else {
                    base
                };

                let mut spans = vec![Span::styled(
                    row.indicator,
                    if row.is_selected {
                        theme.key_hint()
                    } else {
                        theme.text()
                    },
                )];
                spans.extend(row.segments.iter().map(|segment| {
                    let span_style = if segment.highlighted {
                        style.highlight(base)
                    } else {
                        base
                    };
                    Span::styled(segment.text.clone(), span_style)
                }));

                Line::from(spans)
            })
            .collect();

        let results_paragraph =
            Paragraph::new(result_lines).style(Style::default().bg(theme.bg_panel));
        f.render_widget(results_paragraph, chunks[2]);
    }

    let footer_line = Line::from(vec![
        Span::styled("Enter", theme.key_hint()),
        Span::styled(" select  ", theme.muted()),
        Span::styled("↑/↓", theme.key_hint()),
        Span::styled(" navigate  ", theme.muted()),
        Span::styled("Ctrl+N", theme.key_hint()),
        Span::styled(" next context  ", theme.muted()),
        Span::styled("Esc", theme.key_hint()),
        Span::styled(" close", theme.muted()),
    ]);

    let footer = Paragraph::new(footer_line).alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);
}
