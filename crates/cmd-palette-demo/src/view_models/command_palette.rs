use cmd_palette::{CommandPalette, ItemKind, MatchPositions, Result};
use ratatui::style::Color;

use crate::theme::Theme;

/// View model for command palette - all presentation data pre-computed
#[derive(Debug, Clone)]
pub struct CommandPaletteViewModel {
    /// Block title, including the context number
    pub title: String,
    /// Running command followed by the options chosen so far
    pub breadcrumb: Option<String>,
    /// Pre-formatted input text with prompt
    pub input_text: String,
    /// Rows in the effective list (commands or options)
    pub total_items: usize,
    pub visible_rows: Vec<PaletteRow>,
    /// Shown instead of rows when the list is empty
    pub empty_message: &'static str,
}

/// A single row in the command palette list
#[derive(Debug, Clone)]
pub struct PaletteRow {
    pub is_selected: bool,
    /// Selection indicator: "> " or "  "
    pub indicator: &'static str,
    /// Row text split into plain and matched runs
    pub segments: Vec<TextSegment>,
    pub fg_color: Color,
    pub bg_color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub highlighted: bool,
}

impl CommandPaletteViewModel {
    /// Build view model from a palette engine
    pub fn from_palette(
        palette: &CommandPalette,
        context: usize,
        context_count: usize,
        visible_height: usize,
        theme: &Theme,
    ) -> Result<Self> {
        let total_items = palette.item_count();
        let selected_index = palette.focused();
        let scroll_offset = scroll_offset(selected_index, total_items, visible_height);

        let visible_rows = (scroll_offset..total_items)
            .take(visible_height)
            .map(|i| {
                let item = palette.item(i)?;
                let is_selected = i == selected_index;
                let (fg_color, bg_color) = if is_selected {
                    (theme.selected_fg, theme.selected_bg)
                } else if item.kind == ItemKind::Option {
                    (theme.text_secondary, Color::Reset)
                } else {
                    (theme.text_primary, Color::Reset)
                };

                Ok(PaletteRow {
                    is_selected,
                    indicator: if is_selected { "> " } else { "  " },
                    segments: segments(&item.text, &item.positions),
                    fg_color,
                    bg_color,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let ctx = palette.context();
        let breadcrumb = ctx.current_command().map(|command| {
            std::iter::once(command.name())
                .chain(ctx.choices().iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" › ")
        });

        let title = if context_count > 1 {
            format!(" Command Palette [{}/{}] ", context + 1, context_count)
        } else {
            " Command Palette ".to_string()
        };

        let empty_message = if palette.depth() == 0 {
            "No matching commands"
        } else {
            "No matching options"
        };

        Ok(Self {
            title,
            breadcrumb,
            input_text: format!("> {}", palette.query()),
            total_items,
            visible_rows,
            empty_message,
        })
    }
}

/// Keep the selected row in the middle of the viewport where possible
fn scroll_offset(selected_index: usize, total: usize, visible_height: usize) -> usize {
    if total == 0 || selected_index < visible_height / 2 {
        0
    } else if selected_index >= total.saturating_sub(visible_height / 2) {
        total.saturating_sub(visible_height)
    } else {
        selected_index.saturating_sub(visible_height / 2)
    }
}

/// Split `text` into runs of matched and unmatched characters
///
/// `positions` are byte offsets; a multi-byte character counts as matched
/// when its first byte is.
fn segments(text: &str, positions: &MatchPositions) -> Vec<TextSegment> {
    let mut segments: Vec<TextSegment> = Vec::new();
    for (offset, ch) in text.char_indices() {
        let highlighted = positions.contains(offset);
        match segments.last_mut() {
            Some(last) if last.highlighted == highlighted => last.text.push(ch),
            _ => segments.push(TextSegment {
                text: ch.to_string(),
                highlighted,
            }),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmd_palette::{Command, CommandRegistry};

    fn segment(text: &str, highlighted: bool) -> TextSegment {
        TextSegment {
            text: text.to_string(),
            highlighted,
        }
    }

    #[test]
    fn test_segments_group_runs() {
        let positions = MatchPositions::from_slice(&[0, 1, 4]).unwrap();
        assert_eq!(
            segments("Gamma", &positions),
            vec![segment("Ga", true), segment("mm", false), segment("a", true)]
        );
        assert_eq!(
            segments("Beta", &MatchPositions::new()),
            vec![segment("Beta", false)]
        );
    }

    #[test]
    fn test_segments_multibyte() {
        // "ä" spans bytes 1..3
        let positions = MatchPositions::from_slice(&[1]).unwrap();
        assert_eq!(
            segments("Bär", &positions),
            vec![segment("B", false), segment("ä", true), segment("r", false)]
        );
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 100, 10), 0);
        assert_eq!(scroll_offset(50, 100, 10), 45);
        assert_eq!(scroll_offset(99, 100, 10), 90);
        assert_eq!(scroll_offset(3, 4, 10), 0);
    }

    #[test]
    fn test_breadcrumb_and_rows() {
        let registry = CommandRegistry::new();
        registry
            .add(
                Command::new("Select theme")
                    .on_initiate(|ctx| ctx.prompt(["Classic", "Dark", "Light"]))
                    .on_select_option(|ctx, _| ctx.finish()),
            )
            .unwrap();
        let mut palette = CommandPalette::new(registry);
        let theme = Theme::default();

        let vm = CommandPaletteViewModel::from_palette(&palette, 1, 3, 10, &theme).unwrap();
        assert_eq!(vm.title, " Command Palette [2/3] ");
        assert_eq!(vm.breadcrumb, None);
        assert_eq!(vm.total_items, 1);
        assert!(vm.visible_rows[0].is_selected);

        palette.select(0).unwrap();
        palette.set_query("dk").unwrap();
        let vm = CommandPaletteViewModel::from_palette(&palette, 0, 1, 10, &theme).unwrap();
        assert_eq!(vm.title, " Command Palette ");
        assert_eq!(vm.breadcrumb.as_deref(), Some("Select theme"));
        assert_eq!(vm.input_text, "> dk");
        assert_eq!(
            vm.visible_rows[0].segments,
            vec![segment("D", true), segment("ar", false), segment("k", true)]
        );
    }
}
