use ratatui::{prelude::*, style::palette::tailwind};

/// Themes selectable from the "Select theme" command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    Classic,
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    /// Display order used by the theme prompt
    pub const ALL: [ThemeName; 3] = [ThemeName::Classic, ThemeName::Dark, ThemeName::Light];

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Classic => "Classic",
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
        }
    }
}

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status colors
    pub status_error: Color,
    pub status_warning: Color,

    // Selection colors
    pub selected_bg: Color,
    pub selected_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Classic => Self::classic(),
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Dark theme (default) - Cyan/Magenta color scheme
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            bg_primary: tailwind::SLATE.c950,
            bg_secondary: tailwind::SLATE.c900,
            bg_panel: tailwind::SLATE.c800,
            text_primary: tailwind::CYAN.c50,
            text_secondary: tailwind::CYAN.c200,
            text_muted: tailwind::CYAN.c700,
            accent_primary: tailwind::CYAN.c400,
            accent_secondary: tailwind::FUCHSIA.c500,
            status_error: tailwind::FUCHSIA.c400,
            status_warning: tailwind::PURPLE.c400,
            selected_bg: tailwind::FUCHSIA.c500,
            selected_fg: Color::White,
        }
    }

    /// Light theme - slate text on a pale background
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            bg_primary: tailwind::SLATE.c50,
            bg_secondary: tailwind::SLATE.c100,
            bg_panel: tailwind::SLATE.c200,
            text_primary: tailwind::SLATE.c900,
            text_secondary: tailwind::SLATE.c700,
            text_muted: tailwind::SLATE.c500,
            accent_primary: tailwind::BLUE.c600,
            accent_secondary: tailwind::ORANGE.c500,
            status_error: tailwind::RED.c600,
            status_warning: tailwind::AMBER.c600,
            selected_bg: tailwind::BLUE.c200,
            selected_fg: tailwind::SLATE.c950,
        }
    }

    /// Classic theme - plain terminal colors
    pub fn classic() -> Self {
        Self {
            name: ThemeName::Classic,
            bg_primary: Color::Reset,
            bg_secondary: Color::Reset,
            bg_panel: Color::Reset,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            accent_primary: Color::Blue,
            accent_secondary: Color::Magenta,
            status_error: Color::Red,
            status_warning: Color::Yellow,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
        }
    }

    // Prebuilt styles for common use cases

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "Enter" in "Enter execute")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted/helper text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for primary text
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }
}

/// How the command palette draws matched characters and sizes its list
///
/// Passed explicitly into the palette view so each palette can be styled on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteStyle {
    pub highlight_bold: bool,
    /// `None` keeps the row's regular text color
    pub highlight_color: Option<Color>,
    /// Number of result rows visible at once
    pub result_rows: u16,
}

impl Default for PaletteStyle {
    fn default() -> Self {
        Self {
            highlight_bold: true,
            highlight_color: None,
            result_rows: 12,
        }
    }
}

impl PaletteStyle {
    /// Style for a run of matched characters on top of the row's base style
    pub fn highlight(&self, base: Style) -> Style {
        let mut style = base;
        if self.highlight_bold {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if let Some(color) = self.highlight_color {
            style = style.fg(color);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        for name in ThemeName::ALL {
            assert_eq!(Theme::from_name(name).name, name);
        }
    }

    #[test]
    fn test_highlight_style() {
        let base = Style::default().fg(Color::White);

        let plain = PaletteStyle {
            highlight_bold: false,
            highlight_color: None,
            ..Default::default()
        };
        assert_eq!(plain.highlight(base), base);

        let colored = PaletteStyle {
            highlight_bold: true,
            highlight_color: Some(Color::Red),
            ..Default::default()
        };
        let style = colored.highlight(base);
        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
