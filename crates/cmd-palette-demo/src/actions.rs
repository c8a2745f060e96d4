use crate::theme::ThemeName;

/// Action enum - represents all possible actions in the application
///
/// Palette actions are applied to the active command palette by the app;
/// everything else is dispatched to the reducer to update state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,

    // Command palette (applied to the active palette)
    TogglePalette,
    ClosePalette,
    PaletteInput(char),
    PaletteBackspace,
    PaletteFocusNext,
    PaletteFocusPrev,
    PaletteExecute,
    /// Palette asked for keyboard focus on its query box
    FocusPaletteQuery,
    /// Switch to the next isolated palette context
    NextContext,

    // Debug console
    ToggleDebugConsole,
    ScrollDebugConsoleUp,
    ScrollDebugConsoleDown,
    ToggleDebugAutoScroll,
    ClearDebugLogs,

    // Dispatched by demo commands
    ToggleHelp,
    SetTheme(ThemeName),
    IncrementCounter,
    ToggleHighlightBold,
    SetHighlightColor(Option<ratatui::style::Color>),
    SetStatus(String),
}

impl Action {
    /// Actions handled by the palette host rather than the reducer
    pub fn is_palette_action(&self) -> bool {
        matches!(
            self,
            Action::TogglePalette
                | Action::ClosePalette
                | Action::PaletteInput(_)
                | Action::PaletteBackspace
                | Action::PaletteFocusNext
                | Action::PaletteFocusPrev
                | Action::PaletteExecute
                | Action::NextContext
        )
    }
}
