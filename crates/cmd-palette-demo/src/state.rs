use crate::{
    config::Config,
    log_capture::{DebugConsoleLogger, LogBuffer},
    theme::{PaletteStyle, Theme},
};

/// Root application state following Redux pattern
///
/// Palette engines are not part of it: they own callbacks and live next to
/// the store in the app. Everything the palette commands change goes through
/// actions and lands here.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
    pub debug_console: DebugConsoleState,
    pub config: Config,
    pub theme: Theme,
    /// Highlight style handed to the palette view
    pub palette_style: PaletteStyle,
}

impl AppState {
    pub fn from_config(config: Config, logs: LogBuffer) -> Self {
        Self {
            ui: UiState {
                context_count: config.context_count(),
                ..Default::default()
            },
            debug_console: DebugConsoleState {
                logs,
                ..Default::default()
            },
            palette_style: config.palette_style(),
            theme: Theme::default(),
            config,
        }
    }
}

/// UI-specific state (help text, status line, active palette context)
#[derive(Debug, Clone)]
pub struct UiState {
    pub show_help: bool,
    pub should_quit: bool,
    pub counter: u64,
    /// Last message shown in the status bar
    pub status: Option<String>,
    /// Index of the palette context receiving input
    pub active_context: usize,
    pub context_count: usize,
    /// Query box owns the keyboard while the palette is open
    pub palette_focused: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_help: true,
            should_quit: false,
            counter: 0,
            status: None,
            active_context: 0,
            context_count: 1,
            palette_focused: false,
        }
    }
}

/// Debug console state (Quake-style drop-down console)
#[derive(Debug, Clone)]
pub struct DebugConsoleState {
    pub is_open: bool,
    pub scroll_offset: usize,
    pub auto_scroll: bool,   // Follow new logs as they arrive
    pub height_percent: u16, // Height as percentage of screen
    pub logs: LogBuffer,
}

impl Default for DebugConsoleState {
    fn default() -> Self {
        Self {
            is_open: false,
            scroll_offset: 0,
            auto_scroll: true,
            height_percent: 40,
            logs: DebugConsoleLogger::create_buffer(),
        }
    }
}
