use crate::{actions::Action, state::*, theme::Theme};

/// Root reducer that delegates to sub-reducers based on action type
/// Pure function: takes state and action, returns the new state
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    state.ui = ui_reducer(state.ui, action);
    state.debug_console = debug_console_reducer(state.debug_console, action);

    match action {
        Action::SetTheme(name) => {
            log::info!("Switching to {} theme", name.label());
            state.theme = Theme::from_name(*name);
        }
        Action::ToggleHighlightBold => {
            state.palette_style.highlight_bold = !state.palette_style.highlight_bold;
        }
        Action::SetHighlightColor(color) => {
            state.palette_style.highlight_color = *color;
        }
        _ => {}
    }

    state
}

/// UI state reducer - handles UI-related actions
fn ui_reducer(mut state: UiState, action: &Action) -> UiState {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.show_help = !state.show_help;
        }
        Action::IncrementCounter => {
            state.counter = state.counter.saturating_add(1);
            state.status = Some(format!("Counter is now {}", state.counter));
        }
        Action::SetStatus(message) => {
            state.status = Some(message.clone());
        }
        Action::NextContext => {
            state.active_context = (state.active_context + 1) % state.context_count.max(1);
            state.status = Some(format!("Switched to context {}", state.active_context + 1));
        }
        Action::FocusPaletteQuery => {
            state.palette_focused = true;
        }
        Action::ClosePalette => {
            state.palette_focused = false;
        }
        _ => {}
    }

    state
}

fn debug_console_reducer(mut state: DebugConsoleState, action: &Action) -> DebugConsoleState {
    match action {
        Action::ToggleDebugConsole => {
            state.is_open = !state.is_open;
            // Reset scroll when opening
            if state.is_open {
                state.scroll_offset = 0;
            }
        }
        Action::ScrollDebugConsoleUp => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            // Disable auto-scroll when manually scrolling
            state.auto_scroll = false;
        }
        Action::ScrollDebugConsoleDown => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
            state.auto_scroll = false;
        }
        Action::ToggleDebugAutoScroll => {
            state.auto_scroll = !state.auto_scroll;
        }
        Action::ClearDebugLogs => {
            if let Ok(mut logs) = state.logs.lock() {
                logs.clear();
            }
            state.scroll_offset = 0;
        }
        _ => {}
    }

    state
}
