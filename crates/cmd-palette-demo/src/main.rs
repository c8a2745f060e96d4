use std::{collections::VecDeque, time::Duration};

use anyhow::{Context, Result};
use cmd_palette::{CommandPalette, CommandRegistry, SelectOutcome};
use ratatui::{
    crossterm::{
        self,
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    },
    prelude::*,
};

use crate::actions::Action;
use crate::commands::{Outbox, register_demo_commands};
use crate::config::Config;
use crate::log_capture::LogBuffer;
use crate::state::AppState;
use crate::store::Store;
use crate::view_models::command_palette::CommandPaletteViewModel;

mod actions;
mod commands;
mod config;
mod log_capture;
mod reducer;
mod state;
mod store;
mod theme;
mod view_models;
mod views;

pub struct App {
    // Redux store - centralized state management
    pub store: Store,
    /// One palette engine per context, each with its own registry
    palettes: Vec<CommandPalette>,
    /// Actions pushed by command callbacks, drained after each palette action
    outbox: Outbox,
}

impl App {
    fn new(config: Config, logs: LogBuffer) -> Result<App> {
        let outbox = Outbox::default();
        let options = config.palette_options();

        let palettes = (0..config.context_count())
            .map(|context| -> Result<CommandPalette> {
                let registry = CommandRegistry::new();
                register_demo_commands(&registry, &outbox, context).with_context(|| {
                    format!("Failed to register commands for context {}", context + 1)
                })?;
                Ok(CommandPalette::with_options(registry, options))
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Started with {} palette contexts ({:?} matcher)",
            palettes.len(),
            options.backend
        );

        Ok(App {
            store: Store::new(AppState::from_config(config, logs)),
            palettes,
            outbox,
        })
    }

    fn active_palette(&self) -> &CommandPalette {
        &self.palettes[self.store.state().ui.active_context]
    }

    fn active_palette_mut(&mut self) -> &mut CommandPalette {
        &mut self.palettes[self.store.state().ui.active_context]
    }
}

pub fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = shutdown();
        original_hook(panic_info);
    }));
}

fn startup() -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stderr(), crossterm::terminal::EnterAlternateScreen)?;
    Ok(())
}

fn shutdown() -> Result<()> {
    crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}

/// Apply an action and everything it triggers
///
/// Palette actions go to the active palette; anything the palette commands
/// queue in the outbox, plus focus requests, is processed in order before
/// returning. All other actions are dispatched to the store.
fn update(app: &mut App, action: Action) {
    let mut queue = VecDeque::from([action]);

    while let Some(action) = queue.pop_front() {
        if action.is_palette_action() {
            if let Err(err) = apply_palette_action(app, &action) {
                log::warn!("{:?} failed: {}", action, err);
                queue.push_back(Action::SetStatus(err.to_string()));
            }

            queue.extend(app.outbox.borrow_mut().drain(..));
            let palette = app.active_palette_mut();
            if palette.take_focus_request() && palette.is_visible() {
                queue.push_back(Action::FocusPaletteQuery);
            }
        } else if action != Action::None {
            app.store.dispatch(&action);
        }
    }
}

fn apply_palette_action(app: &mut App, action: &Action) -> cmd_palette::Result<()> {
    match action {
        Action::TogglePalette => {
            let palette = app.active_palette_mut();
            let visible = palette.is_visible();
            palette.set_visible(!visible)?;
            if visible {
                app.store.dispatch(&Action::ClosePalette);
            }
        }
        Action::ClosePalette => {
            app.active_palette_mut().close();
            app.store.dispatch(action);
        }
        Action::PaletteInput(ch) => {
            let palette = app.active_palette_mut();
            let mut query = palette.query().to_string();
            query.push(*ch);
            palette.set_query(&query)?;
        }
        Action::PaletteBackspace => {
            let palette = app.active_palette_mut();
            let mut query = palette.query().to_string();
            if query.pop().is_some() {
                palette.set_query(&query)?;
            }
        }
        Action::PaletteFocusNext => app.active_palette_mut().focus_next(),
        Action::PaletteFocusPrev => app.active_palette_mut().focus_previous(),
        Action::PaletteExecute => {
            if app.active_palette().item_count() == 0 {
                return Ok(());
            }
            let outcome = app.active_palette_mut().select_focused()?;
            if outcome == SelectOutcome::RequestClose {
                app.store.dispatch(&Action::ClosePalette);
            }
        }
        Action::NextContext => {
            // Contexts keep their query and running command while hidden
            let was_visible = app.active_palette().is_visible();
            app.active_palette_mut().set_visible(false)?;
            app.store.dispatch(action);
            app.active_palette_mut().set_visible(was_visible)?;
        }
        _ => {}
    }
    Ok(())
}

/// Translate a key press into an action
fn handle_key_event(key: KeyEvent, palette_open: bool, console_open: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('p') if ctrl => return Action::TogglePalette,
        KeyCode::Char('n') if ctrl => return Action::NextContext,
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Char('`') => return Action::ToggleDebugConsole,
        _ => {}
    }

    if palette_open {
        return match key.code {
            KeyCode::Esc => Action::ClosePalette,
            KeyCode::Enter => Action::PaletteExecute,
            KeyCode::Down => Action::PaletteFocusNext,
            KeyCode::Up => Action::PaletteFocusPrev,
            KeyCode::Char('j') if ctrl => Action::PaletteFocusNext,
            KeyCode::Char('k') if ctrl => Action::PaletteFocusPrev,
            KeyCode::Backspace => Action::PaletteBackspace,
            KeyCode::Char(c) if !ctrl => Action::PaletteInput(c),
            _ => Action::None,
        };
    }

    if console_open {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => return Action::ScrollDebugConsoleDown,
            KeyCode::Char('k') | KeyCode::Up => return Action::ScrollDebugConsoleUp,
            KeyCode::Char('a') => return Action::ToggleDebugAutoScroll,
            KeyCode::Char('c') => return Action::ClearDebugLogs,
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stderr>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        // Commands added or removed since the last frame invalidate the results
        if let Err(err) = app.active_palette_mut().refresh() {
            log::warn!("Failed to refresh palette: {}", err);
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = handle_key_event(
                key,
                app.active_palette().is_visible(),
                app.store.state().debug_console.is_open,
            );
            update(app, action);
        }

        if app.store.state().ui.should_quit {
            log::info!("Quitting");
            break;
        }
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let state = app.store.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main screen
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    views::home::render_home(f, chunks[0], state);
    views::home::render_status_bar(f, chunks[1], state);

    let palette = app.active_palette();
    if palette.is_visible() {
        let visible_rows = views::command_palette::visible_rows(chunks[0], &state.palette_style);
        match CommandPaletteViewModel::from_palette(
            palette,
            state.ui.active_context,
            state.ui.context_count,
            visible_rows,
            &state.theme,
        ) {
            Ok(vm) => views::command_palette::render_command_palette(
                f,
                chunks[0],
                &vm,
                &state.theme,
                &state.palette_style,
                state.ui.palette_focused,
            ),
            Err(err) => log::error!("Failed to build palette view: {}", err),
        }
    }

    // Render debug console (Quake-style drop-down) if visible
    if state.debug_console.is_open {
        views::debug_console::render_debug_console(f, f.area(), &state.debug_console, &state.theme);
    }
}

fn main() -> Result<()> {
    // Initialize debug console logger before anything else
    let logs = log_capture::init_logger().context("Failed to initialize logger")?;
    let mut app = App::new(Config::load(), logs)?;

    initialize_panic_handler();
    startup()?;
    let result = Terminal::new(CrosstermBackend::new(std::io::stderr()))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| run(&mut terminal, &mut app));
    shutdown()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeName;

    fn app(contexts: usize) -> App {
        let config = Config {
            contexts,
            ..Default::default()
        };
        App::new(config, log_capture::DebugConsoleLogger::create_buffer()).unwrap()
    }

    fn type_query(app: &mut App, query: &str) {
        for ch in query.chars() {
            update(app, Action::PaletteInput(ch));
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_select_theme_through_palette() {
        let mut app = app(1);
        update(&mut app, Action::TogglePalette);
        assert!(app.active_palette().is_visible());
        assert!(app.store.state().ui.palette_focused);

        type_query(&mut app, "theme");
        update(&mut app, Action::PaletteExecute);
        assert_eq!(app.active_palette().depth(), 1);

        type_query(&mut app, "light");
        update(&mut app, Action::PaletteExecute);

        assert_eq!(app.store.state().theme.name, ThemeName::Light);
        assert!(!app.active_palette().is_visible());
        assert!(!app.store.state().ui.palette_focused);
    }

    #[test]
    fn test_quit_command_quits() {
        let mut app = app(1);
        update(&mut app, Action::TogglePalette);
        type_query(&mut app, "quit");
        update(&mut app, Action::PaletteExecute);
        assert!(app.store.state().ui.should_quit);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let mut app = app(2);
        update(&mut app, Action::TogglePalette);
        type_query(&mut app, "nested");
        update(&mut app, Action::PaletteExecute);
        assert_eq!(app.active_palette().depth(), 1);

        update(&mut app, Action::NextContext);
        assert_eq!(app.store.state().ui.active_context, 1);
        assert!(app.active_palette().is_visible());
        assert_eq!(app.active_palette().depth(), 0);

        update(&mut app, Action::NextContext);
        assert_eq!(app.active_palette().depth(), 1);
    }

    #[test]
    fn test_escape_abandons_prompt() {
        let mut app = app(1);
        update(&mut app, Action::TogglePalette);
        type_query(&mut app, "highlight color");
        update(&mut app, Action::PaletteExecute);
        assert_eq!(app.active_palette().depth(), 1);

        update(&mut app, Action::ClosePalette);
        assert_eq!(app.active_palette().depth(), 0);
        assert!(!app.active_palette().is_visible());
        assert_eq!(app.store.state().palette_style.highlight_color, None);
    }

    #[test]
    fn test_too_long_query_reports_status() {
        let config = Config {
            contexts: 1,
            match_capacity: 3,
            ..Default::default()
        };
        let mut app = App::new(config, log_capture::DebugConsoleLogger::create_buffer()).unwrap();
        update(&mut app, Action::TogglePalette);
        type_query(&mut app, "quit");

        assert_eq!(app.active_palette().query(), "qui");
        assert!(app.store.state().ui.status.is_some());
    }

    #[test]
    fn test_key_mapping() {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        assert_eq!(
            handle_key_event(key(KeyCode::Char('p'), ctrl), false, false),
            Action::TogglePalette
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), none), true, false),
            Action::PaletteInput('q')
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), none), false, false),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), ctrl), true, false),
            Action::PaletteFocusNext
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), none), false, true),
            Action::ClearDebugLogs
        );
    }
}
