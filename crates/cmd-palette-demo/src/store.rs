use crate::{actions::Action, reducer::reduce, state::AppState};

/// Redux-style Store that holds application state and dispatches actions
///
/// Palette actions never reach the store; the app applies them to the
/// active palette and forwards what the palette commands push.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            state: initial_state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Dispatch an action to update state
    ///
    /// The action is passed to the root reducer which delegates to the
    /// sub-reducers. The previous state is replaced.
    pub fn dispatch(&mut self, action: &Action) {
        log::trace!("Dispatching {:?}", action);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_dispatch_quit() {
        let mut store = Store::default();
        assert!(!store.state().ui.should_quit);

        store.dispatch(&Action::Quit);
        assert!(store.state().ui.should_quit);
    }

    #[test]
    fn test_store_dispatch_toggle_help() {
        let mut store = Store::default();
        assert!(store.state().ui.show_help);

        store.dispatch(&Action::ToggleHelp);
        assert!(!store.state().ui.show_help);

        store.dispatch(&Action::ToggleHelp);
        assert!(store.state().ui.show_help);
    }
}
