//! Commands and the sorted, shared command registry

use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug};
use std::rc::Rc;

use crate::context::ExecutionContext;
use crate::error::{PaletteError, Result};

/// Called when the user picks the command from the top-level list
pub type InitiateCallback = Rc<dyn Fn(&mut ExecutionContext) -> Result<()>>;

/// Called with the ordinal of the option the user picked from a prompt
pub type SelectOptionCallback = Rc<dyn Fn(&mut ExecutionContext, usize) -> Result<()>>;

/// Called once after the command finished on its own
pub type TerminateCallback = Rc<dyn Fn()>;

/// A named action that can be run from the palette
///
/// A command without any callback is a no-op leaf: selecting it completes
/// immediately. Commands that want to ask the user something call
/// [`ExecutionContext::prompt`] from `on_initiate` and receive the answer in
/// `on_select_option`.
#[derive(Clone)]
pub struct Command {
    name: String,
    on_initiate: Option<InitiateCallback>,
    on_select_option: Option<SelectOptionCallback>,
    on_terminate: Option<TerminateCallback>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_initiate: None,
            on_select_option: None,
            on_terminate: None,
        }
    }

    pub fn on_initiate<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut ExecutionContext) -> Result<()> + 'static,
    {
        self.on_initiate = Some(Rc::new(callback));
        self
    }

    pub fn on_select_option<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut ExecutionContext, usize) -> Result<()> + 'static,
    {
        self.on_select_option = Some(Rc::new(callback));
        self
    }

    pub fn on_terminate<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_terminate = Some(Rc::new(callback));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn initiate_callback(&self) -> Option<InitiateCallback> {
        self.on_initiate.clone()
    }

    pub(crate) fn select_option_callback(&self) -> Option<SelectOptionCallback> {
        self.on_select_option.clone()
    }

    pub(crate) fn terminate_callback(&self) -> Option<TerminateCallback> {
        self.on_terminate.clone()
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("on_initiate", &self.on_initiate.is_some())
            .field("on_select_option", &self.on_select_option.is_some())
            .field("on_terminate", &self.on_terminate.is_some())
            .finish()
    }
}

#[derive(Default)]
struct RegistryInner {
    commands: Vec<Rc<Command>>,
    generation: u64,
}

/// Commands sorted by name, shared between the palette and command callbacks
///
/// Cloning the registry clones the handle, not the commands. Callbacks may
/// capture a clone and add or remove commands while they run; the palette
/// holds the running command by its own `Rc`, so removing it from the
/// registry mid-callback is fine.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command at its sorted position
    ///
    /// Names are unique: registering a second command with the same name is
    /// rejected.
    pub fn add(&self, command: Command) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let position = match inner
            .commands
            .binary_search_by(|c| c.name.as_bytes().cmp(command.name.as_bytes()))
        {
            Ok(_) => {
                log::warn!("Refusing to register duplicate command '{}'", command.name);
                return Err(PaletteError::DuplicateCommand(command.name));
            }
            Err(position) => position,
        };

        log::debug!("Registered command '{}'", command.name);
        inner.commands.insert(position, Rc::new(command));
        inner.generation += 1;
        Ok(())
    }

    /// Remove the command called `name`, returns whether one was removed
    pub fn remove(&self, name: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner
            .commands
            .binary_search_by(|c| c.name.as_bytes().cmp(name.as_bytes()))
        {
            Ok(position) => {
                inner.commands.remove(position);
                inner.generation += 1;
                log::debug!("Removed command '{}'", name);
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().commands.is_empty()
    }

    /// Command at position `index` in name order
    pub fn get(&self, index: usize) -> Option<Rc<Command>> {
        self.inner.borrow().commands.get(index).cloned()
    }

    pub fn find(&self, name: &str) -> Option<Rc<Command>> {
        let inner = self.inner.borrow();
        inner
            .commands
            .binary_search_by(|c| c.name.as_bytes().cmp(name.as_bytes()))
            .ok()
            .map(|position| inner.commands[position].clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.inner
            .borrow()
            .commands
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Counter bumped on every add/remove, used to detect stale search results
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    /// Borrow the command list for a scan; must not be held across callbacks
    pub(crate) fn commands(&self) -> Ref<'_, [Rc<Command>]> {
        Ref::map(self.inner.borrow(), |inner| inner.commands.as_slice())
    }
}

impl Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("command_count", &self.len())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_sorted_by_name() {
        let registry = CommandRegistry::new();
        registry.add(Command::new("Select theme")).unwrap();
        registry.add(Command::new("Nested")).unwrap();
        registry.add(Command::new("Add 'Example command'")).unwrap();

        assert_eq!(
            registry.names(),
            vec!["Add 'Example command'", "Nested", "Select theme"]
        );
        assert_eq!(registry.get(1).unwrap().name(), "Nested");
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_comparison_is_bytewise() {
        let registry = CommandRegistry::new();
        registry.add(Command::new("beta")).unwrap();
        registry.add(Command::new("Beta")).unwrap();
        registry.add(Command::new("alpha")).unwrap();

        // Uppercase ASCII sorts before lowercase
        assert_eq!(registry.names(), vec!["Beta", "alpha", "beta"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let registry = CommandRegistry::new();
        registry.add(Command::new("Quit")).unwrap();
        let err = registry.add(Command::new("Quit")).unwrap_err();
        assert_eq!(err, PaletteError::DuplicateCommand("Quit".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove() {
        let registry = CommandRegistry::new();
        registry.add(Command::new("Example command")).unwrap();
        assert!(registry.remove("Example command"));
        assert!(!registry.remove("Example command"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_generation_tracks_mutations() {
        let registry = CommandRegistry::new();
        let start = registry.generation();

        registry.add(Command::new("One")).unwrap();
        assert_eq!(registry.generation(), start + 1);

        // Failed mutations leave the generation alone
        let _ = registry.add(Command::new("One"));
        assert!(!registry.remove("Two"));
        assert_eq!(registry.generation(), start + 1);

        registry.remove("One");
        assert_eq!(registry.generation(), start + 2);
    }

    #[test]
    fn test_clone_shares_commands() {
        let registry = CommandRegistry::new();
        let handle = registry.clone();
        handle.add(Command::new("Shared")).unwrap();
        assert!(registry.find("Shared").is_some());
    }

    #[test]
    fn test_removed_command_handle_stays_valid() {
        let registry = CommandRegistry::new();
        registry
            .add(Command::new("Doomed").on_terminate(|| {}))
            .unwrap();

        let held = registry.find("Doomed").unwrap();
        registry.remove("Doomed");
        registry.add(Command::new("Another")).unwrap();

        assert_eq!(held.name(), "Doomed");
        assert!(held.terminate_callback().is_some());
    }
}
