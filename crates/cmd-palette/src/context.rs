//! Execution state of the command currently running in a palette

use std::rc::Rc;

use crate::error::{PaletteError, Result};
use crate::registry::Command;

/// Live state of one command invocation
///
/// A palette owns exactly one context and reuses it for every command. The
/// context is Idle when no command is active. Each [`prompt`](Self::prompt)
/// pushes a new option list and increases the depth by one;
/// [`finish`](Self::finish) returns to Idle.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    command: Option<Rc<Command>>,
    /// One option list per prompt since the command was initiated
    prompts: Vec<Vec<String>>,
    /// Label of the option chosen at each answered prompt
    choices: Vec<String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_command(&self) -> Option<&Command> {
        self.command.as_deref()
    }

    pub fn is_initiated(&self) -> bool {
        self.command.is_some()
    }

    /// Number of prompts since the command was initiated, 0 when none
    pub fn depth(&self) -> usize {
        self.prompts.len()
    }

    /// Choices of the current prompt, empty when not prompting
    pub fn options(&self) -> &[String] {
        self.prompts.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every option list shown so far, outermost first
    pub fn prompt_history(&self) -> &[Vec<String>] {
        &self.prompts
    }

    /// Labels the user picked so far, outermost first
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Make `command` the running command; ignored if one is already running
    pub(crate) fn initiate(&mut self, command: Rc<Command>) {
        match &self.command {
            Some(active) => {
                log::warn!(
                    "Ignoring initiate of '{}' while '{}' is running",
                    command.name(),
                    active.name()
                );
            }
            None => {
                log::debug!("Initiated command '{}'", command.name());
                self.command = Some(command);
            }
        }
    }

    /// Ask the user to pick one of `options`
    ///
    /// The answer arrives as an ordinal into `options` in the command's
    /// select-option callback.
    pub fn prompt<I, S>(&mut self, options: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(command) = &self.command else {
            log::warn!("prompt called with no active command");
            return Err(PaletteError::NoActiveCommand);
        };

        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            log::warn!("Command '{}' prompted with no options", command.name());
        }
        self.prompts.push(options);
        log::debug!(
            "Command '{}' prompted at depth {}",
            command.name(),
            self.prompts.len()
        );
        Ok(())
    }

    /// End the running command
    pub fn finish(&mut self) -> Result<()> {
        let Some(command) = self.command.take() else {
            log::warn!("finish called with no active command");
            return Err(PaletteError::NoActiveCommand);
        };

        log::debug!("Command '{}' finished", command.name());
        self.prompts.clear();
        self.choices.clear();
        Ok(())
    }

    pub(crate) fn record_choice(&mut self, label: String) {
        self.choices.push(label);
    }

    /// Drop the running command without any callbacks
    pub(crate) fn abandon(&mut self) {
        if let Some(command) = self.command.take() {
            log::debug!("Abandoned command '{}'", command.name());
        }
        self.prompts.clear();
        self.choices.clear();
    }

    pub(crate) fn command_handle(&self) -> Option<&Rc<Command>> {
        self.command.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> Rc<Command> {
        Rc::new(Command::new(name))
    }

    #[test]
    fn test_initiate_prompt_finish() {
        let mut ctx = ExecutionContext::new();
        assert!(!ctx.is_initiated());
        assert_eq!(ctx.depth(), 0);

        ctx.initiate(command("Select theme"));
        ctx.prompt(["a", "b"]).unwrap();
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.options(), &["a".to_string(), "b".to_string()]);

        ctx.finish().unwrap();
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.current_command().is_none());
        assert!(ctx.options().is_empty());
    }

    #[test]
    fn test_nested_prompts_keep_history() {
        let mut ctx = ExecutionContext::new();
        ctx.initiate(command("Nested"));
        ctx.prompt(vec!["Option 1".to_string(), "Option 2".to_string()])
            .unwrap();
        ctx.record_choice("Option 2".into());
        ctx.prompt(["Option 2.1", "Option 2.2"]).unwrap();

        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.options()[0], "Option 2.1");
        assert_eq!(ctx.prompt_history().len(), 2);
        assert_eq!(ctx.choices(), &["Option 2".to_string()]);
    }

    #[test]
    fn test_prompt_without_command_is_error() {
        let mut ctx = ExecutionContext::new();
        assert_eq!(ctx.prompt(["x"]), Err(PaletteError::NoActiveCommand));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_finish_without_command_is_error() {
        let mut ctx = ExecutionContext::new();
        assert_eq!(ctx.finish(), Err(PaletteError::NoActiveCommand));
    }

    #[test]
    fn test_second_initiate_is_ignored() {
        let mut ctx = ExecutionContext::new();
        ctx.initiate(command("First"));
        ctx.initiate(command("Second"));
        assert_eq!(ctx.current_command().unwrap().name(), "First");
    }

    #[test]
    fn test_abandon_resets() {
        let mut ctx = ExecutionContext::new();
        ctx.initiate(command("Nested"));
        ctx.prompt(["a"]).unwrap();
        ctx.abandon();
        assert!(!ctx.is_initiated());
        assert_eq!(ctx.depth(), 0);
    }
}
