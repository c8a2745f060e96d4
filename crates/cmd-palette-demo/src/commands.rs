//! Demo commands registered into every palette context
//!
//! Callbacks cannot reach the store directly (they run while the app holds
//! the palette mutably), so they push actions into a shared outbox that the
//! app drains after each palette interaction.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cmd_palette::{Command, CommandRegistry, Result};
use ratatui::style::Color;

use crate::{actions::Action, theme::ThemeName};

/// Actions queued by command callbacks
pub type Outbox = Rc<RefCell<Vec<Action>>>;

pub const EXAMPLE_COMMAND: &str = "Example command";

/// Choices of the "Set highlight color" prompt
const HIGHLIGHT_COLORS: [(&str, Option<Color>); 5] = [
    ("Default", None),
    ("Yellow", Some(Color::Yellow)),
    ("Green", Some(Color::Green)),
    ("Magenta", Some(Color::Magenta)),
    ("Red", Some(Color::Red)),
];

fn send(outbox: &Outbox, action: Action) {
    outbox.borrow_mut().push(action);
}

/// Register the demo command set for palette context `context`
pub fn register_demo_commands(
    registry: &CommandRegistry,
    outbox: &Outbox,
    context: usize,
) -> Result<()> {
    let out = outbox.clone();
    registry.add(Command::new("Toggle help").on_initiate(move |ctx| {
        send(&out, Action::ToggleHelp);
        ctx.finish()
    }))?;

    let out = outbox.clone();
    registry.add(
        Command::new("Select theme")
            .on_initiate(|ctx| ctx.prompt(ThemeName::ALL.map(ThemeName::label)))
            .on_select_option(move |ctx, option| {
                if let Some(name) = ThemeName::ALL.get(option) {
                    send(&out, Action::SetTheme(*name));
                }
                ctx.finish()
            }),
    )?;

    registry.add(nested_command(outbox.clone()))?;

    let out = outbox.clone();
    registry.add(Command::new(EXAMPLE_COMMAND).on_initiate(move |ctx| {
        send(&out, Action::SetStatus("Example command executed".into()));
        ctx.finish()
    }))?;

    let handle = registry.clone();
    let out = outbox.clone();
    registry.add(
        Command::new("Add 'Example command'").on_initiate(move |ctx| {
            // Already present is fine, the command stays registered once
            if handle.find(EXAMPLE_COMMAND).is_none() {
                let out = out.clone();
                handle.add(Command::new(EXAMPLE_COMMAND).on_initiate(move |ctx| {
                    send(&out, Action::SetStatus("Example command executed".into()));
                    ctx.finish()
                }))?;
            }
            ctx.finish()
        }),
    )?;

    let handle = registry.clone();
    let out = outbox.clone();
    registry.add(
        Command::new("Remove 'Example command'").on_initiate(move |ctx| {
            if !handle.remove(EXAMPLE_COMMAND) {
                send(&out, Action::SetStatus("Nothing to remove".into()));
            }
            ctx.finish()
        }),
    )?;

    let out = outbox.clone();
    registry.add(Command::new("Toggle bold highlights").on_initiate(move |ctx| {
        send(&out, Action::ToggleHighlightBold);
        ctx.finish()
    }))?;

    let out = outbox.clone();
    registry.add(
        Command::new("Set highlight color")
            .on_initiate(|ctx| ctx.prompt(HIGHLIGHT_COLORS.map(|(label, _)| label)))
            .on_select_option(move |ctx, option| {
                if let Some((_, color)) = HIGHLIGHT_COLORS.get(option) {
                    send(&out, Action::SetHighlightColor(*color));
                }
                ctx.finish()
            }),
    )?;

    let out = outbox.clone();
    registry.add(Command::new("Increment counter").on_initiate(move |ctx| {
        send(&out, Action::IncrementCounter);
        ctx.finish()
    }))?;

    let out = outbox.clone();
    registry.add(
        Command::new("Quit")
            .on_initiate(|ctx| ctx.finish())
            .on_terminate(move || send(&out, Action::Quit)),
    )?;

    let out = outbox.clone();
    registry.add(
        Command::new(format!("Say hello from context {}", context + 1)).on_initiate(move |ctx| {
            send(&out, Action::SetStatus(format!("Hello from context {}", context + 1)));
            ctx.finish()
        }),
    )?;

    log::debug!(
        "Registered {} commands for context {}",
        registry.len(),
        context + 1
    );
    Ok(())
}

/// Two levels of prompts: pick a group, then pick an entry of that group
fn nested_command(outbox: Outbox) -> Command {
    let group = Rc::new(Cell::new(None::<usize>));
    let reset = group.clone();

    Command::new("Nested prompts")
        .on_initiate(move |ctx| {
            reset.set(None);
            ctx.prompt(["Option 1", "Option 2", "Option 3"])
        })
        .on_select_option(move |ctx, option| match group.get() {
            None => {
                group.set(Some(option));
                let n = option + 1;
                ctx.prompt([
                    format!("Option {}.1", n),
                    format!("Option {}.2", n),
                    format!("Option {}.3", n),
                ])
            }
            Some(first) => {
                group.set(None);
                send(
                    &outbox,
                    Action::SetStatus(format!("Picked option {}.{}", first + 1, option + 1)),
                );
                ctx.finish()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmd_palette::{CommandPalette, SelectOutcome};

    fn palette() -> (CommandPalette, CommandRegistry, Outbox) {
        let registry = CommandRegistry::new();
        let outbox = Outbox::default();
        register_demo_commands(&registry, &outbox, 0).unwrap();
        (CommandPalette::new(registry.clone()), registry, outbox)
    }

    fn select_by_query(palette: &mut CommandPalette, query: &str) -> SelectOutcome {
        palette.set_query(query).unwrap();
        palette.select(0).unwrap()
    }

    #[test]
    fn test_theme_prompt_dispatches_choice() {
        let (mut palette, _, outbox) = palette();

        assert_eq!(select_by_query(&mut palette, "theme"), SelectOutcome::StillOpen);
        assert_eq!(palette.item_count(), ThemeName::ALL.len());
        assert_eq!(select_by_query(&mut palette, "light"), SelectOutcome::RequestClose);

        assert_eq!(*outbox.borrow(), vec![Action::SetTheme(ThemeName::Light)]);
    }

    #[test]
    fn test_nested_prompt_reports_both_levels() {
        let (mut palette, _, outbox) = palette();

        select_by_query(&mut palette, "nested");
        palette.select(2).unwrap();
        assert_eq!(palette.depth(), 2);
        assert_eq!(palette.item(0).unwrap().text, "Option 3.1");

        assert_eq!(palette.select(1), Ok(SelectOutcome::RequestClose));
        assert_eq!(
            *outbox.borrow(),
            vec![Action::SetStatus("Picked option 3.2".into())]
        );
    }

    #[test]
    fn test_nested_prompt_restarts_after_close() {
        let (mut palette, _, _) = palette();

        select_by_query(&mut palette, "nested");
        palette.select(0).unwrap();
        palette.close();

        // A fresh run starts at the first level again
        select_by_query(&mut palette, "nested");
        assert_eq!(palette.depth(), 1);
        assert_eq!(palette.item(0).unwrap().text, "Option 1");
    }

    #[test]
    fn test_example_command_can_be_removed_and_added() {
        let (mut palette, registry, _) = palette();
        assert!(registry.find(EXAMPLE_COMMAND).is_some());

        select_by_query(&mut palette, "remove");
        assert!(registry.find(EXAMPLE_COMMAND).is_none());

        select_by_query(&mut palette, "add");
        select_by_query(&mut palette, "add");
        assert_eq!(
            registry
                .names()
                .iter()
                .filter(|name| name.as_str() == EXAMPLE_COMMAND)
                .count(),
            1
        );
    }

    #[test]
    fn test_quit_is_sent_on_terminate() {
        let (mut palette, _, outbox) = palette();
        assert_eq!(select_by_query(&mut palette, "quit"), SelectOutcome::RequestClose);
        assert_eq!(*outbox.borrow(), vec![Action::Quit]);
    }

    #[test]
    fn test_contexts_get_their_own_greeting() {
        let registry = CommandRegistry::new();
        register_demo_commands(&registry, &Outbox::default(), 2).unwrap();
        assert!(registry.find("Say hello from context 3").is_some());
    }
}
