//! Command palette engine for interactive applications
//!
//! This crate provides the non-visual half of a command palette:
//! - Fuzzy subsequence matching with highlight positions
//! - A sorted command registry that callbacks may mutate while running
//! - An execution context for commands that prompt the user (recursively)
//! - The effective item list the UI renders, and item selection
//!
//! Rendering and input handling are left to the host application.
//!
//! # Example
//!
//! ```rust
//! use cmd_palette::{Command, CommandPalette, CommandRegistry, SelectOutcome};
//!
//! let registry = CommandRegistry::new();
//! registry.add(
//!     Command::new("Select theme")
//!         .on_initiate(|ctx| ctx.prompt(["Dark", "Light"]))
//!         .on_select_option(|ctx, option| {
//!             println!("picked theme #{option}");
//!             ctx.finish()
//!         }),
//! )?;
//!
//! let mut palette = CommandPalette::new(registry);
//! palette.set_query("theme")?;
//! assert_eq!(palette.select(0)?, SelectOutcome::StillOpen);
//! assert_eq!(palette.depth(), 1);
//!
//! assert_eq!(palette.select(1)?, SelectOutcome::RequestClose);
//! # Ok::<(), cmd_palette::PaletteError>(())
//! ```

mod context;
mod error;
pub mod fuzzy;
mod palette;
mod registry;
mod search;

pub use context::ExecutionContext;
pub use error::{PaletteError, Result};
pub use fuzzy::{fuzzy_match, fuzzy_match_with_capacity, FuzzyMatch, MatchPositions, MAX_MATCHES};
pub use palette::{CommandPalette, IndexKind, Item, ItemKind, PaletteOptions, SelectOutcome};
pub use registry::{
    Command, CommandRegistry, InitiateCallback, SelectOptionCallback, TerminateCallback,
};
pub use search::{search, MatchBackend, SearchResult};
