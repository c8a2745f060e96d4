//! Error type for contract violations between the host UI and the engine

use thiserror::Error;

/// Errors reported by the palette engine
///
/// Every variant is a programming error in the integrating application (the
/// UI and the engine disagree about state). None of them are expected during
/// normal interaction; an empty query or zero search results are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("item index {index} is out of bounds (item count is {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("no command is currently executing")]
    NoActiveCommand,

    #[error("command '{active}' is still executing, cannot initiate another one")]
    AlreadyInitiated { active: String },

    #[error("search pattern has {len} characters, match capacity is {capacity}")]
    PatternTooLong { len: usize, capacity: usize },

    #[error("command '{0}' prompted for options but has no select-option callback")]
    MissingOptionCallback(String),

    #[error("a command named '{0}' is already registered")]
    DuplicateCommand(String),
}

pub type Result<T, E = PaletteError> = std::result::Result<T, E>;
