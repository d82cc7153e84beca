//! Machine error types.

use thiserror::Error;

/// Errors raised by state machine operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// The declared state universe has no states.
    #[error("State universe is empty; a machine needs at least one declared state")]
    EmptyStateUniverse,

    /// A state outside the declared universe was named.
    #[error("State '{state}' is not part of the declared state universe")]
    UnknownState { state: String },

    /// No transition is registered for the current state and trigger.
    #[error("No transition registered from state '{state}' for trigger '{trigger}'")]
    IllegalTransition { state: String, trigger: String },
}
