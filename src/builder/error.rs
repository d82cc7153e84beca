//! Build errors for the state machine builder.

use crate::machine::MachineError;
use std::fmt;
use thiserror::Error;

/// One problem found while validating a builder's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigViolation {
    /// The state universe is empty.
    EmptyStateUniverse,
    /// No initial state was given and none could be defaulted.
    MissingInitialState,
    /// The initial state is not declared.
    UndeclaredInitialState { state: String },
    /// A transition names an undeclared source or destination.
    UndeclaredTransitionState {
        from: String,
        trigger: String,
        to: String,
        state: String,
    },
    /// A callback was registered for an undeclared state.
    UndeclaredCallbackState { state: String, timing: String },
}

impl fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStateUniverse => write!(f, "state universe is empty"),
            Self::MissingInitialState => write!(f, "initial state not specified"),
            Self::UndeclaredInitialState { state } => {
                write!(f, "initial state '{state}' is not declared")
            }
            Self::UndeclaredTransitionState {
                from,
                trigger,
                to,
                state,
            } => write!(
                f,
                "transition '{from}' --{trigger}--> '{to}' names undeclared state '{state}'"
            ),
            Self::UndeclaredCallbackState { state, timing } => {
                write!(f, "{timing} callback registered for undeclared state '{state}'")
            }
        }
    }
}

/// Errors that can occur when building state machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid configuration ({} problem(s)): {}", .0.len(), join(.0))]
    InvalidConfiguration(Vec<ConfigViolation>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}

impl BuildError {
    /// All configuration problems, empty for non-configuration errors.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::InvalidConfiguration(violations) => violations,
            Self::Machine(_) => &[],
        }
    }
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
