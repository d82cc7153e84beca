//! Core state machine types.
//!
//! This module contains the plain data vocabulary shared by the rest of
//! the crate:
//! - State definitions via the `State` and `StateSet` traits
//! - Trigger keys and transition table entries
//! - Callback timings
//!
//! Nothing in this module holds runtime state.

mod state;
mod timing;
mod trigger;

pub use state::{State, StateSet};
pub use timing::Timing;
pub use trigger::{TransitionEntry, Trigger};
