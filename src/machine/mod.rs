//! The trigger-driven state machine.
//!
//! # Key Concepts
//!
//! - **State records**: one per declared state, created at construction
//! - **Transitions**: `(state, trigger) -> state`, last registration wins
//! - **Callbacks**: ordered Enter/Update/Exit lists, removed by handle
//!
//! # Execution Order
//!
//! `execute` runs the current state's Exit callbacks, looks up the trigger,
//! moves to the destination and runs its Enter callbacks. Exit callbacks
//! run even when the lookup then fails.

mod callbacks;
#[allow(clippy::module_inception)]
mod machine;
mod record;

pub mod error;

pub use callbacks::{Callback, SubscriptionId};
pub use error::MachineError;
pub use machine::StateMachine;
