//! Core State traits for state machine states.
//!
//! All state machine states must implement [`State`]. Types whose full
//! universe of values is known at compile time additionally implement
//! [`StateSet`], which lets a machine pre-populate one record per state
//! without the caller listing them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are opaque, comparable values with no behavior of their own.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transition tables and checkpoints
/// - `Eq` + `Hash`: states key the per-state record map
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable for checkpoints
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// A state type with a closed, finite universe of values.
///
/// `all()` must return every value exactly once, in declaration order.
/// The [`state_enum!`](crate::state_enum) macro implements this for
/// fieldless enums.
pub trait StateSet: State {
    /// Every declared state, in declaration order.
    fn all() -> Vec<Self>;
}
