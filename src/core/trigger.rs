//! Trigger keys and transition table entries.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use super::state::State;

/// An external stimulus used as a transition key.
///
/// Triggers only need to be comparable; unlike states they are never
/// enumerated. Implemented for every type meeting the bounds, so plain
/// enums and `String` work out of the box.
pub trait Trigger: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync {}

impl<T> Trigger for T where
    T: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
}

/// A registered `(from, trigger) -> to` rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionEntry<S: State, T: Trigger> {
    /// Source state
    pub from: S,
    /// Trigger that fires the transition
    pub trigger: T,
    /// Destination state
    pub to: S,
}

impl<S: State, T: Trigger> TransitionEntry<S, T> {
    pub fn new(from: S, trigger: T, to: S) -> Self {
        Self { from, trigger, to }
    }
}
