//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and the `state_enum!` macro for
//! creating state machines with minimal boilerplate while validating the
//! whole configuration up front.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::{BuildError, ConfigViolation};
pub use machine::StateMachineBuilder;

use crate::core::{StateSet, TransitionEntry, Trigger};

/// Create the transition table of a cycle through every state of `S`.
///
/// Each state moves to the next declared state on `trigger`, and the last
/// state wraps around to the first.
///
/// # Example
///
/// ```
/// use tickstate::builder::{cycle, StateMachineBuilder};
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Season {
///         Spring,
///         Summer,
///         Autumn,
///         Winter,
///     }
/// }
///
/// let mut year = StateMachineBuilder::<Season, String>::from_state_set()
///     .initial_default()
///     .transitions(cycle("next".to_string()))
///     .build()
///     .unwrap();
///
/// for _ in 0..4 {
///     year.execute("next".to_string()).unwrap();
/// }
/// assert_eq!(year.current(), &Season::Spring);
/// ```
pub fn cycle<S, T>(trigger: T) -> Vec<TransitionEntry<S, T>>
where
    S: StateSet,
    T: Trigger,
{
    let states = S::all();
    let count = states.len();
    states
        .iter()
        .enumerate()
        .map(|(index, from)| {
            let to = states[(index + 1) % count].clone();
            TransitionEntry::new(from.clone(), trigger.clone(), to)
        })
        .collect()
}
