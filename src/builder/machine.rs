//! Builder for constructing state machines.

use crate::builder::error::{BuildError, ConfigViolation};
use crate::core::{State, StateSet, Timing, TransitionEntry, Trigger};
use crate::machine::{Callback, StateMachine};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Builder for constructing state machines with a fluent API.
///
/// Problems are not reported one at a time: `build()` validates the whole
/// configuration and returns every violation it found.
///
/// Callbacks registered here are owned by the machine for its whole life.
/// Use [`StateMachine::subscribe`] for callbacks that must be removable.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::StateMachineBuilder;
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// let mut light = StateMachineBuilder::<Light, u8>::from_state_set()
///     .initial(Light::Red)
///     .transition(Light::Red, Light::Green, 0)
///     .transition(Light::Green, Light::Yellow, 0)
///     .transition(Light::Yellow, Light::Red, 0)
///     .build()
///     .unwrap();
///
/// light.execute(0).unwrap();
/// assert_eq!(light.current(), &Light::Green);
/// ```
pub struct StateMachineBuilder<S: State, T: Trigger> {
    states: Vec<S>,
    initial: Option<S>,
    transitions: Vec<TransitionEntry<S, T>>,
    callbacks: Vec<(S, Timing, Callback)>,
}

impl<S: State, T: Trigger> StateMachineBuilder<S, T> {
    /// Create a new builder with no declared states.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    /// Declare additional states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states.extend(states);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Use `S::default()` as the initial state.
    pub fn initial_default(self) -> Self
    where
        S: Default,
    {
        self.initial(S::default())
    }

    /// Add a `from --trigger--> to` transition. Later pairs override earlier ones.
    pub fn transition(mut self, from: S, to: S, trigger: T) -> Self {
        self.transitions.push(TransitionEntry::new(from, trigger, to));
        self
    }

    /// Add several transitions at once.
    pub fn transitions<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = TransitionEntry<S, T>>,
    {
        self.transitions.extend(entries);
        self
    }

    /// Register a callback for `state` at `timing`.
    pub fn on<F>(mut self, state: S, timing: Timing, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.callbacks.push((state, timing, Box::new(callback)));
        self
    }

    pub fn on_enter<F>(self, state: S, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on(state, Timing::Enter, callback)
    }

    pub fn on_update<F>(self, state: S, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on(state, Timing::Update, callback)
    }

    pub fn on_exit<F>(self, state: S, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on(state, Timing::Exit, callback)
    }

    /// Validate the configuration, accumulating ALL violations.
    pub fn validate(&self) -> Result<(), BuildError> {
        let declared: HashSet<&S> = self.states.iter().collect();
        let mut checks: Vec<Check> = Vec::new();

        if declared.is_empty() {
            checks.push(Validation::fail(ConfigViolation::EmptyStateUniverse));
        }

        checks.push(match &self.initial {
            None => Validation::fail(ConfigViolation::MissingInitialState),
            Some(state) if !declared.is_empty() && !declared.contains(state) => {
                Validation::fail(ConfigViolation::UndeclaredInitialState {
                    state: state.name().to_string(),
                })
            }
            Some(_) => Validation::success(()),
        });

        for entry in &self.transitions {
            for state in [&entry.from, &entry.to] {
                let check = if declared.contains(state) {
                    Validation::success(())
                } else {
                    Validation::fail(ConfigViolation::UndeclaredTransitionState {
                        from: entry.from.name().to_string(),
                        trigger: format!("{:?}", entry.trigger),
                        to: entry.to.name().to_string(),
                        state: state.name().to_string(),
                    })
                };
                checks.push(check);
            }
        }

        for (state, timing, _) in &self.callbacks {
            let check = if declared.contains(state) {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::UndeclaredCallbackState {
                    state: state.name().to_string(),
                    timing: timing.to_string(),
                })
            };
            checks.push(check);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(BuildError::InvalidConfiguration(
                errors.iter().cloned().collect(),
            )),
        }
    }

    /// Build the state machine.
    /// Returns an error listing every configuration problem.
    pub fn build(self) -> Result<StateMachine<S, T>, BuildError> {
        self.validate()?;
        let initial = self
            .initial
            .ok_or(BuildError::InvalidConfiguration(vec![
                ConfigViolation::MissingInitialState,
            ]))?;

        let mut machine = StateMachine::with_states(self.states, initial)?;
        for entry in self.transitions {
            machine.add_transition(entry.from, entry.to, entry.trigger)?;
        }
        let callback_count = self.callbacks.len();
        for (state, timing, callback) in self.callbacks {
            machine.subscribe(&state, timing, callback)?;
        }

        debug!(
            states = machine.states().len(),
            transitions = machine.transitions().len(),
            callbacks = callback_count,
            "state machine built"
        );
        Ok(machine)
    }
}

impl<S: StateSet, T: Trigger> StateMachineBuilder<S, T> {
    /// Create a builder with every state of `S` already declared.
    pub fn from_state_set() -> Self {
        Self::new().states(S::all())
    }
}

impl<S: State, T: Trigger> Default for StateMachineBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
