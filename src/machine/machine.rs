//! Trigger-driven state machine with lifecycle callbacks.

use crate::core::{State, StateSet, Timing, TransitionEntry, Trigger};
use crate::machine::callbacks::SubscriptionId;
use crate::machine::error::MachineError;
use crate::machine::record::StateRecord;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Finite state machine keyed by `(state, trigger)`.
///
/// The machine owns one record per declared state, created at construction.
/// Each record holds the state's outgoing transitions and its Enter, Update
/// and Exit callback lists. The current state is the only runtime state;
/// there is no history.
///
/// The machine is purely reactive: `execute` and `on_update` run every
/// affected callback on the calling thread before returning.
///
/// # Example
///
/// ```rust
/// use tickstate::machine::StateMachine;
/// use tickstate::{state_enum, Timing};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// let mut door: StateMachine<Door, String> = StateMachine::with_default().unwrap();
/// door.add_transition(Door::Closed, Door::Open, "push".to_string()).unwrap();
///
/// let opened = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&opened);
/// door.subscribe(&Door::Open, Timing::Enter, move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// })
/// .unwrap();
///
/// door.execute("push".to_string()).unwrap();
/// assert_eq!(door.current(), &Door::Open);
/// assert_eq!(opened.load(Ordering::SeqCst), 1);
///
/// // Nothing is registered for "push" while open.
/// assert!(door.execute("push".to_string()).is_err());
/// ```
pub struct StateMachine<S: State, T: Trigger> {
    current: S,
    order: Vec<S>,
    records: HashMap<S, StateRecord<S, T>>,
    next_subscription: u64,
}

impl<S: StateSet, T: Trigger> StateMachine<S, T> {
    /// Create a machine over every state of `S`, starting in `initial`.
    pub fn new(initial: S) -> Result<Self, MachineError> {
        Self::with_states(S::all(), initial)
    }

    /// Create a machine over every state of `S`, starting in `S::default()`.
    pub fn with_default() -> Result<Self, MachineError>
    where
        S: Default,
    {
        Self::new(S::default())
    }
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create a machine over an explicit state universe.
    ///
    /// Duplicate states keep their first position. Fails if the universe is
    /// empty or does not contain `initial`.
    pub fn with_states<I>(states: I, initial: S) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = S>,
    {
        let mut order = Vec::new();
        let mut records = HashMap::new();
        for state in states {
            if !records.contains_key(&state) {
                records.insert(state.clone(), StateRecord::new());
                order.push(state);
            }
        }

        if order.is_empty() {
            return Err(MachineError::EmptyStateUniverse);
        }
        if !records.contains_key(&initial) {
            return Err(unknown(&initial));
        }

        debug!(
            states = order.len(),
            initial = initial.name(),
            "state machine created"
        );

        Ok(Self {
            current: initial,
            order,
            records,
            next_subscription: 0,
        })
    }

    /// Get current state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Declared states, in declaration order
    pub fn states(&self) -> &[S] {
        &self.order
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.records.contains_key(state)
    }

    /// Register that `trigger` fired in `from` moves the machine to `to`.
    ///
    /// A later registration for the same `(from, trigger)` pair replaces the
    /// earlier destination. Both endpoints must be declared states.
    pub fn add_transition(&mut self, from: S, to: S, trigger: T) -> Result<(), MachineError> {
        if !self.records.contains_key(&to) {
            return Err(unknown(&to));
        }
        let record = self.records.get_mut(&from).ok_or_else(|| unknown(&from))?;

        if let Some(previous) = record.transitions.insert(trigger.clone(), to.clone()) {
            debug!(
                from = from.name(),
                trigger = ?trigger,
                previous = previous.name(),
                to = to.name(),
                "transition redefined"
            );
        } else {
            trace!(from = from.name(), trigger = ?trigger, to = to.name(), "transition added");
        }
        Ok(())
    }

    /// Append `callback` to the `timing` list of `state`.
    ///
    /// Registrations are never de-duplicated; every one fires, in
    /// registration order.
    pub fn subscribe<F>(
        &mut self,
        state: &S,
        timing: Timing,
        callback: F,
    ) -> Result<SubscriptionId, MachineError>
    where
        F: FnMut() + Send + 'static,
    {
        let record = self.records.get_mut(state).ok_or_else(|| unknown(state))?;

        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        record.callbacks_mut(timing).push(id, Box::new(callback));

        trace!(state = state.name(), %timing, subscription = %id, "callback subscribed");
        Ok(id)
    }

    /// Remove the registration `id` from the `timing` list of `state`.
    ///
    /// Returns `Ok(false)` when no such registration exists there.
    pub fn unsubscribe(
        &mut self,
        state: &S,
        timing: Timing,
        id: SubscriptionId,
    ) -> Result<bool, MachineError> {
        let record = self.records.get_mut(state).ok_or_else(|| unknown(state))?;
        let removed = record.callbacks_mut(timing).remove(id);

        trace!(state = state.name(), %timing, subscription = %id, removed, "callback unsubscribed");
        Ok(removed)
    }

    /// Fire `trigger` against the current state.
    ///
    /// Exit callbacks of the current state run first, then the transition is
    /// looked up. An unregistered trigger yields
    /// [`MachineError::IllegalTransition`] with the current state unchanged,
    /// but the Exit callbacks have already run. On success the current state
    /// becomes the destination and its Enter callbacks run.
    pub fn execute(&mut self, trigger: T) -> Result<(), MachineError> {
        let record = self
            .records
            .get_mut(&self.current)
            .ok_or_else(|| unknown(&self.current))?;

        record.fire(Timing::Exit);

        let Some(next) = record.transitions.get(&trigger).cloned() else {
            warn!(state = self.current.name(), trigger = ?trigger, "illegal transition");
            return Err(MachineError::IllegalTransition {
                state: self.current.name().to_string(),
                trigger: format!("{trigger:?}"),
            });
        };

        debug!(
            from = self.current.name(),
            trigger = ?trigger,
            to = next.name(),
            "transition"
        );
        self.current = next;

        let record = self
            .records
            .get_mut(&self.current)
            .ok_or_else(|| unknown(&self.current))?;
        record.fire(Timing::Enter);
        Ok(())
    }

    /// Run the Update callbacks of the current state.
    ///
    /// Call once per external tick. Never changes the current state.
    pub fn on_update(&mut self) {
        if let Some(record) = self.records.get_mut(&self.current) {
            record.fire(Timing::Update);
        }
    }

    /// Check whether `trigger` is registered for the current state (pure)
    pub fn can_execute(&self, trigger: &T) -> bool {
        self.records
            .get(&self.current)
            .is_some_and(|record| record.transitions.contains_key(trigger))
    }

    /// Triggers registered for the current state
    pub fn permitted_triggers(&self) -> Vec<&T> {
        self.records
            .get(&self.current)
            .map(|record| record.transitions.keys().collect())
            .unwrap_or_default()
    }

    /// Outgoing transitions of `state` as `(trigger, destination)` pairs
    pub fn transitions_from(&self, state: &S) -> Result<Vec<(&T, &S)>, MachineError> {
        let record = self.records.get(state).ok_or_else(|| unknown(state))?;
        Ok(record.transitions.iter().collect())
    }

    /// The full transition table, grouped by source state in declaration order
    pub fn transitions(&self) -> Vec<TransitionEntry<S, T>> {
        self.order
            .iter()
            .filter_map(|state| self.records.get(state).map(|record| (state, record)))
            .flat_map(|(state, record)| {
                record.transitions.iter().map(move |(trigger, to)| {
                    TransitionEntry::new(state.clone(), trigger.clone(), to.clone())
                })
            })
            .collect()
    }

    /// Number of callbacks registered for `state` at `timing`
    pub fn subscription_count(&self, state: &S, timing: Timing) -> Result<usize, MachineError> {
        let record = self.records.get(state).ok_or_else(|| unknown(state))?;
        Ok(record.callbacks(timing).len())
    }

    /// Check whether the current state has no outgoing transitions (pure)
    pub fn is_terminal(&self) -> bool {
        self.records
            .get(&self.current)
            .is_none_or(|record| record.transitions.is_empty())
    }

    /// Replace the current state and transition table without firing callbacks.
    pub(crate) fn reset_to(
        &mut self,
        current: S,
        table: Vec<TransitionEntry<S, T>>,
    ) -> Result<(), MachineError> {
        if !self.records.contains_key(&current) {
            return Err(unknown(&current));
        }
        for entry in &table {
            for state in [&entry.from, &entry.to] {
                if !self.records.contains_key(state) {
                    return Err(unknown(state));
                }
            }
        }

        for record in self.records.values_mut() {
            record.transitions.clear();
        }
        for entry in table {
            if let Some(record) = self.records.get_mut(&entry.from) {
                record.transitions.insert(entry.trigger, entry.to);
            }
        }
        self.current = current;
        Ok(())
    }
}

impl<S: State, T: Trigger> std::fmt::Debug for StateMachine<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("states", &self.order)
            .field("transitions", &self.transitions().len())
            .finish()
    }
}

fn unknown<S: State>(state: &S) -> MachineError {
    MachineError::UnknownState {
        state: state.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
    enum Mode {
        #[default]
        Idle,
        Running,
        Paused,
    }

    impl State for Mode {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Paused => "Paused",
            }
        }
    }

    impl StateSet for Mode {
        fn all() -> Vec<Self> {
            vec![Self::Idle, Self::Running, Self::Paused]
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Input {
        Start,
        Pause,
        Resume,
        Stop,
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn record(log: &Log, label: &str) -> impl FnMut() + Send + 'static {
        let log = Arc::clone(log);
        let label = label.to_string();
        move || log.lock().unwrap().push(label.clone())
    }

    fn player() -> StateMachine<Mode, Input> {
        let mut machine = StateMachine::new(Mode::Idle).unwrap();
        machine
            .add_transition(Mode::Idle, Mode::Running, Input::Start)
            .unwrap();
        machine
            .add_transition(Mode::Running, Mode::Paused, Input::Pause)
            .unwrap();
        machine
            .add_transition(Mode::Paused, Mode::Running, Input::Resume)
            .unwrap();
        machine
            .add_transition(Mode::Running, Mode::Idle, Input::Stop)
            .unwrap();
        machine
    }

    fn subscribe_lifecycle(machine: &mut StateMachine<Mode, Input>, log: &Log) {
        for state in Mode::all() {
            for timing in [Timing::Enter, Timing::Exit] {
                let label = format!("{}.{:?}", state.name(), timing);
                machine.subscribe(&state, timing, record(log, &label)).unwrap();
            }
        }
    }

    #[test]
    fn new_machine_has_one_empty_record_per_state() {
        let machine: StateMachine<Mode, Input> = StateMachine::new(Mode::Idle).unwrap();

        assert_eq!(machine.states(), &[Mode::Idle, Mode::Running, Mode::Paused]);
        for state in Mode::all() {
            assert!(machine.transitions_from(&state).unwrap().is_empty());
            for timing in Timing::ALL {
                assert_eq!(machine.subscription_count(&state, timing).unwrap(), 0);
            }
        }
    }

    #[test]
    fn initial_state_is_supplied_value_or_default() {
        let machine: StateMachine<Mode, Input> = StateMachine::new(Mode::Paused).unwrap();
        assert_eq!(machine.current(), &Mode::Paused);

        let machine: StateMachine<Mode, Input> = StateMachine::with_default().unwrap();
        assert_eq!(machine.current(), &Mode::Idle);
    }

    #[test]
    fn empty_universe_is_rejected() {
        let result: Result<StateMachine<Mode, Input>, _> =
            StateMachine::with_states(Vec::new(), Mode::Idle);
        assert_eq!(result.unwrap_err(), MachineError::EmptyStateUniverse);
    }

    #[test]
    fn initial_outside_universe_is_rejected() {
        let result: Result<StateMachine<Mode, Input>, _> =
            StateMachine::with_states(vec![Mode::Idle, Mode::Running], Mode::Paused);
        assert_eq!(
            result.unwrap_err(),
            MachineError::UnknownState {
                state: "Paused".to_string()
            }
        );
    }

    #[test]
    fn duplicate_states_collapse() {
        let machine: StateMachine<Mode, Input> =
            StateMachine::with_states(vec![Mode::Running, Mode::Idle, Mode::Running], Mode::Idle)
                .unwrap();
        assert_eq!(machine.states(), &[Mode::Running, Mode::Idle]);
    }

    #[test]
    fn execute_follows_registered_transition() {
        let mut machine = player();
        machine.execute(Input::Start).unwrap();
        assert_eq!(machine.current(), &Mode::Running);
    }

    #[test]
    fn add_transition_last_write_wins() {
        let mut machine = player();
        machine
            .add_transition(Mode::Idle, Mode::Paused, Input::Start)
            .unwrap();

        machine.execute(Input::Start).unwrap();

        assert_eq!(machine.current(), &Mode::Paused);
        assert_eq!(machine.transitions_from(&Mode::Idle).unwrap().len(), 1);
    }

    #[test]
    fn add_transition_rejects_undeclared_endpoints() {
        let mut machine: StateMachine<Mode, Input> =
            StateMachine::with_states(vec![Mode::Idle, Mode::Running], Mode::Idle).unwrap();

        let err = machine
            .add_transition(Mode::Idle, Mode::Paused, Input::Pause)
            .unwrap_err();
        assert_eq!(
            err,
            MachineError::UnknownState {
                state: "Paused".to_string()
            }
        );

        let err = machine
            .add_transition(Mode::Paused, Mode::Idle, Input::Stop)
            .unwrap_err();
        assert!(matches!(err, MachineError::UnknownState { .. }));
        assert!(machine.transitions().is_empty());
    }

    #[test]
    fn illegal_transition_keeps_state_but_fires_exit() {
        let log = Log::default();
        let mut machine = player();
        subscribe_lifecycle(&mut machine, &log);

        let err = machine.execute(Input::Pause).unwrap_err();

        assert_eq!(
            err,
            MachineError::IllegalTransition {
                state: "Idle".to_string(),
                trigger: "Pause".to_string(),
            }
        );
        assert_eq!(machine.current(), &Mode::Idle);
        assert_eq!(*log.lock().unwrap(), vec!["Idle.Exit"]);
    }

    #[test]
    fn exit_then_enter_fire_once_each() {
        let log = Log::default();
        let mut machine = player();
        machine
            .subscribe(&Mode::Idle, Timing::Exit, record(&log, "idle-exit"))
            .unwrap();
        machine
            .subscribe(&Mode::Running, Timing::Enter, record(&log, "running-enter"))
            .unwrap();

        machine.execute(Input::Start).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["idle-exit", "running-enter"]);
    }

    #[test]
    fn transition_never_fires_update() {
        let log = Log::default();
        let mut machine = player();
        machine
            .subscribe(&Mode::Idle, Timing::Update, record(&log, "idle-update"))
            .unwrap();
        machine
            .subscribe(&Mode::Running, Timing::Update, record(&log, "running-update"))
            .unwrap();

        machine.execute(Input::Start).unwrap();

        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn callbacks_fire_in_registration_order_and_unsubscribe_removes() {
        let log = Log::default();
        let mut machine = player();
        let _first = machine
            .subscribe(&Mode::Running, Timing::Enter, record(&log, "first"))
            .unwrap();
        let second = machine
            .subscribe(&Mode::Running, Timing::Enter, record(&log, "second"))
            .unwrap();
        let _third = machine
            .subscribe(&Mode::Running, Timing::Enter, record(&log, "third"))
            .unwrap();

        machine.execute(Input::Start).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);

        assert!(machine
            .unsubscribe(&Mode::Running, Timing::Enter, second)
            .unwrap());
        log.lock().unwrap().clear();

        machine.execute(Input::Stop).unwrap();
        machine.execute(Input::Start).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "third"]);
    }

    #[test]
    fn duplicate_callbacks_are_not_deduplicated() {
        let mut machine = player();
        let shared = Arc::new(Mutex::new(0usize));
        for _ in 0..2 {
            let shared = Arc::clone(&shared);
            machine
                .subscribe(&Mode::Idle, Timing::Update, move || {
                    *shared.lock().unwrap() += 1;
                })
                .unwrap();
        }

        machine.on_update();

        assert_eq!(*shared.lock().unwrap(), 2);
    }

    #[test]
    fn unsubscribe_unknown_handle_is_noop() {
        let log = Log::default();
        let mut machine = player();
        let id = machine
            .subscribe(&Mode::Idle, Timing::Update, record(&log, "tick"))
            .unwrap();

        assert!(!machine.unsubscribe(&Mode::Idle, Timing::Exit, id).unwrap());
        assert!(!machine.unsubscribe(&Mode::Running, Timing::Update, id).unwrap());
        assert!(machine.unsubscribe(&Mode::Idle, Timing::Update, id).unwrap());
        assert!(!machine.unsubscribe(&Mode::Idle, Timing::Update, id).unwrap());

        machine.on_update();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn subscribe_rejects_undeclared_state() {
        let mut machine: StateMachine<Mode, Input> =
            StateMachine::with_states(vec![Mode::Idle], Mode::Idle).unwrap();

        let err = machine
            .subscribe(&Mode::Running, Timing::Enter, || {})
            .unwrap_err();
        assert!(matches!(err, MachineError::UnknownState { .. }));
    }

    #[test]
    fn on_update_fires_only_current_update_callbacks() {
        let log = Log::default();
        let mut machine = player();
        subscribe_lifecycle(&mut machine, &log);
        machine
            .subscribe(&Mode::Idle, Timing::Update, record(&log, "Idle.Update"))
            .unwrap();
        machine
            .subscribe(&Mode::Running, Timing::Update, record(&log, "Running.Update"))
            .unwrap();

        machine.on_update();
        machine.on_update();

        assert_eq!(machine.current(), &Mode::Idle);
        assert_eq!(*log.lock().unwrap(), vec!["Idle.Update", "Idle.Update"]);
    }

    #[test]
    fn self_transition_fires_exit_then_enter() {
        let log = Log::default();
        let mut machine: StateMachine<Mode, Input> = StateMachine::new(Mode::Running).unwrap();
        machine
            .add_transition(Mode::Running, Mode::Running, Input::Resume)
            .unwrap();
        subscribe_lifecycle(&mut machine, &log);

        machine.execute(Input::Resume).unwrap();

        assert_eq!(machine.current(), &Mode::Running);
        assert_eq!(*log.lock().unwrap(), vec!["Running.Exit", "Running.Enter"]);
    }

    #[test]
    fn start_pause_resume_stop_scenario() {
        let log = Log::default();
        let mut machine = player();
        subscribe_lifecycle(&mut machine, &log);

        for input in [Input::Start, Input::Pause, Input::Resume, Input::Stop] {
            machine.execute(input).unwrap();
        }

        assert_eq!(machine.current(), &Mode::Idle);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "Idle.Exit",
                "Running.Enter",
                "Running.Exit",
                "Paused.Enter",
                "Paused.Exit",
                "Running.Enter",
                "Running.Exit",
                "Idle.Enter",
            ]
        );
    }

    #[test]
    fn inspection_reports_permitted_triggers() {
        let mut machine = player();
        assert!(machine.can_execute(&Input::Start));
        assert!(!machine.can_execute(&Input::Pause));
        assert_eq!(machine.permitted_triggers(), vec![&Input::Start]);

        machine.execute(Input::Start).unwrap();
        let mut triggers = machine.permitted_triggers();
        triggers.sort_by_key(|t| format!("{t:?}"));
        assert_eq!(triggers, vec![&Input::Pause, &Input::Stop]);
    }

    #[test]
    fn transitions_lists_table_by_source_state() {
        let machine = player();
        let table = machine.transitions();

        assert_eq!(table.len(), 4);
        assert_eq!(table[0], TransitionEntry::new(Mode::Idle, Input::Start, Mode::Running));
        assert_eq!(table[3].from, Mode::Paused);
    }

    #[test]
    fn state_without_transitions_is_terminal() {
        let mut machine: StateMachine<Mode, Input> = StateMachine::new(Mode::Idle).unwrap();
        machine
            .add_transition(Mode::Idle, Mode::Paused, Input::Pause)
            .unwrap();
        assert!(!machine.is_terminal());

        machine.execute(Input::Pause).unwrap();

        assert!(machine.is_terminal());
        assert!(machine.execute(Input::Resume).is_err());
        assert_eq!(machine.current(), &Mode::Paused);
    }
}
