//! Per-state container: outgoing transitions plus lifecycle callbacks.

use crate::core::{State, Timing, Trigger};
use crate::machine::callbacks::CallbackList;
use std::collections::HashMap;

/// Everything the machine knows about one declared state.
#[derive(Debug)]
pub(crate) struct StateRecord<S: State, T: Trigger> {
    pub(crate) transitions: HashMap<T, S>,
    on_enter: CallbackList,
    on_update: CallbackList,
    on_exit: CallbackList,
}

impl<S: State, T: Trigger> StateRecord<S, T> {
    pub(crate) fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            on_enter: CallbackList::default(),
            on_update: CallbackList::default(),
            on_exit: CallbackList::default(),
        }
    }

    pub(crate) fn callbacks(&self, timing: Timing) -> &CallbackList {
        match timing {
            Timing::Enter => &self.on_enter,
            Timing::Update => &self.on_update,
            Timing::Exit => &self.on_exit,
        }
    }

    pub(crate) fn callbacks_mut(&mut self, timing: Timing) -> &mut CallbackList {
        match timing {
            Timing::Enter => &mut self.on_enter,
            Timing::Update => &mut self.on_update,
            Timing::Exit => &mut self.on_exit,
        }
    }

    pub(crate) fn fire(&mut self, timing: Timing) {
        self.callbacks_mut(timing).invoke_all();
    }
}
