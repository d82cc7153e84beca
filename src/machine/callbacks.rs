//! Ordered callback registries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered lifecycle callback.
pub type Callback = Box<dyn FnMut() + Send>;

/// Handle identifying one registration.
///
/// Returned by `subscribe` and used by `unsubscribe`. Handles are unique
/// per machine, so registering the same closure twice yields two handles
/// that can be removed independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Callbacks for one state and timing, kept in registration order.
#[derive(Default)]
pub(crate) struct CallbackList {
    entries: Vec<(SubscriptionId, Callback)>,
}

impl CallbackList {
    pub(crate) fn push(&mut self, id: SubscriptionId, callback: Callback) {
        self.entries.push((id, callback));
    }

    /// Remove the first registration with `id`. Returns whether one was found.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn invoke_all(&mut self) {
        for (_, callback) in self.entries.iter_mut() {
            callback();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for CallbackList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}
