//! Lifecycle points at which state callbacks fire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// When a state's callbacks run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timing {
    /// After the machine moves into the state
    Enter,
    /// On every caller-driven tick while the machine is in the state
    Update,
    /// Before the machine leaves the state
    Exit,
}

impl Timing {
    pub const ALL: [Timing; 3] = [Timing::Enter, Timing::Update, Timing::Exit];
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "enter",
            Self::Update => "update",
            Self::Exit => "exit",
        };
        f.write_str(name)
    }
}
