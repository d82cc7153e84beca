//! Tickstate: a trigger-driven finite state machine
//!
//! A machine is built over a closed, finite universe of states. Transitions
//! are keyed by `(state, trigger)`, and every state carries ordered Enter,
//! Update and Exit callback lists. The machine is purely reactive: the
//! caller fires triggers with `execute` and drives per-frame work with
//! `on_update`.
//!
//! # Core Concepts
//!
//! - **State**: Closed state universe via the `State` and `StateSet` traits
//! - **Trigger**: Any comparable value used as a transition key
//! - **Timing**: Enter, Update or Exit, the points where callbacks fire
//! - **Checkpoint**: Serializable snapshot of current state and transitions
//!
//! # Example
//!
//! ```rust
//! use tickstate::{state_enum, StateMachine, Timing};
//! use serde::{Deserialize, Serialize};
//! use std::sync::{Arc, Mutex};
//!
//! state_enum! {
//!     enum Player {
//!         Idle,
//!         Running,
//!         Paused,
//!     }
//! }
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
//! enum Input {
//!     Start,
//!     Pause,
//! }
//!
//! let mut player: StateMachine<Player, Input> = StateMachine::with_default().unwrap();
//! player.add_transition(Player::Idle, Player::Running, Input::Start).unwrap();
//! player.add_transition(Player::Running, Player::Paused, Input::Pause).unwrap();
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&log);
//! player
//!     .subscribe(&Player::Running, Timing::Update, move || sink.lock().unwrap().push("tick"))
//!     .unwrap();
//!
//! player.execute(Input::Start).unwrap();
//! player.on_update();
//! player.execute(Input::Pause).unwrap();
//! player.on_update();
//!
//! assert_eq!(player.current(), &Player::Paused);
//! assert_eq!(*log.lock().unwrap(), vec!["tick"]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{State, StateSet, Timing, TransitionEntry, Trigger};
pub use machine::{MachineError, StateMachine, SubscriptionId};
