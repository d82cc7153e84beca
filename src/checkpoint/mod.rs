//! Checkpoint and restore functionality for state machines.
//!
//! A checkpoint captures a machine's data: its declared states, the
//! current state and the transition table. Callbacks are closures and are
//! never captured; restoring keeps whatever callbacks the target machine
//! already has and fires none of them.

use crate::core::{State, TransitionEntry, Trigger};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of state machine data.
/// Does NOT include callbacks (not serializable).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State, T: Trigger> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Declared state universe, in declaration order
    pub states: Vec<S>,

    /// Current state of the machine
    pub current_state: S,

    /// Complete transition table
    pub transitions: Vec<TransitionEntry<S, T>>,
}

impl<S: State, T: Trigger> Checkpoint<S, T> {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize to the compact binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format, rejecting unsupported versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Capture current state and transition table.
    pub fn checkpoint(&self) -> Checkpoint<S, T> {
        let checkpoint = Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            states: self.states().to_vec(),
            current_state: self.current().clone(),
            transitions: self.transitions(),
        };
        debug!(
            id = %checkpoint.id,
            current = checkpoint.current_state.name(),
            transitions = checkpoint.transitions.len(),
            "checkpoint created"
        );
        checkpoint
    }

    /// Restore current state and transition table from a checkpoint.
    ///
    /// Every state the checkpoint mentions must be declared on this
    /// machine. Existing transitions are replaced, callbacks are kept, and
    /// no callback fires. On error the machine is left untouched.
    pub fn restore(&mut self, checkpoint: &Checkpoint<S, T>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;

        if let Some(missing) = checkpoint.states.iter().find(|s| !self.contains_state(s)) {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint declares state '{}' unknown to this machine",
                missing.name()
            )));
        }

        self.reset_to(
            checkpoint.current_state.clone(),
            checkpoint.transitions.clone(),
        )
        .map_err(|e| CheckpointError::ValidationFailed(e.to_string()))?;

        info!(
            id = %checkpoint.id,
            current = checkpoint.current_state.name(),
            "machine restored from checkpoint"
        );
        Ok(())
    }

    /// Create a machine from a checkpoint alone, with no callbacks.
    pub fn from_checkpoint(checkpoint: &Checkpoint<S, T>) -> Result<Self, CheckpointError> {
        checkpoint.check_version()?;
        let mut machine =
            Self::with_states(checkpoint.states.clone(), checkpoint.current_state.clone())
                .map_err(|e| CheckpointError::ValidationFailed(e.to_string()))?;
        machine.restore(checkpoint)?;
        Ok(machine)
    }
}
