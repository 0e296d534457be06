//! Checkpoint and resume functionality for controllers.
//!
//! A checkpoint captures where a controller is in its graph: the current
//! state, the tick counter, the change history and the configuration that
//! governs that history. It does not capture the
//! graph (actions and decisions are code) or the state data (owned by the
//! host, which restores it however it persists entity data).
//!
//! States are stored by name, so a checkpoint can be resumed against a
//! freshly built graph with the same state names, for instance after a
//! process restart.

use crate::controller::{Controller, ControllerConfig};
use crate::core::{Category, StateData, StateGraph, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 2;

/// Serializable snapshot of a controller's position in its graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Category name of the controller
    pub category: String,

    /// Name of the state that runs on the next tick
    pub current_state: String,

    /// Ticks run before the checkpoint was taken
    pub ticks: u64,

    /// State change history
    pub history: StateHistory,

    /// Configuration the controller ran with
    pub config: ControllerConfig,
}

impl Checkpoint {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    /// Encode in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from the compact binary format, rejecting unsupported versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(self)
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}

impl<C: Category> Controller<C> {
    /// Snapshot the controller's position in its graph.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            category: C::NAME.to_string(),
            current_state: self.current_state_name().to_string(),
            ticks: self.ticks(),
            history: self.history().clone(),
            config: self.config().clone(),
        }
    }

    /// Rebuild a controller from a checkpoint and the host's state data.
    ///
    /// The checkpoint must come from a controller of the same category, and
    /// its current state must exist (by name) in `graph`. The resumed
    /// controller runs with the checkpoint's configuration, and its history
    /// is rebuilt under that configuration's limit.
    pub fn resume(
        graph: Arc<StateGraph<C>>,
        checkpoint: &Checkpoint,
        data: StateData<C>,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.category != C::NAME {
            return Err(CheckpointError::CategoryMismatch {
                expected: C::NAME,
                found: checkpoint.category.clone(),
            });
        }
        let current =
            graph
                .find(&checkpoint.current_state)
                .ok_or_else(|| CheckpointError::UnknownState {
                    name: checkpoint.current_state.clone(),
                })?;

        tracing::debug!(
            category = C::NAME,
            state = checkpoint.current_state.as_str(),
            ticks = checkpoint.ticks,
            checkpoint = checkpoint.id.as_str(),
            "controller resumed"
        );

        let mut controller = Controller::new(graph, data);
        controller.restore(current, checkpoint.ticks, checkpoint.history.clone());
        Ok(controller.with_config(checkpoint.config.clone()))
    }
}
