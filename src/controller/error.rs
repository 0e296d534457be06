//! Controller error types.

use crate::core::GraphId;
use thiserror::Error;

/// Errors that can occur when pointing a controller at a state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControllerError {
    /// The handle was issued by a different graph than the controller runs.
    #[error("State #{index} does not belong to graph {graph}")]
    ForeignState { index: usize, graph: GraphId },
}
