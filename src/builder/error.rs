//! Errors raised while assembling state graphs.

use thiserror::Error;

/// Errors that can occur when assembling a state graph.
///
/// Graph validation collects every problem it finds; when there is more
/// than one they are reported together as [`BuildError::Many`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("State '{name}' is declared but never defined")]
    UndefinedState { name: String },

    #[error("State '{name}' is defined more than once")]
    StateRedefined { name: String },

    #[error("State handle #{index} used by {context} belongs to another graph")]
    ForeignState { index: usize, context: String },

    #[error("Definition is for category '{found}', expected '{expected}'")]
    CategoryMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Unknown state '{name}' referenced by {context}")]
    UnknownState { name: String, context: String },

    #[error("Unknown action '{name}' referenced by state '{state}'")]
    UnknownAction { name: String, state: String },

    #[error("Unknown decision '{name}' referenced by state '{state}'")]
    UnknownDecision { name: String, state: String },

    #[error("Invalid graph definition: {0}")]
    InvalidDefinition(String),

    #[error("{} problems found: {}", .errors.len(), summarize(.errors))]
    Many { errors: Vec<BuildError> },
}

impl BuildError {
    /// Collapse a list of problems into a single error.
    pub(crate) fn from_all(mut errors: Vec<BuildError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            BuildError::Many { errors }
        }
    }

    /// Every individual problem carried by this error.
    pub fn problems(&self) -> Vec<&BuildError> {
        match self {
            BuildError::Many { errors } => errors.iter().flat_map(|e| e.problems()).collect(),
            other => vec![other],
        }
    }
}

fn summarize(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
