//! Controller configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`Controller`](super::Controller).
///
/// Deserializes from partial input; missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use stategraph::controller::ControllerConfig;
///
/// let config: ControllerConfig = serde_json::from_str(r#"{ "history_limit": 8 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Record state changes into the controller's history.
    pub record_history: bool,

    /// Keep at most this many state changes. `None` keeps all of them.
    pub history_limit: Option<usize>,
}

impl ControllerConfig {
    pub const DEFAULT_HISTORY_LIMIT: usize = 64;
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: Some(Self::DEFAULT_HISTORY_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        let config: ControllerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn unbounded_history_is_expressible() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{ "record_history": true, "history_limit": null }"#).unwrap();
        assert_eq!(config.history_limit, None);
    }
}
