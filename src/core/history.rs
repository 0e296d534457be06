//! State change history tracking.
//!
//! Controllers record every change of their current state. The record is
//! keyed by state names rather than handles so it survives serialization
//! into checkpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single change of the current state.
///
/// # Example
///
/// ```rust
/// use stategraph::core::StateChange;
/// use chrono::Utc;
///
/// let change = StateChange {
///     from: "Idle".to_string(),
///     to: "Chase".to_string(),
///     tick: 3,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(change.tick, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    /// The state being left
    pub from: String,
    /// The state being entered
    pub to: String,
    /// The controller tick on which the change was decided
    pub tick: u64,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded history of state changes.
///
/// When a limit is set, recording past it drops the oldest entries.
///
/// # Example
///
/// ```rust
/// use stategraph::core::{StateChange, StateHistory};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
///
/// history.record(StateChange {
///     from: "Idle".to_string(),
///     to: "Chase".to_string(),
///     tick: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(StateChange {
///     from: "Chase".to_string(),
///     to: "Attack".to_string(),
///     tick: 4,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["Idle", "Chase", "Attack"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    changes: VecDeque<StateChange>,
    limit: Option<usize>,
}

impl StateHistory {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` changes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a change, evicting the oldest entries beyond the limit.
    pub fn record(&mut self, change: StateChange) {
        self.changes.push_back(change);
        if let Some(limit) = self.limit {
            while self.changes.len() > limit {
                self.changes.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest retained change followed by the
    /// `to` of every change.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.changes.iter().map(|c| c.to.as_str()));
        path
    }

    /// Wall-clock time between the oldest and newest retained change.
    ///
    /// Returns `None` if there are no changes.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained changes, oldest first.
    pub fn changes(&self) -> impl Iterator<Item = &StateChange> {
        self.changes.iter()
    }

    /// Most recent change, if any.
    pub fn last(&self) -> Option<&StateChange> {
        self.changes.back()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: &str, to: &str, tick: u64) -> StateChange {
        StateChange {
            from: from.to_string(),
            to: to.to_string(),
            tick,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(change("Idle", "Chase", 1));
        history.record(change("Chase", "Attack", 2));

        assert_eq!(history.get_path(), vec!["Idle", "Chase", "Attack"]);
        assert_eq!(history.last().map(|c| c.tick), Some(2));
    }

    #[test]
    fn limit_drops_oldest_changes() {
        let mut history = StateHistory::with_limit(2);
        history.record(change("A", "B", 1));
        history.record(change("B", "C", 2));
        history.record(change("C", "D", 3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["B", "C", "D"]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record(change("A", "B", 1));

        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        let start = Utc::now();
        history.record(StateChange {
            timestamp: start,
            ..change("A", "B", 1)
        });
        history.record(StateChange {
            timestamp: start + chrono::Duration::milliseconds(250),
            ..change("B", "C", 2)
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_change_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(change("A", "B", 1));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(8);
        history.record(change("Idle", "Chase", 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
