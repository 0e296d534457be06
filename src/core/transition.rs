//! Transitions: a decision with a target state for each outcome.

use super::category::{Category, StateData};
use super::decision::Decision;
use super::graph::StateRef;

/// A decision bound to a true-branch and a false-branch target.
///
/// Targets are non-owning [`StateRef`] handles, so transitions can point
/// anywhere in the graph, including back at the state that owns them.
#[derive(Debug)]
pub struct Transition<C: Category> {
    pub decision: Decision<C>,
    pub on_true: StateRef<C>,
    pub on_false: StateRef<C>,
}

impl<C: Category> Transition<C> {
    /// Create a transition from a decision and its two targets.
    pub fn new(decision: Decision<C>, on_true: StateRef<C>, on_false: StateRef<C>) -> Self {
        Self {
            decision,
            on_true,
            on_false,
        }
    }

    /// Transition whose both branches lead back to `owner`.
    ///
    /// Useful for states that should hold regardless of the decision, while
    /// still exercising it every cycle.
    pub fn stay(decision: Decision<C>, owner: StateRef<C>) -> Self {
        Self::new(decision, owner, owner)
    }

    /// Evaluate the decision once and return the selected target (pure).
    pub fn resolve(&self, data: &StateData<C>) -> StateRef<C> {
        if self.decision.evaluate(data) {
            self.on_true
        } else {
            self.on_false
        }
    }

    /// Check whether every branch leads back to `owner`.
    pub fn is_self_loop(&self, owner: StateRef<C>) -> bool {
        self.on_true == owner && self.on_false == owner
    }
}

impl<C: Category> Clone for Transition<C> {
    fn clone(&self) -> Self {
        Self {
            decision: self.decision.clone(),
            on_true: self.on_true,
            on_false: self.on_false,
        }
    }
}
