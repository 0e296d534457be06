//! Builder for the contents of a single state.

use crate::core::{Action, Category, Decision, StateRef, Transition};

/// Ordered actions and transitions for one state, before the graph is built.
///
/// The category parameter ties every action, decision and target to the
/// graph the state will be defined in.
pub struct StateBuilder<C: Category> {
    pub(crate) actions: Vec<Action<C>>,
    pub(crate) transitions: Vec<Transition<C>>,
}

impl<C: Category> StateBuilder<C> {
    /// Create an empty state: no actions, no transitions.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Append an action. Actions run in the order they are added.
    pub fn action(mut self, action: Action<C>) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a closure as an action.
    pub fn act<F>(self, run: F) -> Self
    where
        F: Fn(&mut C::Data) + Send + Sync + 'static,
    {
        self.action(Action::new(run))
    }

    /// Append a pre-built transition. Transitions are evaluated in the
    /// order they are added.
    pub fn transition(mut self, transition: Transition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Append a transition from a decision and its two targets.
    ///
    /// The decision must belong to the same category as the state; a
    /// decision over another category's data does not compile:
    ///
    /// ```compile_fail,E0308
    /// use stategraph::builder::{GraphBuilder, StateBuilder};
    /// use stategraph::core::Decision;
    /// use stategraph::category;
    ///
    /// pub struct EnemyData {
    ///     pub sees_player: bool,
    /// }
    /// pub struct PlayerData;
    ///
    /// category! {
    ///     pub Enemy => EnemyData;
    ///     pub Player => PlayerData;
    /// }
    ///
    /// let sees_player = Decision::<Enemy>::new(|e| e.sees_player);
    ///
    /// let mut builder = GraphBuilder::<Player>::new();
    /// let idle = builder.declare("Idle");
    /// let hunted = builder.declare("Hunted");
    /// builder.define(
    ///     idle,
    ///     StateBuilder::<Player>::new().when(sees_player, hunted, idle),
    /// );
    /// ```
    pub fn when(self, decision: Decision<C>, on_true: StateRef<C>, on_false: StateRef<C>) -> Self {
        self.transition(Transition::new(decision, on_true, on_false))
    }
}

impl<C: Category> Default for StateBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
