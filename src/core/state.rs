//! States: immutable bundles of actions and transitions.

use super::action::Action;
use super::category::{Category, StateData};
use super::graph::StateRef;
use super::transition::Transition;
use std::fmt;

/// One node of a state graph.
///
/// A state is assembled once by the [`GraphBuilder`](crate::builder::GraphBuilder)
/// and never changes afterwards. Each cycle it runs all of its actions and
/// then picks the next state from its transitions.
pub struct State<C: Category> {
    pub(crate) id: StateRef<C>,
    pub(crate) name: String,
    pub(crate) actions: Vec<Action<C>>,
    pub(crate) transitions: Vec<Transition<C>>,
}

impl<C: Category> State<C> {
    /// Handle of this state within its graph.
    pub fn id(&self) -> StateRef<C> {
        self.id
    }

    /// Name used for display and logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actions in the order they run.
    pub fn actions(&self) -> &[Action<C>] {
        &self.actions
    }

    /// Transitions in the order they are evaluated.
    pub fn transitions(&self) -> &[Transition<C>] {
        &self.transitions
    }

    /// Run one cycle of this state and return the state for the next cycle.
    ///
    /// Every action runs, in order, before any transition is looked at;
    /// there is no preemption mid-cycle. Transitions then form an
    /// if/else-if chain: the first one whose decision holds selects its
    /// true-branch target. The last transition is resolved in full, so its
    /// false-branch target is the default. A state without transitions
    /// stays where it is.
    pub fn tick(&self, data: &mut StateData<C>) -> StateRef<C> {
        for action in &self.actions {
            action.perform(data);
        }

        let data: &StateData<C> = data;
        let Some((last, rest)) = self.transitions.split_last() else {
            return self.id;
        };

        rest.iter()
            .find(|t| t.decision.evaluate(data))
            .map(|t| t.on_true)
            .unwrap_or_else(|| last.resolve(data))
    }
}

impl<C: Category> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::GraphId;
    use crate::core::Decision;

    #[derive(Default)]
    struct Golem {
        trace: Vec<&'static str>,
        alarm: bool,
        hurt: bool,
    }

    enum Construct {}

    impl Category for Construct {
        type Data = Golem;
        const NAME: &'static str = "Construct";
    }

    struct Refs {
        guard: StateRef<Construct>,
        alert: StateRef<Construct>,
        retreat: StateRef<Construct>,
    }

    fn refs() -> Refs {
        let graph = GraphId::new();
        Refs {
            guard: StateRef::new(graph, 0),
            alert: StateRef::new(graph, 1),
            retreat: StateRef::new(graph, 2),
        }
    }

    fn log(step: &'static str) -> Action<Construct> {
        Action::new(move |g: &mut Golem| g.trace.push(step))
    }

    fn state(
        id: StateRef<Construct>,
        actions: Vec<Action<Construct>>,
        transitions: Vec<Transition<Construct>>,
    ) -> State<Construct> {
        State {
            id,
            name: "Guard".to_string(),
            actions,
            transitions,
        }
    }

    #[test]
    fn actions_run_in_order_before_transitions() {
        let r = refs();
        let probe = Decision::<Construct>::new(|g| g.trace.len() == 3);
        let guard = state(
            r.guard,
            vec![log("a"), log("b"), log("c")],
            vec![Transition::new(probe, r.alert, r.guard)],
        );

        let mut golem = Golem::default();
        let next = guard.tick(&mut golem);

        assert_eq!(golem.trace, vec!["a", "b", "c"]);
        assert_eq!(next, r.alert);
    }

    #[test]
    fn no_transitions_means_stay() {
        let r = refs();
        let guard = state(r.guard, vec![log("idle")], vec![]);

        assert_eq!(guard.tick(&mut Golem::default()), r.guard);
    }

    #[test]
    fn first_true_decision_wins() {
        let r = refs();
        let alarm = Decision::<Construct>::new(|g| g.alarm);
        let hurt = Decision::<Construct>::new(|g| g.hurt);
        let guard = state(
            r.guard,
            vec![],
            vec![
                Transition::new(hurt, r.retreat, r.guard),
                Transition::new(alarm, r.alert, r.guard),
            ],
        );

        let mut both = Golem {
            alarm: true,
            hurt: true,
            ..Golem::default()
        };
        assert_eq!(guard.tick(&mut both), r.retreat);

        let mut alarmed = Golem {
            alarm: true,
            ..Golem::default()
        };
        assert_eq!(guard.tick(&mut alarmed), r.alert);
    }

    #[test]
    fn last_false_branch_is_the_default() {
        let r = refs();
        let guard = state(
            r.guard,
            vec![],
            vec![
                Transition::new(Decision::always(false), r.alert, r.retreat),
                Transition::new(Decision::always(false), r.alert, r.retreat),
            ],
        );

        assert_eq!(guard.tick(&mut Golem::default()), r.retreat);
    }

    #[test]
    fn earlier_false_branches_are_not_taken() {
        let r = refs();
        let guard = state(
            r.guard,
            vec![],
            vec![
                Transition::new(Decision::always(false), r.alert, r.retreat),
                Transition::new(Decision::always(false), r.alert, r.guard),
            ],
        );

        assert_eq!(guard.tick(&mut Golem::default()), r.guard);
    }
}
