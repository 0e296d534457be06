//! Property-based tests for state evaluation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use std::sync::Arc;
use stategraph::builder::{GraphBuilder, StateBuilder};
use stategraph::controller::{Controller, TickOutcome};
use stategraph::core::{Action, Decision, StateGraph, StateRef, Transition};
use stategraph::category;

#[derive(Clone, Debug, Default)]
pub struct Probe {
    flags: Vec<bool>,
    trace: Vec<usize>,
}

category! {
    pub Robot => Probe
}

fn flag(index: usize) -> Decision<Robot> {
    Decision::new(move |p: &Probe| p.flags.get(index).copied().unwrap_or(false))
}

prop_compose! {
    fn arbitrary_probe(len: usize)(flags in prop::collection::vec(any::<bool>(), len)) -> Probe {
        Probe { flags, trace: Vec::new() }
    }
}

/// A hub state with one transition per flag, each leading to its own
/// spoke state, plus the spokes themselves. Every spoke loops to itself.
fn hub_graph(
    flags: usize,
    actions: usize,
) -> (Arc<StateGraph<Robot>>, StateRef<Robot>, Vec<StateRef<Robot>>) {
    let mut builder = GraphBuilder::<Robot>::new();
    let hub = builder.declare("Hub");
    let spokes: Vec<_> = (0..flags)
        .map(|i| builder.declare(format!("Spoke{i}")))
        .collect();

    let mut contents = StateBuilder::<Robot>::new();
    for step in 0..actions {
        contents = contents.action(Action::new(move |p: &mut Probe| p.trace.push(step)));
    }
    for (i, spoke) in spokes.iter().enumerate() {
        contents = contents.when(flag(i), *spoke, hub);
    }
    builder.define(hub, contents);
    for spoke in &spokes {
        builder.define(
            *spoke,
            StateBuilder::new().transition(Transition::stay(Decision::always(true), *spoke)),
        );
    }
    builder.initial(hub);

    (Arc::new(builder.build().unwrap()), hub, spokes)
}

proptest! {
    #[test]
    fn resolve_follows_decision(probe in arbitrary_probe(1)) {
        let (graph, hub, spokes) = hub_graph(1, 0);
        let transition = &graph.get(hub).unwrap().transitions()[0];

        let expected = if probe.flags[0] { spokes[0] } else { hub };
        prop_assert_eq!(transition.resolve(&probe), expected);
    }

    #[test]
    fn actions_run_once_in_declared_order(count in 0usize..8, probe in arbitrary_probe(3)) {
        let (graph, _, _) = hub_graph(3, count);
        let mut controller = Controller::new(graph, probe);

        controller.tick();

        let expected: Vec<usize> = (0..count).collect();
        prop_assert_eq!(&controller.data().trace, &expected);
    }

    #[test]
    fn first_true_flag_selects_the_target(probe in arbitrary_probe(5)) {
        let (graph, hub, spokes) = hub_graph(5, 0);
        let mut controller = Controller::new(graph, probe.clone());

        let outcome = controller.tick();

        let expected = probe
            .flags
            .iter()
            .position(|f| *f)
            .map(|i| spokes[i])
            .unwrap_or(hub);
        prop_assert_eq!(outcome.state(), expected);
        prop_assert_eq!(controller.current_state(), expected);
    }

    #[test]
    fn self_loops_never_move(probe in arbitrary_probe(2), ticks in 1usize..10) {
        let (graph, _, spokes) = hub_graph(2, 0);
        let mut controller = Controller::starting_at(graph, spokes[1], probe).unwrap();

        for _ in 0..ticks {
            prop_assert_eq!(controller.tick(), TickOutcome::Remained(spokes[1]));
        }
        prop_assert!(controller.history().is_empty());
    }

    #[test]
    fn identical_data_gives_identical_selection(probe in arbitrary_probe(4)) {
        let (graph, _, _) = hub_graph(4, 2);
        let mut first = Controller::new(Arc::clone(&graph), probe.clone());
        let mut second = Controller::new(graph, probe);

        prop_assert_eq!(first.tick(), second.tick());
    }

    #[test]
    fn decisions_are_deterministic(probe in arbitrary_probe(3), index in 0usize..3) {
        let decision = flag(index);
        prop_assert_eq!(decision.evaluate(&probe), decision.evaluate(&probe));
    }

    #[test]
    fn history_respects_limit(limit in 0usize..4, flips in prop::collection::vec(any::<bool>(), 1..12)) {
        let (graph, hub, spokes) = hub_graph(1, 0);
        let config = stategraph::ControllerConfig {
            record_history: true,
            history_limit: Some(limit),
        };
        let mut controller = Controller::new(graph, Probe::default()).with_config(config);

        for flip in flips {
            let target = if flip { spokes[0] } else { hub };
            controller.set_state(target).unwrap();
        }
        prop_assert!(controller.history().len() <= limit);
    }
}
