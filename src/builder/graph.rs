//! Builder for assembling and validating state graphs.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::{Category, GraphId, State, StateGraph, StateRef};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<BuildError>>;

/// Builder for constructing state graphs.
///
/// States are first declared, which hands out a [`StateRef`] immediately,
/// and defined later. This lets transitions point at states that are not
/// defined yet, at each other, or back at their own state.
///
/// `build` validates the whole graph in one pass and reports every problem
/// it finds, not just the first.
///
/// # Example
///
/// ```rust
/// use stategraph::builder::{GraphBuilder, StateBuilder};
/// use stategraph::core::Decision;
/// use stategraph::category;
///
/// pub struct Lamp {
///     pub switched_on: bool,
///     pub hours: u32,
/// }
///
/// category! {
///     pub Fixture => Lamp
/// }
///
/// let switched_on = Decision::<Fixture>::new(|l| l.switched_on);
///
/// let mut builder = GraphBuilder::<Fixture>::new();
/// let off = builder.declare("Off");
/// let on = builder.declare("On");
///
/// builder
///     .define(off, StateBuilder::new().when(switched_on.clone(), on, off))
///     .define(
///         on,
///         StateBuilder::<Fixture>::new()
///             .act(|l: &mut Lamp| l.hours += 1)
///             .when(switched_on, on, off),
///     )
///     .initial(off);
///
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.find("On"), Some(on));
/// ```
pub struct GraphBuilder<C: Category> {
    id: GraphId,
    names: Vec<String>,
    definitions: Vec<Option<StateBuilder<C>>>,
    initial: Option<StateRef<C>>,
    problems: Vec<BuildError>,
}

impl<C: Category> GraphBuilder<C> {
    /// Create a new builder for a fresh graph.
    pub fn new() -> Self {
        Self {
            id: GraphId::new(),
            names: Vec::new(),
            definitions: Vec::new(),
            initial: None,
            problems: Vec::new(),
        }
    }

    /// Identity of the graph this builder will produce.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Reserve a state and get its handle.
    ///
    /// Names must be unique within a graph; duplicates are reported by
    /// [`build`](Self::build).
    pub fn declare(&mut self, name: impl Into<String>) -> StateRef<C> {
        let state = StateRef::new(self.id, self.names.len());
        self.names.push(name.into());
        self.definitions.push(None);
        state
    }

    /// Look up a declared state by name.
    pub fn find(&self, name: &str) -> Option<StateRef<C>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| StateRef::new(self.id, index))
    }

    /// Attach the actions and transitions of a declared state.
    pub fn define(&mut self, state: StateRef<C>, contents: StateBuilder<C>) -> &mut Self {
        if !self.owns(state) {
            self.problems.push(BuildError::ForeignState {
                index: state.index(),
                context: "define".to_string(),
            });
            return self;
        }

        let slot = &mut self.definitions[state.index()];
        if slot.is_some() {
            self.problems.push(BuildError::StateRedefined {
                name: self.names[state.index()].clone(),
            });
        } else {
            *slot = Some(contents);
        }
        self
    }

    /// Set the initial state (required).
    pub fn initial(&mut self, state: StateRef<C>) -> &mut Self {
        self.initial = Some(state);
        self
    }

    /// Validate and build the graph.
    ///
    /// Fails if the initial state is missing, if any name is declared twice,
    /// if any declared state is left undefined or defined twice, or if any
    /// handle came from a different builder.
    pub fn build(self) -> Result<StateGraph<C>, BuildError> {
        let checks = self.validate();
        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            let error = BuildError::from_all(errors.iter().cloned().collect());
            tracing::debug!(category = C::NAME, %error, "state graph rejected");
            return Err(error);
        }

        let Self {
            id,
            names,
            definitions,
            initial,
            ..
        } = self;

        let states = names
            .into_iter()
            .zip(definitions)
            .enumerate()
            .filter_map(|(index, (name, contents))| {
                contents.map(|contents| State {
                    id: StateRef::new(id, index),
                    name,
                    actions: contents.actions,
                    transitions: contents.transitions,
                })
            })
            .collect();

        let graph = StateGraph {
            id,
            states,
            initial: initial.ok_or(BuildError::MissingInitialState)?,
        };

        report_dead_branches(&graph);
        for orphan in graph.unreachable_states() {
            tracing::debug!(
                category = C::NAME,
                state = graph.name_of(orphan),
                "state is unreachable from the initial state"
            );
        }
        tracing::debug!(
            category = C::NAME,
            graph = %graph.id(),
            states = graph.len(),
            "state graph built"
        );

        Ok(graph)
    }

    fn owns(&self, state: StateRef<C>) -> bool {
        state.graph() == self.id && state.index() < self.names.len()
    }

    fn validate(&self) -> Vec<Check> {
        let mut checks: Vec<Check> = self
            .problems
            .iter()
            .cloned()
            .map(Validation::fail)
            .collect();

        // Initial state
        checks.push(match self.initial {
            None => Validation::fail(BuildError::MissingInitialState),
            Some(state) => self.owned(state, "initial state"),
        });

        // Unique names
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for name in &self.names {
            let count = seen.entry(name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                checks.push(Validation::fail(BuildError::DuplicateState {
                    name: name.clone(),
                }));
            }
        }

        // Every declared state is defined and only targets this graph
        for (name, contents) in self.names.iter().zip(&self.definitions) {
            let Some(contents) = contents else {
                checks.push(Validation::fail(BuildError::UndefinedState {
                    name: name.clone(),
                }));
                continue;
            };
            for (position, transition) in contents.transitions.iter().enumerate() {
                for target in [transition.on_true, transition.on_false] {
                    let context = format!("transition {position} of state '{name}'");
                    checks.push(self.owned(target, &context));
                }
            }
        }

        checks
    }

    fn owned(&self, state: StateRef<C>, context: &str) -> Check {
        if self.owns(state) {
            Validation::success(())
        } else {
            Validation::fail(BuildError::ForeignState {
                index: state.index(),
                context: context.to_string(),
            })
        }
    }
}

impl<C: Category> Default for GraphBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Warn about false-branch targets that the if/else-if evaluation of a
/// state can never select.
fn report_dead_branches<C: Category>(graph: &StateGraph<C>) {
    for state in graph.states() {
        let Some((_, rest)) = state.transitions().split_last() else {
            continue;
        };
        for (position, transition) in rest.iter().enumerate() {
            if transition.on_false != state.id() {
                tracing::warn!(
                    category = C::NAME,
                    state = state.name(),
                    transition = position,
                    ignored = graph.name_of(transition.on_false),
                    "false branch of a non-final transition is never taken"
                );
            }
        }
    }
}
