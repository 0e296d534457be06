//! Data-driven graph definitions.
//!
//! Designers describe a graph as data: states by name, actions and
//! decisions by the names they are registered under, and transitions by
//! target state names. Code registers the actual actions and decisions of
//! a category in a [`Registry`], and [`GraphDefinition::assemble`] wires
//! the two together through the regular [`GraphBuilder`].
//!
//! A definition names its category as a string, since data carries no
//! types. Assembling it against a registry of a different category fails
//! with [`BuildError::CategoryMismatch`] before any state is built.
//!
//! # Example
//!
//! ```rust
//! use stategraph::definition::{GraphDefinition, Registry};
//! use stategraph::core::{Action, Decision};
//! use stategraph::category;
//!
//! pub struct Beacon {
//!     pub lit: bool,
//!     pub fuel: u32,
//! }
//!
//! category! {
//!     pub Lighthouse => Beacon
//! }
//!
//! let json = r#"{
//!     "category": "Lighthouse",
//!     "initial": "Dark",
//!     "states": [
//!         { "name": "Dark",
//!           "transitions": [ { "decision": "lit", "on_true": "Shining", "on_false": "Dark" } ] },
//!         { "name": "Shining",
//!           "actions": ["burn"],
//!           "transitions": [ { "decision": "lit", "on_true": "Shining", "on_false": "Dark" } ] }
//!     ]
//! }"#;
//!
//! let registry = Registry::<Lighthouse>::new()
//!     .decision("lit", Decision::new(|b: &Beacon| b.lit && b.fuel > 0))
//!     .action("burn", Action::new(|b: &mut Beacon| b.fuel -= 1));
//!
//! let graph = GraphDefinition::from_json(json)
//!     .unwrap()
//!     .assemble(&registry)
//!     .unwrap();
//!
//! assert_eq!(graph.name_of(graph.initial()), "Dark");
//! ```

use crate::builder::{BuildError, GraphBuilder, StateBuilder};
use crate::core::{Action, Category, Decision, StateGraph, StateRef, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named actions and decisions of one category.
pub struct Registry<C: Category> {
    actions: HashMap<String, Action<C>>,
    decisions: HashMap<String, Decision<C>>,
}

impl<C: Category> Registry<C> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            decisions: HashMap::new(),
        }
    }

    /// Register an action under `name`, replacing any previous one.
    pub fn action(mut self, name: impl Into<String>, action: Action<C>) -> Self {
        self.actions.insert(name.into(), action);
        self
    }

    /// Register a decision under `name`, replacing any previous one.
    pub fn decision(mut self, name: impl Into<String>, decision: Decision<C>) -> Self {
        self.decisions.insert(name.into(), decision);
        self
    }

    pub fn get_action(&self, name: &str) -> Option<&Action<C>> {
        self.actions.get(name)
    }

    pub fn get_decision(&self, name: &str) -> Option<&Decision<C>> {
        self.decisions.get(name)
    }
}

impl<C: Category> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable description of a state graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDefinition {
    /// Name of the category this graph is for
    pub category: String,

    /// Name of the initial state
    pub initial: String,

    /// States in declaration order
    pub states: Vec<StateDefinition>,
}

/// Serializable description of one state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,

    /// Registered action names, in the order they run
    #[serde(default)]
    pub actions: Vec<String>,

    /// Transitions, in the order they are evaluated
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,
}

/// Serializable description of one transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    /// Registered decision name
    pub decision: String,

    /// State selected when the decision holds
    pub on_true: String,

    /// State selected when it does not
    pub on_false: String,
}

impl GraphDefinition {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::InvalidDefinition(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        serde_json::to_string_pretty(self).map_err(|e| BuildError::InvalidDefinition(e.to_string()))
    }

    /// Build a graph, resolving names through `registry`.
    ///
    /// Fails if the definition is for another category. Otherwise every
    /// unknown action, decision or state name is reported together with
    /// the problems [`GraphBuilder::build`] finds.
    pub fn assemble<C: Category>(&self, registry: &Registry<C>) -> Result<StateGraph<C>, BuildError> {
        if self.category != C::NAME {
            return Err(BuildError::CategoryMismatch {
                expected: C::NAME,
                found: self.category.clone(),
            });
        }

        let mut builder = GraphBuilder::<C>::new();
        let mut refs: HashMap<&str, StateRef<C>> = HashMap::new();
        let handles: Vec<StateRef<C>> = self
            .states
            .iter()
            .map(|state| {
                let handle = builder.declare(state.name.as_str());
                refs.entry(state.name.as_str()).or_insert(handle);
                handle
            })
            .collect();

        let mut problems = Vec::new();
        let lookup = |name: &str, context: String, problems: &mut Vec<BuildError>| {
            let found = refs.get(name).copied();
            if found.is_none() {
                problems.push(BuildError::UnknownState {
                    name: name.to_string(),
                    context,
                });
            }
            found
        };

        if let Some(initial) = lookup(&self.initial, "initial state".to_string(), &mut problems) {
            builder.initial(initial);
        }

        for (state, handle) in self.states.iter().zip(handles) {
            let mut contents = StateBuilder::new();

            for name in &state.actions {
                match registry.get_action(name) {
                    Some(action) => contents = contents.action(action.clone()),
                    None => problems.push(BuildError::UnknownAction {
                        name: name.clone(),
                        state: state.name.clone(),
                    }),
                }
            }

            for (position, transition) in state.transitions.iter().enumerate() {
                let context = format!("transition {position} of state '{}'", state.name);
                let decision = registry.get_decision(&transition.decision);
                if decision.is_none() {
                    problems.push(BuildError::UnknownDecision {
                        name: transition.decision.clone(),
                        state: state.name.clone(),
                    });
                }
                let on_true = lookup(&transition.on_true, context.clone(), &mut problems);
                let on_false = lookup(&transition.on_false, context, &mut problems);

                if let (Some(decision), Some(on_true), Some(on_false)) = (decision, on_true, on_false)
                {
                    contents =
                        contents.transition(Transition::new(decision.clone(), on_true, on_false));
                }
            }

            builder.define(handle, contents);
        }

        match builder.build() {
            Ok(graph) if problems.is_empty() => Ok(graph),
            Ok(_) => Err(BuildError::from_all(problems)),
            Err(error) => {
                problems.extend(error.problems().into_iter().cloned());
                Err(BuildError::from_all(problems))
            }
        }
    }
}
