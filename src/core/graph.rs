//! State graphs and the handles that address their states.
//!
//! States live in an arena owned by a [`StateGraph`]. Transitions and
//! controllers refer to them through [`StateRef`] handles instead of owning
//! pointers, which keeps cyclic graphs (including self-loops) trivial to
//! represent and lets many controllers share one graph.

use super::category::Category;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Identity of one assembled graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct GraphId(Uuid);

impl GraphId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-owning handle to a state in a particular graph.
///
/// A handle carries its category in its type, so a `StateRef<Enemy>` can
/// never be used where a `StateRef<Player>` is expected. It also remembers
/// which graph issued it; handing it to another graph of the same category
/// is rejected when the graph is built or when a controller is pointed at
/// it.
pub struct StateRef<C: Category> {
    graph: GraphId,
    index: usize,
    _category: PhantomData<fn() -> C>,
}

impl<C: Category> StateRef<C> {
    pub(crate) fn new(graph: GraphId, index: usize) -> Self {
        Self {
            graph,
            index,
            _category: PhantomData,
        }
    }

    /// Graph that issued this handle.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Position of the state in its graph's arena.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<C: Category> Clone for StateRef<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Category> Copy for StateRef<C> {}

impl<C: Category> PartialEq for StateRef<C> {
    fn eq(&self, other: &Self) -> bool {
        self.graph == other.graph && self.index == other.index
    }
}

impl<C: Category> Eq for StateRef<C> {}

impl<C: Category> Hash for StateRef<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.graph.hash(state);
        self.index.hash(state);
    }
}

impl<C: Category> fmt::Debug for StateRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateRef<{}>(#{})", C::NAME, self.index)
    }
}

/// An immutable, validated graph of states for one category.
///
/// Graphs are produced by [`GraphBuilder::build`](crate::builder::GraphBuilder::build)
/// or [`GraphDefinition::assemble`](crate::definition::GraphDefinition::assemble).
/// Every transition target is known to belong to the graph, so lookups by a
/// handle the graph issued never fail.
pub struct StateGraph<C: Category> {
    pub(crate) id: GraphId,
    pub(crate) states: Vec<State<C>>,
    pub(crate) initial: StateRef<C>,
}

impl<C: Category> StateGraph<C> {
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// State a fresh controller starts in.
    pub fn initial(&self) -> StateRef<C> {
        self.initial
    }

    /// Check whether `state` was issued by this graph.
    pub fn contains(&self, state: StateRef<C>) -> bool {
        state.graph == self.id && state.index < self.states.len()
    }

    /// Look up a state by handle.
    pub fn get(&self, state: StateRef<C>) -> Option<&State<C>> {
        if state.graph != self.id {
            return None;
        }
        self.states.get(state.index)
    }

    /// Look up a state by name.
    pub fn find(&self, name: &str) -> Option<StateRef<C>> {
        self.states.iter().find(|s| s.name == name).map(|s| s.id)
    }

    /// Name of a state, or `"?"` for a handle from another graph.
    pub fn name_of(&self, state: StateRef<C>) -> &str {
        self.get(state).map(State::name).unwrap_or("?")
    }

    /// All states in declaration order.
    pub fn states(&self) -> &[State<C>] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States that cannot be reached from the initial state.
    ///
    /// Orphan states are legal, but usually point at a wiring mistake.
    pub fn unreachable_states(&self) -> Vec<StateRef<C>> {
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::from([self.initial]);
        seen[self.initial.index] = true;

        while let Some(current) = queue.pop_front() {
            for transition in &self.states[current.index].transitions {
                for target in [transition.on_true, transition.on_false] {
                    if !seen[target.index] {
                        seen[target.index] = true;
                        queue.push_back(target);
                    }
                }
            }
        }

        self.states
            .iter()
            .filter(|s| !seen[s.id.index])
            .map(|s| s.id)
            .collect()
    }
}

impl<C: Category> fmt::Debug for StateGraph<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateGraph")
            .field("id", &self.id)
            .field("category", &C::NAME)
            .field("initial", &self.name_of(self.initial))
            .field("states", &self.states)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Slime;

    enum Ooze {}

    impl Category for Ooze {
        type Data = Slime;
        const NAME: &'static str = "Ooze";
    }

    #[test]
    fn refs_compare_by_graph_and_index() {
        let a = GraphId::new();
        let b = GraphId::new();

        assert_eq!(StateRef::<Ooze>::new(a, 0), StateRef::new(a, 0));
        assert_ne!(StateRef::<Ooze>::new(a, 0), StateRef::new(a, 1));
        assert_ne!(StateRef::<Ooze>::new(a, 0), StateRef::new(b, 0));
    }

    #[test]
    fn refs_hash_consistently() {
        let graph = GraphId::new();
        let set: HashSet<StateRef<Ooze>> = [
            StateRef::new(graph, 0),
            StateRef::new(graph, 0),
            StateRef::new(graph, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn debug_includes_category() {
        let state = StateRef::<Ooze>::new(GraphId::new(), 4);
        assert_eq!(format!("{state:?}"), "StateRef<Ooze>(#4)");
    }

    #[test]
    fn graph_ids_are_unique() {
        assert_ne!(GraphId::new(), GraphId::new());
    }
}
