//! Per-entity driver of a state graph.
//!
//! A [`Controller`] pairs one entity's state data with a pointer into a
//! shared [`StateGraph`]. The host calls [`Controller::tick`] once per
//! cycle; nothing in this module schedules, blocks or suspends.

mod config;
mod error;

pub use config::ControllerConfig;
pub use error::ControllerError;

use crate::core::{Category, StateChange, StateData, StateGraph, StateHistory, StateRef};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// Result of a single tick.
pub enum TickOutcome<C: Category> {
    /// The current state stays active for the next cycle.
    Remained(StateRef<C>),

    /// The current state changed; `to` runs on the next cycle.
    Transitioned { from: StateRef<C>, to: StateRef<C> },
}

impl<C: Category> TickOutcome<C> {
    /// State that will run on the next cycle.
    pub fn state(&self) -> StateRef<C> {
        match self {
            Self::Remained(state) => *state,
            Self::Transitioned { to, .. } => *to,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

impl<C: Category> Clone for TickOutcome<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Category> Copy for TickOutcome<C> {}

impl<C: Category> PartialEq for TickOutcome<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Remained(a), Self::Remained(b)) => a == b,
            (
                Self::Transitioned { from: a, to: b },
                Self::Transitioned { from: c, to: d },
            ) => a == c && b == d,
            _ => false,
        }
    }
}

impl<C: Category> Eq for TickOutcome<C> {}

impl<C: Category> fmt::Debug for TickOutcome<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remained(state) => f.debug_tuple("Remained").field(state).finish(),
            Self::Transitioned { from, to } => f
                .debug_struct("Transitioned")
                .field("from", from)
                .field("to", to)
                .finish(),
        }
    }
}

/// Drives one entity through a state graph.
///
/// The controller owns its state data outright, so two controllers can
/// never race on the same payload. The graph is shared: any number of
/// controllers of one category can run the same `Arc<StateGraph<C>>`, and
/// since a controller is `Send` whenever its data is, hosts may tick
/// different controllers on different threads.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use stategraph::builder::{GraphBuilder, StateBuilder};
/// use stategraph::controller::{Controller, TickOutcome};
/// use stategraph::core::Decision;
/// use stategraph::category;
///
/// pub struct Door {
///     pub pushed: bool,
/// }
///
/// category! {
///     pub Mechanism => Door
/// }
///
/// let pushed = Decision::<Mechanism>::new(|d| d.pushed);
///
/// let mut builder = GraphBuilder::<Mechanism>::new();
/// let closed = builder.declare("Closed");
/// let open = builder.declare("Open");
/// builder
///     .define(closed, StateBuilder::new().when(pushed.clone(), open, closed))
///     .define(open, StateBuilder::new().when(pushed, open, closed))
///     .initial(closed);
/// let graph = Arc::new(builder.build().unwrap());
///
/// let mut door = Controller::new(graph, Door { pushed: false });
/// assert_eq!(door.tick(), TickOutcome::Remained(closed));
///
/// door.data_mut().pushed = true;
/// assert!(door.tick().is_transition());
/// assert_eq!(door.current_state_name(), "Open");
/// ```
pub struct Controller<C: Category> {
    graph: Arc<StateGraph<C>>,
    current: StateRef<C>,
    data: StateData<C>,
    ticks: u64,
    history: StateHistory,
    config: ControllerConfig,
}

impl<C: Category> Controller<C> {
    /// Create a controller in the graph's initial state.
    pub fn new(graph: Arc<StateGraph<C>>, data: StateData<C>) -> Self {
        let current = graph.initial();
        let config = ControllerConfig::default();
        Self {
            graph,
            current,
            data,
            ticks: 0,
            history: history_for(&config),
            config,
        }
    }

    /// Create a controller in a chosen state.
    ///
    /// Fails if `initial` was not issued by `graph`.
    pub fn starting_at(
        graph: Arc<StateGraph<C>>,
        initial: StateRef<C>,
        data: StateData<C>,
    ) -> Result<Self, ControllerError> {
        ensure_member(&graph, initial)?;
        let mut controller = Self::new(graph, data);
        controller.current = initial;
        Ok(controller)
    }

    /// Apply a configuration, trimming existing history to its limit.
    ///
    /// With `record_history: false` the existing history is discarded, not
    /// just frozen.
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        let mut history = history_for(&config);
        if config.record_history {
            for change in self.history.changes() {
                history.record(change.clone());
            }
        }
        self.history = history;
        self.config = config;
        self
    }

    /// Run one cycle.
    ///
    /// The current state's actions all run, then its transitions pick the
    /// state for the next cycle. A change is recorded in history and
    /// becomes visible through [`current_state`](Self::current_state) once
    /// this returns.
    pub fn tick(&mut self) -> TickOutcome<C> {
        let from = self.current;
        let state = &self.graph.states[from.index()];

        tracing::trace!(
            category = C::NAME,
            state = state.name(),
            tick = self.ticks,
            "tick"
        );

        let to = state.tick(&mut self.data);
        let outcome = if to == from {
            TickOutcome::Remained(from)
        } else {
            self.change_to(to);
            TickOutcome::Transitioned { from, to }
        };

        self.ticks += 1;
        outcome
    }

    /// Replace the current state from outside the graph.
    ///
    /// Takes effect on the next tick. Fails if `state` was not issued by
    /// this controller's graph.
    pub fn set_state(&mut self, state: StateRef<C>) -> Result<(), ControllerError> {
        ensure_member(&self.graph, state)?;
        if state != self.current {
            self.change_to(state);
        }
        Ok(())
    }

    /// State that runs on the next tick.
    pub fn current_state(&self) -> StateRef<C> {
        self.current
    }

    pub fn current_state_name(&self) -> &str {
        self.graph.name_of(self.current)
    }

    pub fn data(&self) -> &StateData<C> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut StateData<C> {
        &mut self.data
    }

    /// Give back the state data, consuming the controller.
    pub fn into_data(self) -> StateData<C> {
        self.data
    }

    pub fn graph(&self) -> &Arc<StateGraph<C>> {
        &self.graph
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn change_to(&mut self, to: StateRef<C>) {
        let from = self.current;
        let (from_name, to_name) = (self.graph.name_of(from), self.graph.name_of(to));

        tracing::debug!(
            category = C::NAME,
            from = from_name,
            to = to_name,
            tick = self.ticks,
            "state changed"
        );

        if self.config.record_history {
            self.history.record(StateChange {
                from: from_name.to_string(),
                to: to_name.to_string(),
                tick: self.ticks,
                timestamp: Utc::now(),
            });
        }
        self.current = to;
    }

    pub(crate) fn restore(&mut self, current: StateRef<C>, ticks: u64, history: StateHistory) {
        self.current = current;
        self.ticks = ticks;
        self.history = history;
    }
}

impl<C: Category> fmt::Debug for Controller<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("category", &C::NAME)
            .field("graph", &self.graph.id())
            .field("current", &self.current_state_name())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

fn history_for(config: &ControllerConfig) -> StateHistory {
    match config.history_limit {
        Some(limit) => StateHistory::with_limit(limit),
        None => StateHistory::new(),
    }
}

fn ensure_member<C: Category>(
    graph: &StateGraph<C>,
    state: StateRef<C>,
) -> Result<(), ControllerError> {
    if graph.contains(state) {
        Ok(())
    } else {
        Err(ControllerError::ForeignState {
            index: state.index(),
            graph: graph.id(),
        })
    }
}
