//! Stategraph: a category-typed finite state machine engine
//!
//! Stategraph keeps three concerns apart: the state graph (states, their
//! actions and transitions), the per-entity data those states work on, and
//! the loop that ticks the current state once per cycle. One generic engine
//! serves every kind of entity, while the type system keeps the pieces of
//! one kind from being wired into another.
//!
//! # Core Concepts
//!
//! - **Category**: compile-time tag for an entity kind, bound to its state data
//! - **Decision**: pure predicate over the state data
//! - **Action**: operation run on the state data while a state is active
//! - **Transition**: a decision with a target state per outcome
//! - **State**: ordered actions and transitions, immutable once built
//! - **Controller**: one entity's data plus its current state, ticked by the host
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stategraph::builder::{GraphBuilder, StateBuilder};
//! use stategraph::controller::Controller;
//! use stategraph::core::Decision;
//! use stategraph::category;
//!
//! #[derive(Default)]
//! pub struct EnemyData {
//!     pub sees_player: bool,
//!     pub in_attack_range: bool,
//! }
//!
//! category! {
//!     pub Enemy => EnemyData
//! }
//!
//! let sees_player = Decision::<Enemy>::new(|e| e.sees_player);
//! let in_range = Decision::<Enemy>::new(|e| e.in_attack_range);
//!
//! let mut builder = GraphBuilder::<Enemy>::new();
//! let idle = builder.declare("Idle");
//! let chase = builder.declare("Chase");
//! let attack = builder.declare("Attack");
//! builder
//!     .define(idle, StateBuilder::new().when(sees_player, chase, idle))
//!     .define(chase, StateBuilder::new().when(in_range.clone(), attack, chase))
//!     .define(attack, StateBuilder::new().when(in_range, attack, chase))
//!     .initial(idle);
//! let graph = Arc::new(builder.build().unwrap());
//!
//! let mut enemy = Controller::new(graph, EnemyData::default());
//! enemy.tick();
//! assert_eq!(enemy.current_state(), idle);
//!
//! enemy.data_mut().sees_player = true;
//! enemy.tick();
//! assert_eq!(enemy.current_state(), chase);
//!
//! enemy.data_mut().in_attack_range = true;
//! enemy.tick();
//! assert_eq!(enemy.current_state(), attack);
//! ```
//!
//! A controller for one category cannot be assembled from another
//! category's pieces; this does not compile:
//!
//! ```compile_fail,E0308
//! use std::sync::Arc;
//! use stategraph::builder::{GraphBuilder, StateBuilder};
//! use stategraph::controller::Controller;
//! use stategraph::core::Action;
//! use stategraph::category;
//!
//! pub struct EnemyData;
//! pub struct PlayerData;
//!
//! category! {
//!     pub Enemy => EnemyData;
//!     pub Player => PlayerData;
//! }
//!
//! let attack = Action::<Enemy>::new(|_| {});
//!
//! let mut builder = GraphBuilder::new();
//! let idle = builder.declare("Idle");
//! builder
//!     .define(idle, StateBuilder::new().action(attack))
//!     .initial(idle);
//! let player: Controller<Player> = Controller::new(Arc::new(builder.build().unwrap()), PlayerData);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod controller;
pub mod core;
pub mod definition;

// Re-export commonly used types
pub use builder::{BuildError, GraphBuilder, StateBuilder};
pub use controller::{Controller, ControllerConfig, TickOutcome};
pub use crate::core::{Action, Category, Decision, State, StateData, StateGraph, StateRef, Transition};
