//! Builder API for assembling state graphs.
//!
//! This module provides the assembly step between authoring and running a
//! machine: declare states, attach their ordered actions and transitions,
//! and validate the result into an immutable [`StateGraph`](crate::core::StateGraph).
//!
//! Category mismatches never reach this point; they are type errors.
//! Everything the type system cannot see (missing or duplicate states,
//! handles from another graph) is checked by [`GraphBuilder::build`].

pub mod error;
pub mod graph;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use graph::GraphBuilder;
pub use state::StateBuilder;
