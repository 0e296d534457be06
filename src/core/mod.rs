//! Core runtime types of the state machine.
//!
//! This module contains the pieces a running machine is made of:
//! - Category markers and their bound state data
//! - Decisions and actions over that data
//! - Transitions, states and the graph arena that holds them
//! - History of state changes
//!
//! Everything here is immutable once assembled, apart from history. The
//! mutable part of a running machine lives in the
//! [`Controller`](crate::controller::Controller).

mod action;
mod category;
mod decision;
mod graph;
mod history;
mod state;
mod transition;

pub use action::{Action, Perform};
pub use category::{Category, StateData};
pub use decision::{Decide, Decision};
pub use graph::{GraphId, StateGraph, StateRef};
pub use history::{StateChange, StateHistory};
pub use state::State;
pub use transition::Transition;
