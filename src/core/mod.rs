//! Core state machine types.
//!
//! This module contains the value types every other layer builds on:
//! - State definitions via the `State` trait
//! - Guard predicates for transition control
//! - The `(from, to)` transition pair
//! - Transition history tracking

mod guard;
mod history;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use state::State;
pub use transition::Transition;
