//! State machine errors.

use thiserror::Error;

/// Errors raised while driving a state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("Re-entrant transition to '{target}' while a transition from '{current}' is in progress")]
    ReentrantTransition { current: String, target: String },
}
