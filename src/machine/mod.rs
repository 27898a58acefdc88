//! The reactive state machine.
//!
//! # Key Concepts
//!
//! - **Transition handlers**: `(from, to)` edges with an optional guard and
//!   their own observers, notified when the edge fires
//! - **State handlers**: per-state observers, notified on every `update()`
//!   tick spent in that state
//! - **State machine**: owns the current state, the edge graph, and the
//!   whole-machine state-change, update and transition streams
//! - **Diagnostics**: edge and guard replacement is reported to an
//!   injected [`DiagnosticSink`]
//!
//! # Re-entrancy
//!
//! Guards and observers may freely drive *other* machines. Calling `next` on
//! the machine whose own `next` is still running is a programming error:
//! `next` panics and `try_next` returns
//! [`MachineError::ReentrantTransition`].

mod diagnostics;
mod error;
mod handlers;
#[allow(clippy::module_inception)]
mod machine;
mod recorder;

pub use diagnostics::{Diagnostic, DiagnosticSink, SilentSink, TracingSink};
pub use error::MachineError;
pub use handlers::{StateHandler, TransitionHandler};
pub use machine::{StateMachine, WeakStateMachine};
pub use recorder::HistoryRecorder;
