//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for describing a whole
//! machine up front, as an alternative to calling `define_transition` and
//! `define_state` one by one.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::{TransitionBuilder, TransitionDef};

use crate::core::{Guard, State};

/// Create a simple unconditional transition.
///
/// # Example
///
/// ```
/// use statewire::builder::simple_transition;
/// use statewire::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// let transition = simple_transition(MyState::Start, MyState::End);
/// assert!(transition.guard.is_none());
/// ```
pub fn simple_transition<S: State>(from: S, to: S) -> TransitionDef<S> {
    TransitionDef::new(from, to)
}

/// Create a transition with a guard predicate over its endpoints.
///
/// # Example
///
/// ```
/// use statewire::builder::guarded_transition;
/// use statewire::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         Middle,
///     }
/// }
///
/// let transition = guarded_transition(MyState::Start, MyState::Middle, |from, to| from != to);
/// assert!(transition.guard.is_some());
/// ```
pub fn guarded_transition<S, F>(from: S, to: S, guard: F) -> TransitionDef<S>
where
    S: State,
    F: Fn(&S, &S) -> bool + 'static,
{
    let mut transition = TransitionDef::new(from, to);
    transition.guard = Some(Guard::new(guard));
    transition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{SilentSink, StateMachine};
    use crate::state_enum;

    state_enum! {
        enum TestState {
            Start,
            Middle,
            End,
        }
    }

    #[test]
    fn simple_transition_builds() {
        let transition = simple_transition(TestState::Start, TestState::Middle);

        assert_eq!(transition.from, TestState::Start);
        assert_eq!(transition.to, TestState::Middle);
        assert!(transition.guard.is_none());
        assert_eq!(transition.observer_count(), 0);
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let machine = StateMachine::with_sink(TestState::Start, SilentSink);
        guarded_transition(TestState::Start, TestState::Middle, |_, _| false).install(&machine);
        guarded_transition(TestState::Start, TestState::End, |from, _| {
            *from == TestState::Start
        })
        .install(&machine);

        assert!(!machine.next(TestState::Middle));
        assert!(machine.next(TestState::End));
    }
}
