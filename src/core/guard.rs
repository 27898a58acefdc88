//! Guard predicates for controlling state transitions.
//!
//! A guard decides whether an edge may fire. Guards receive the edge's
//! endpoints and may consult anything they captured, including other
//! state machines.

use super::state::State;
use std::fmt;
use std::rc::Rc;

/// Predicate that determines if a transition can fire.
///
/// Guards are evaluated by the edge before its observers run. They are
/// allowed to drive *other* machines (for example calling `next` on a
/// sibling automaton), which is how independent machines coordinate.
///
/// # Example
///
/// ```rust
/// use statewire::core::Guard;
/// use statewire::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Idle,
///         Running,
///     }
/// }
///
/// let forward_only = Guard::new(|from: &Phase, to: &Phase| {
///     matches!((from, to), (Phase::Idle, Phase::Running))
/// });
///
/// assert!(forward_only.check(&Phase::Idle, &Phase::Running));
/// assert!(!forward_only.check(&Phase::Running, &Phase::Idle));
/// ```
pub struct Guard<S: State> {
    predicate: Rc<dyn Fn(&S, &S) -> bool>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a predicate over the edge endpoints.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &S) -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Create a guard from a condition that ignores the endpoints.
    ///
    /// ```rust
    /// use statewire::core::Guard;
    /// use statewire::state_enum;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// state_enum! {
    ///     enum Door {
    ///         Open,
    ///         Closed,
    ///     }
    /// }
    ///
    /// let unlocked = Rc::new(Cell::new(false));
    /// let flag = Rc::clone(&unlocked);
    /// let guard = Guard::when(move || flag.get());
    ///
    /// assert!(!guard.check(&Door::Closed, &Door::Open));
    /// unlocked.set(true);
    /// assert!(guard.check(&Door::Closed, &Door::Open));
    /// ```
    pub fn when<F>(condition: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::new(move |_, _| condition())
    }

    /// A guard that always allows the transition.
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    /// Evaluate the guard for the edge `from -> to`.
    pub fn check(&self, from: &S, to: &S) -> bool {
        (self.predicate)(from, to)
    }

    /// Both guards must pass. `other` is not evaluated when `self` rejects.
    pub fn and(self, other: Guard<S>) -> Self {
        Self::new(move |from, to| self.check(from, to) && other.check(from, to))
    }

    /// Either guard may pass. `other` is not evaluated when `self` accepts.
    pub fn or(self, other: Guard<S>) -> Self {
        Self::new(move |from, to| self.check(from, to) || other.check(from, to))
    }

    /// Invert the guard.
    pub fn negate(self) -> Self {
        Self::new(move |from, to| !self.check(from, to))
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
