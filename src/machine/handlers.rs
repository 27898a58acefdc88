//! Per-state and per-edge observer handles.

use super::diagnostics::{Diagnostic, DiagnosticSink};
use crate::core::{Guard, State, Transition};
use crate::reactive::{Observers, Output, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct StateHandlerInner<S: State> {
    state: S,
    observers: Observers<S>,
}

/// Observers of one state, notified on every `update()` tick spent in it.
///
/// Handles are cheap to clone and all clones share the same observer list.
pub struct StateHandler<S: State> {
    inner: Rc<StateHandlerInner<S>>,
}

impl<S: State> StateHandler<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            inner: Rc::new(StateHandlerInner {
                state,
                observers: Observers::new(),
            }),
        }
    }

    pub fn state(&self) -> &S {
        &self.inner.state
    }

    /// Register an observer for ticks spent in this state.
    pub fn on_update<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        self.inner.observers.subscribe(observer)
    }

    /// Deliver the state to every observer, in registration order.
    pub fn update(&self) {
        self.inner.observers.emit(&self.inner.state);
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }
}

impl<S: State> Output<S> for StateHandler<S> {
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        self.on_update(observer)
    }
}

impl<S: State> Clone for StateHandler<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: State> fmt::Debug for StateHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHandler")
            .field("state", &self.inner.state)
            .field("observers", &self.inner.observers.len())
            .finish()
    }
}

struct TransitionHandlerInner<S: State> {
    transition: Transition<S>,
    guard: RefCell<Option<Guard<S>>>,
    observers: Observers<Transition<S>>,
    sink: Rc<dyn DiagnosticSink<S>>,
}

/// A directed `(from, to)` edge with an optional guard and its own observers.
///
/// Handles are cheap to clone and all clones refer to the same edge.
pub struct TransitionHandler<S: State> {
    inner: Rc<TransitionHandlerInner<S>>,
}

impl<S: State> TransitionHandler<S> {
    pub(crate) fn new(transition: Transition<S>, sink: Rc<dyn DiagnosticSink<S>>) -> Self {
        Self {
            inner: Rc::new(TransitionHandlerInner {
                transition,
                guard: RefCell::new(None),
                observers: Observers::new(),
                sink,
            }),
        }
    }

    pub fn transition(&self) -> &Transition<S> {
        &self.inner.transition
    }

    pub fn from(&self) -> &S {
        &self.inner.transition.from
    }

    pub fn to(&self) -> &S {
        &self.inner.transition.to
    }

    /// Install a guard built from a closure over the edge endpoints.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S, &S) -> bool + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Install `guard`, replacing (and reporting) any guard already present.
    pub fn guard(self, guard: Guard<S>) -> Self {
        let previous = self.inner.guard.borrow_mut().replace(guard);
        if previous.is_some() {
            self.inner
                .sink
                .report(&Diagnostic::GuardReplaced(self.inner.transition.clone()));
        }
        self
    }

    pub fn has_guard(&self) -> bool {
        self.inner.guard.borrow().is_some()
    }

    /// Register an observer called each time this edge fires.
    pub fn on_fire<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Transition<S>) + 'static,
    {
        self.inner.observers.subscribe(observer)
    }

    /// Evaluate the guard without firing. A missing guard always passes.
    pub fn check(&self) -> bool {
        // Clone out so the guard may touch this edge while it runs.
        let guard = self.inner.guard.borrow().clone();
        let Transition { from, to } = &self.inner.transition;
        guard.is_none_or(|guard| guard.check(from, to))
    }

    /// Check the guard and, if it passes, notify the edge's observers.
    ///
    /// Returns whether the edge fired.
    pub fn attempt_fire(&self) -> bool {
        if !self.check() {
            return false;
        }
        self.inner.observers.emit(&self.inner.transition);
        true
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }
}

impl<S: State> Output<Transition<S>> for TransitionHandler<S> {
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Transition<S>) + 'static,
    {
        self.on_fire(observer)
    }
}

impl<S: State> Clone for TransitionHandler<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: State> fmt::Debug for TransitionHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHandler")
            .field("transition", &self.inner.transition)
            .field("guarded", &self.has_guard())
            .field("observers", &self.inner.observers.len())
            .finish()
    }
}
