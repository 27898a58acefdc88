//! Reactive state machine with a guarded transition graph.

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::error::MachineError;
use super::handlers::{StateHandler, TransitionHandler};
use super::recorder::HistoryRecorder;
use crate::builder::StateMachineBuilder;
use crate::core::{State, Transition};
use crate::reactive::reentry::ReentryGuard;
use crate::reactive::{Observable, Observers, Wire};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

type Edges<S> = HashMap<S, HashMap<S, TransitionHandler<S>>>;

struct Inner<S: State> {
    initial: RefCell<S>,
    state: Wire<S>,
    updates: Observers<S>,
    transitions: Observers<Transition<S>>,
    last_transition: RefCell<Option<Transition<S>>>,
    edges: RefCell<Edges<S>>,
    handlers: RefCell<HashMap<S, StateHandler<S>>>,
    transiting: Cell<bool>,
    sink: Rc<dyn DiagnosticSink<S>>,
}

/// A flat state machine whose edges are guarded and observable.
///
/// `StateMachine` is a shared handle: clones drive the same machine. Guards
/// on one machine may capture handles to others and drive them, which is
/// how separate automata coordinate. No borrow of a machine is held while
/// its guards or observers run.
///
/// # Example
///
/// ```rust
/// use statewire::machine::StateMachine;
/// use statewire::state_enum;
///
/// state_enum! {
///     enum Vital {
///         Dead,
///         Alive,
///     }
/// }
///
/// state_enum! {
///     enum Phase {
///         None,
///         Spawning,
///     }
/// }
///
/// let vital = StateMachine::new(Vital::Dead);
/// let phase = StateMachine::new(Phase::None);
///
/// let v = vital.clone();
/// phase
///     .define_transition(Phase::None, Phase::Spawning)
///     .when(move |_, _| v.is(&Vital::Dead));
/// let v = vital.clone();
/// phase
///     .define_transition(Phase::Spawning, Phase::None)
///     .when(move |_, _| v.is(&Vital::Dead));
///
/// let p = phase.clone();
/// vital
///     .define_transition(Vital::Dead, Vital::Alive)
///     .when(move |_, _| p.is(&Phase::Spawning) && p.next(Phase::None));
///
/// assert!(phase.next(Phase::Spawning));
/// assert!(vital.next(Vital::Alive));
/// assert_eq!(vital.current(), Vital::Alive);
/// assert_eq!(phase.current(), Phase::None);
/// ```
pub struct StateMachine<S: State> {
    inner: Rc<Inner<S>>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine that reports diagnostics through `tracing`.
    pub fn new(initial: S) -> Self {
        Self::with_sink(initial, TracingSink)
    }

    /// Create a machine that reports diagnostics to `sink`.
    pub fn with_sink<D>(initial: S, sink: D) -> Self
    where
        D: DiagnosticSink<S> + 'static,
    {
        Self::with_shared_sink(initial, Rc::new(sink))
    }

    pub(crate) fn with_shared_sink(initial: S, sink: Rc<dyn DiagnosticSink<S>>) -> Self {
        Self {
            inner: Rc::new(Inner {
                initial: RefCell::new(initial.clone()),
                state: Wire::new(initial),
                updates: Observers::new(),
                transitions: Observers::new(),
                last_transition: RefCell::new(None),
                edges: RefCell::new(HashMap::new()),
                handlers: RefCell::new(HashMap::new()),
                transiting: Cell::new(false),
                sink,
            }),
        }
    }

    pub fn builder() -> StateMachineBuilder<S> {
        StateMachineBuilder::new()
    }

    // ---- Drive ----

    pub fn current(&self) -> S {
        self.inner.state.get()
    }

    pub fn is(&self, state: &S) -> bool {
        self.inner.state.with(|current| current == state)
    }

    pub fn initial(&self) -> S {
        self.inner.initial.borrow().clone()
    }

    /// Whether a `next` call on this machine is currently running.
    pub fn is_transitioning(&self) -> bool {
        self.inner.transiting.get()
    }

    /// Move to `target` along the `(current, target)` edge.
    ///
    /// Returns `false` when no such edge exists or its guard rejects; the
    /// state is then unchanged and no observer runs. On success the edge's
    /// observers run first (still seeing the old state), then the state
    /// changes, then the state-change and transition streams are published.
    ///
    /// # Panics
    ///
    /// Panics when called on a machine whose own `next` is already running,
    /// for example from one of its guards or observers. Use
    /// [`try_next`](Self::try_next) to get the error instead.
    pub fn next(&self, target: S) -> bool {
        match self.try_next(target) {
            Ok(moved) => moved,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`next`](Self::next), but reports re-entrant use as an error.
    pub fn try_next(&self, target: S) -> Result<bool, MachineError> {
        let Some(_transiting) = ReentryGuard::enter(&self.inner.transiting) else {
            return Err(MachineError::ReentrantTransition {
                current: self.inner.state.with(|s| s.name().to_string()),
                target: target.name().to_string(),
            });
        };

        let from = self.current();
        let Some(edge) = self.find_transition(&from, &target) else {
            tracing::trace!(from = from.name(), to = target.name(), "no transition defined");
            return Ok(false);
        };

        if !edge.attempt_fire() {
            tracing::trace!(from = from.name(), to = target.name(), "transition rejected by guard");
            return Ok(false);
        }

        tracing::debug!(from = from.name(), to = target.name(), "transition fired");
        let transition = edge.transition().clone();
        self.inner.state.set(target);
        *self.inner.last_transition.borrow_mut() = Some(transition.clone());
        self.inner.transitions.emit(&transition);
        Ok(true)
    }

    /// Announce the current state for this tick.
    ///
    /// Runs the current state's handler, if one is defined, then publishes
    /// the state on the update stream. Never changes the state itself, but
    /// a handler may call `next`; the update stream then carries the state
    /// the handler left the machine in.
    pub fn update(&self) {
        if let Some(handler) = self.find_state(&self.current()) {
            handler.update();
        }
        self.inner.updates.emit(&self.current());
    }

    /// Return to the initial state without evaluating any edge.
    ///
    /// Allowed from inside a running `next`, for example from a state-change
    /// observer. `last_transition()` still names the edge that fired, even
    /// though the machine has since left its target.
    pub fn restart(&self) -> &Self {
        let initial = self.initial();
        self.inner.state.set(initial);
        self
    }

    /// Make `state` the new initial state and return to it.
    pub fn restart_from(&self, state: S) -> &Self {
        *self.inner.initial.borrow_mut() = state;
        self.restart()
    }

    // ---- Definition ----

    /// Get the `(from, to)` edge, creating an unguarded one if absent.
    ///
    /// An existing edge is returned as is: a new `when`/`guard` replaces its
    /// guard, but fire observers registered earlier stay attached. Use
    /// [`redefine_transition`](Self::redefine_transition) to start over.
    pub fn define_transition(&self, from: S, to: S) -> TransitionHandler<S> {
        if let Some(edge) = self.find_transition(&from, &to) {
            return edge;
        }

        let edge = TransitionHandler::new(
            Transition::new(from.clone(), to.clone()),
            Rc::clone(&self.inner.sink),
        );
        self.inner
            .edges
            .borrow_mut()
            .entry(from)
            .or_default()
            .insert(to, edge.clone());
        edge
    }

    /// Install a fresh `(from, to)` edge with no guard and no observers.
    ///
    /// Replacing an existing edge is reported to the diagnostic sink.
    pub fn redefine_transition(&self, from: S, to: S) -> TransitionHandler<S> {
        let transition = Transition::new(from.clone(), to.clone());
        let edge = TransitionHandler::new(transition.clone(), Rc::clone(&self.inner.sink));

        let previous = self
            .inner
            .edges
            .borrow_mut()
            .entry(from)
            .or_default()
            .insert(to, edge.clone());

        if previous.is_some() {
            self.inner
                .sink
                .report(&Diagnostic::TransitionReplaced(transition));
        }
        edge
    }

    pub fn find_transition(&self, from: &S, to: &S) -> Option<TransitionHandler<S>> {
        self.inner
            .edges
            .borrow()
            .get(from)
            .and_then(|targets| targets.get(to))
            .cloned()
    }

    /// Edges leaving `from`, in no particular order.
    pub fn transitions_from(&self, from: &S) -> Vec<TransitionHandler<S>> {
        self.inner
            .edges
            .borrow()
            .get(from)
            .map(|targets| targets.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Get the handler for `state`, creating it if absent.
    pub fn define_state(&self, state: S) -> StateHandler<S> {
        self.inner
            .handlers
            .borrow_mut()
            .entry(state)
            .or_insert_with_key(|state| StateHandler::new(state.clone()))
            .clone()
    }

    pub fn find_state(&self, state: &S) -> Option<StateHandler<S>> {
        self.inner.handlers.borrow().get(state).cloned()
    }

    // ---- Observation ----

    /// Published after the current state changes.
    pub fn state_changes(&self) -> Observable<S> {
        self.inner.state.observable()
    }

    /// Published with the current state on every `update()`.
    pub fn updates(&self) -> Observable<S> {
        self.inner.updates.observable()
    }

    /// Published after each successful `next`, once the state has changed.
    pub fn transitions(&self) -> Observable<Transition<S>> {
        self.inner.transitions.observable()
    }

    pub fn last_transition(&self) -> Option<Transition<S>> {
        self.inner.last_transition.borrow().clone()
    }

    /// Start recording fired transitions, keeping at most `capacity` records.
    pub fn record_history(&self, capacity: Option<usize>) -> HistoryRecorder<S> {
        HistoryRecorder::attach(&self.transitions(), capacity)
    }

    /// A non-owning handle, for guards that would otherwise form a cycle.
    pub fn downgrade(&self) -> WeakStateMachine<S> {
        WeakStateMachine {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<S: State + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: State> Clone for StateMachine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current())
            .field("initial", &*self.inner.initial.borrow())
            .field("transitioning", &self.is_transitioning())
            .finish_non_exhaustive()
    }
}

/// Non-owning counterpart of [`StateMachine`].
pub struct WeakStateMachine<S: State> {
    inner: Weak<Inner<S>>,
}

impl<S: State> WeakStateMachine<S> {
    pub fn upgrade(&self) -> Option<StateMachine<S>> {
        self.inner.upgrade().map(|inner| StateMachine { inner })
    }
}

impl<S: State> Clone for WeakStateMachine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S: State> fmt::Debug for WeakStateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStateMachine")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
