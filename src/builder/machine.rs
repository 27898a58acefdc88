//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::{TransitionBuilder, TransitionDef};
use crate::core::State;
use crate::machine::{DiagnosticSink, StateMachine, TracingSink};
use std::rc::Rc;

type UpdateObserver<S> = Rc<dyn Fn(&S)>;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```
/// use statewire::builder::{guarded_transition, simple_transition, StateMachineBuilder};
/// use statewire::state_enum;
///
/// state_enum! {
///     enum Connection {
///         Disconnected,
///         Connecting,
///         Connected,
///     }
/// }
///
/// let machine = StateMachineBuilder::new()
///     .initial(Connection::Disconnected)
///     .transitions(vec![
///         simple_transition(Connection::Disconnected, Connection::Connecting),
///         guarded_transition(Connection::Connecting, Connection::Connected, |_, _| true),
///     ])
///     .build()
///     .unwrap();
///
/// assert!(machine.next(Connection::Connecting));
/// assert!(machine.next(Connection::Connected));
/// ```
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    sink: Option<Rc<dyn DiagnosticSink<S>>>,
    transitions: Vec<TransitionDef<S>>,
    state_observers: Vec<(S, UpdateObserver<S>)>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            sink: None,
            transitions: Vec::new(),
            state_observers: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set where diagnostics go. Defaults to [`TracingSink`].
    pub fn sink<D>(mut self, sink: D) -> Self
    where
        D: DiagnosticSink<S> + 'static,
    {
        self.sink = Some(Rc::new(sink));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDef<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<TransitionDef<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Observe every `update()` tick spent in `state`.
    pub fn on_state<F>(mut self, state: S, observer: F) -> Self
    where
        F: Fn(&S) + 'static,
    {
        self.state_observers.push((state, Rc::new(observer)));
        self
    }

    /// Build the state machine.
    ///
    /// Transitions are installed in the order they were added; a later
    /// definition of the same `(from, to)` pair replaces the earlier one.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let sink = self.sink.unwrap_or_else(|| Rc::new(TracingSink));

        let machine = StateMachine::with_shared_sink(initial, sink);
        for transition in self.transitions {
            transition.install(&machine);
        }
        for (state, observer) in self.state_observers {
            machine
                .define_state(state)
                .on_update(move |state| observer(state));
        }

        Ok(machine)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
