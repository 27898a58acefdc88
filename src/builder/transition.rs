//! Builder for constructing state transitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, State, Transition};
use crate::machine::{StateMachine, TransitionHandler};
use std::fmt;
use std::rc::Rc;

type FireObserver<S> = Rc<dyn Fn(&Transition<S>)>;

/// A transition described up front, ready to be installed on a machine.
pub struct TransitionDef<S: State> {
    pub from: S,
    pub to: S,
    pub guard: Option<Guard<S>>,
    observers: Vec<FireObserver<S>>,
}

impl<S: State> TransitionDef<S> {
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            guard: None,
            observers: Vec::new(),
        }
    }

    /// Install on `machine`, replacing any edge already defined for the pair.
    ///
    /// Observers registered here stay connected for the life of the edge.
    pub fn install(self, machine: &StateMachine<S>) -> TransitionHandler<S> {
        let mut edge = machine.redefine_transition(self.from, self.to);
        if let Some(guard) = self.guard {
            edge = edge.guard(guard);
        }
        for observer in self.observers {
            edge.on_fire(move |transition| observer(transition));
        }
        edge
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<S: State> fmt::Debug for TransitionDef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDef")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State> {
    from: Option<S>,
    to: Option<S>,
    guard: Option<Guard<S>>,
    observers: Vec<FireObserver<S>>,
}

impl<S: State> TransitionBuilder<S> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guard: None,
            observers: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure over the edge endpoints (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S, &S) -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add an observer called each time the edge fires (optional, repeatable).
    pub fn on_fire<F>(mut self, observer: F) -> Self
    where
        F: Fn(&Transition<S>) + 'static,
    {
        self.observers.push(Rc::new(observer));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionDef<S>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionDef {
            from,
            to,
            guard: self.guard,
            observers: self.observers,
        })
    }
}

impl<S: State> Default for TransitionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::SilentSink;
    use crate::state_enum;
    use std::cell::Cell;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<TestState>::new()
            .from(TestState::Initial)
            .build();
        assert!(matches!(result, Err(BuildError::MissingToState)));

        let result = TransitionBuilder::<TestState>::new()
            .to(TestState::Processing)
            .build();
        assert!(matches!(result, Err(BuildError::MissingFromState)));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::new()
            .from(TestState::Initial)
            .to(TestState::Processing)
            .build()
            .unwrap();

        assert_eq!(transition.from, TestState::Initial);
        assert_eq!(transition.to, TestState::Processing);
        assert!(transition.guard.is_none());
    }

    #[test]
    fn installed_transition_keeps_guard_and_observers() {
        let machine = StateMachine::with_sink(TestState::Initial, SilentSink);
        let fired = Rc::new(Cell::new(0));
        let open = Rc::new(Cell::new(false));

        let counter = Rc::clone(&fired);
        let gate = Rc::clone(&open);
        let definition = TransitionBuilder::new()
            .from(TestState::Initial)
            .to(TestState::Processing)
            .when(move |_, _| gate.get())
            .on_fire(move |_| counter.set(counter.get() + 1))
            .build()
            .unwrap();
        assert_eq!(definition.observer_count(), 1);

        let edge = definition.install(&machine);
        assert!(edge.has_guard());

        assert!(!machine.next(TestState::Processing));
        open.set(true);
        assert!(machine.next(TestState::Processing));
        assert_eq!(fired.get(), 1);
        assert!(!machine.next(TestState::Complete));
    }
}
