//! Records fired transitions into a [`StateHistory`].

use crate::core::{State, StateHistory, Transition};
use crate::reactive::{Output, Subscription};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A [`StateHistory`] kept up to date by a transition stream subscription.
///
/// Recording stops when the recorder is dropped.
///
/// # Example
///
/// ```rust
/// use statewire::machine::StateMachine;
/// use statewire::state_enum;
///
/// state_enum! {
///     enum Step {
///         A,
///         B,
///     }
/// }
///
/// let machine = StateMachine::new(Step::A);
/// machine.define_transition(Step::A, Step::B);
/// machine.define_transition(Step::B, Step::A);
///
/// let recorder = machine.record_history(None);
/// machine.next(Step::B);
/// machine.next(Step::A);
///
/// assert_eq!(recorder.history().path(), vec![&Step::A, &Step::B, &Step::A]);
/// ```
pub struct HistoryRecorder<S: State> {
    history: Rc<RefCell<StateHistory<S>>>,
    subscription: Subscription,
}

impl<S: State> HistoryRecorder<S> {
    /// Subscribe a new history to `source`.
    pub fn attach<O>(source: &O, capacity: Option<usize>) -> Self
    where
        O: Output<Transition<S>>,
    {
        let history = Rc::new(RefCell::new(match capacity {
            Some(capacity) => StateHistory::with_capacity(capacity),
            None => StateHistory::new(),
        }));

        let sink = Rc::clone(&history);
        let subscription = source.subscribe(move |transition: &Transition<S>| {
            sink.borrow_mut().record(transition.clone());
        });

        Self {
            history,
            subscription,
        }
    }

    pub fn history(&self) -> Ref<'_, StateHistory<S>> {
        self.history.borrow()
    }

    pub fn snapshot(&self) -> StateHistory<S> {
        self.history.borrow().clone()
    }

    /// Stop recording. Records gathered so far are kept.
    pub fn stop(&mut self) {
        self.subscription.cancel();
    }

    pub fn is_recording(&self) -> bool {
        !self.subscription.is_cancelled()
    }
}

impl<S: State> Drop for HistoryRecorder<S> {
    fn drop(&mut self) {
        self.subscription.cancel();
    }
}

impl<S: State> fmt::Debug for HistoryRecorder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryRecorder")
            .field("records", &self.history.borrow().len())
            .field("recording", &self.is_recording())
            .finish()
    }
}
