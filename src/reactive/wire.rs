//! Reactive value cells.

use super::observers::{Observable, Observers};
use super::output::Output;
use super::reentry::ReentryGuard;
use super::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

struct WireInner<T> {
    value: RefCell<T>,
    observers: Observers<T>,
    pending: RefCell<VecDeque<T>>,
    delivering: Cell<bool>,
}

/// A mutable value that notifies its observers when written.
///
/// Cloning a `Wire` yields another handle to the same cell.
///
/// Writes made by an observer while a delivery pass is running are stored
/// immediately but delivered only after the running pass completes, so
/// observers always see values in write order and passes never interleave.
///
/// # Example
///
/// ```rust
/// use statewire::reactive::{Output, Wire};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let level = Wire::new(1);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// level.subscribe(move |v: &i32| sink.borrow_mut().push(*v));
///
/// assert!(level.set(2));
/// assert!(!level.set(2)); // unchanged, nobody is notified
/// level.notify();
///
/// assert_eq!(*seen.borrow(), vec![2, 2]);
/// ```
pub struct Wire<T> {
    inner: Rc<WireInner<T>>,
}

impl<T: Clone + PartialEq + 'static> Wire<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(WireInner {
                value: RefCell::new(initial),
                observers: Observers::new(),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value` and notify observers, unless it equals the stored value.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.replace(value);
        true
    }

    /// Store `value` and notify observers unconditionally.
    pub fn replace(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();
        self.deliver(value);
    }

    /// Re-deliver the current value to every observer.
    pub fn notify(&self) {
        self.deliver(self.get());
    }

    /// A read-only handle onto this cell's observers.
    pub fn observable(&self) -> Observable<T> {
        self.inner.observers.observable()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }

    fn deliver(&self, value: T) {
        self.inner.pending.borrow_mut().push_back(value);

        // A pass is already running further up the stack; it drains the queue.
        let Some(_delivering) = ReentryGuard::enter(&self.inner.delivering) else {
            return;
        };

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };
            self.inner.observers.emit(&value);
        }
    }
}

impl<T: Clone + PartialEq + 'static> Output<T> for Wire<T> {
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.inner.observers.subscribe(observer)
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Wire<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Wire<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Wire<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wire")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone + PartialEq + 'static>(wire: &Wire<T>) -> Rc<RefCell<Vec<T>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        wire.subscribe(move |v: &T| sink.borrow_mut().push(v.clone()));
        seen
    }

    #[test]
    fn set_notifies_on_change_only() {
        let wire = Wire::new("idle");
        let seen = collect(&wire);

        assert!(!wire.set("idle"));
        assert!(wire.set("busy"));
        assert!(!wire.set("busy"));

        assert_eq!(*seen.borrow(), vec!["busy"]);
        assert_eq!(wire.get(), "busy");
    }

    #[test]
    fn replace_always_notifies() {
        let wire = Wire::new(5);
        let seen = collect(&wire);

        wire.replace(5);
        wire.replace(6);

        assert_eq!(*seen.borrow(), vec![5, 6]);
    }

    #[test]
    fn notify_redelivers_current_value() {
        let wire = Wire::new(3);
        let seen = collect(&wire);

        wire.notify();
        wire.notify();

        assert_eq!(*seen.borrow(), vec![3, 3]);
    }

    #[test]
    fn observers_see_stored_value_during_delivery() {
        let wire = Wire::new(0);
        let reader = wire.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        wire.subscribe(move |v: &i32| sink.borrow_mut().push((*v, reader.get())));
        wire.set(9);

        assert_eq!(*seen.borrow(), vec![(9, 9)]);
    }

    #[test]
    fn nested_set_is_delivered_after_current_pass() {
        let wire = Wire::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let writer = wire.clone();
        let first = Rc::clone(&log);
        wire.subscribe(move |v: &i32| {
            first.borrow_mut().push(format!("first:{v}"));
            if *v == 1 {
                writer.set(2);
            }
        });

        let second = Rc::clone(&log);
        wire.subscribe(move |v: &i32| second.borrow_mut().push(format!("second:{v}")));

        wire.set(1);

        assert_eq!(
            *log.borrow(),
            vec!["first:1", "second:1", "first:2", "second:2"]
        );
        assert_eq!(wire.get(), 2);
    }

    #[test]
    fn cancelled_observer_stops_receiving() {
        let wire = Wire::new(0u8);
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let mut subscription = wire.subscribe(move |_| counter.set(counter.get() + 1));
        wire.set(1);
        subscription.cancel();
        wire.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(wire.observer_count(), 0);
    }

    #[test]
    fn default_uses_type_default() {
        let wire: Wire<u32> = Wire::default();
        assert_eq!(wire.get(), 0);
        assert_eq!(wire.with(|v| *v + 1), 1);
    }
}
