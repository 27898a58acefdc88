//! Observer registries.
//!
//! `Observers<T>` owns an ordered list of `(id, callback)` pairs. Removal
//! goes by id, so the same closure registered twice yields two independent
//! subscriptions.

use super::output::Output;
use super::subscription::Subscription;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// An observer registry that can publish values.
///
/// Cloning yields another handle to the same registry.
pub struct Observers<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Deliver `value` to every current observer, in registration order.
    ///
    /// The observer list is snapshotted first: observers added or cancelled
    /// during the pass take effect on the next one.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(value);
        }
    }

    /// A read-only handle onto this registry.
    pub fn observable(&self) -> Observable<T> {
        Observable {
            observers: self.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Output<T> for Observers<T> {
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Rc::new(observer)));
            id
        };

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .entries
                    .retain(|(entry, _)| *entry != id);
            }
        })
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.registry.borrow().entries.len())
            .finish()
    }
}

/// Subscribe-only view of an [`Observers`] registry.
///
/// State machines hand these out for their whole-machine streams so that
/// callers can listen without being able to publish.
pub struct Observable<T> {
    observers: Observers<T>,
}

impl<T: 'static> Observable<T> {
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: 'static> Output<T> for Observable<T> {
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.observers.subscribe(observer)
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observers)
            .finish()
    }
}
