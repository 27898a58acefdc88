//! The `Output` trait and its chaining operators.

use super::subscription::Subscription;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// A source of values that observers can subscribe to.
///
/// `filter` and `select` derive new outputs lazily: subscribing to a derived
/// output registers one wrapped callback on its immediate upstream source,
/// and the returned [`Subscription`] removes exactly that registration.
///
/// # Example
///
/// ```rust
/// use statewire::reactive::{Output, Wire};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let temperature = Wire::new(20);
/// let alarms = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&alarms);
/// temperature
///     .observable()
///     .filter(|t: &i32| *t > 30)
///     .select(|t: &i32| format!("too hot: {t}"))
///     .subscribe(move |msg: &String| sink.borrow_mut().push(msg.clone()));
///
/// temperature.set(25);
/// temperature.set(35);
///
/// assert_eq!(*alarms.borrow(), vec!["too hot: 35".to_string()]);
/// ```
pub trait Output<T: 'static> {
    /// Register `observer`; it is called synchronously for every value.
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static;

    /// Forward only the values for which `predicate` holds.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&T) -> bool + 'static,
    {
        Filter::new(self, predicate)
    }

    /// Forward `mapper(value)` for every value.
    fn select<U, M>(self, mapper: M) -> Select<Self, M, T>
    where
        Self: Sized,
        U: 'static,
        M: Fn(&T) -> U + 'static,
    {
        Select::new(self, mapper)
    }
}

impl<T: 'static, O: Output<T> + ?Sized> Output<T> for &O {
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        (**self).subscribe(observer)
    }
}

/// Output returned by [`Output::filter`].
pub struct Filter<O, P> {
    source: O,
    predicate: Rc<P>,
}

impl<O, P> Filter<O, P> {
    fn new(source: O, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<T, O, P> Output<T> for Filter<O, P>
where
    T: 'static,
    O: Output<T>,
    P: Fn(&T) -> bool + 'static,
{
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let predicate = Rc::clone(&self.predicate);
        self.source.subscribe(move |value: &T| {
            if predicate(value) {
                observer(value);
            }
        })
    }
}

impl<O: Clone, P> Clone for Filter<O, P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<O: fmt::Debug, P> fmt::Debug for Filter<O, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Output returned by [`Output::select`].
pub struct Select<O, M, T> {
    source: O,
    mapper: Rc<M>,
    _input: PhantomData<fn(&T)>,
}

impl<O, M, T> Select<O, M, T> {
    fn new(source: O, mapper: M) -> Self {
        Self {
            source,
            mapper: Rc::new(mapper),
            _input: PhantomData,
        }
    }
}

impl<T, U, O, M> Output<U> for Select<O, M, T>
where
    T: 'static,
    U: 'static,
    O: Output<T>,
    M: Fn(&T) -> U + 'static,
{
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&U) + 'static,
    {
        let mapper = Rc::clone(&self.mapper);
        self.source
            .subscribe(move |value: &T| observer(&mapper(value)))
    }
}

impl<O: Clone, M, T> Clone for Select<O, M, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            mapper: Rc::clone(&self.mapper),
            _input: PhantomData,
        }
    }
}

impl<O: fmt::Debug, M, T> fmt::Debug for Select<O, M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Observers;
    use std::cell::RefCell;

    #[test]
    fn filter_forwards_matching_values() {
        let source = Observers::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        source
            .clone()
            .filter(|v: &i32| v % 2 == 0)
            .subscribe(move |v: &i32| sink.borrow_mut().push(*v));

        for value in 1..=6 {
            source.emit(&value);
        }

        assert_eq!(*seen.borrow(), vec![2, 4, 6]);
    }

    #[test]
    fn select_maps_values() {
        let source = Observers::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        source
            .observable()
            .select(|v: &u8| u32::from(*v) * 100)
            .subscribe(move |v: &u32| sink.borrow_mut().push(*v));

        source.emit(&3);

        assert_eq!(*seen.borrow(), vec![300]);
    }

    #[test]
    fn operators_compose() {
        let source = Observers::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        (&source)
            .select(|v: &i32| v * 10)
            .filter(|v: &i32| *v > 15)
            .select(|v: &i32| v.to_string())
            .subscribe(move |v: &String| sink.borrow_mut().push(v.clone()));

        source.emit(&1);
        source.emit(&2);
        source.emit(&3);

        assert_eq!(*seen.borrow(), vec!["20", "30"]);
    }

    #[test]
    fn cancelling_derived_subscription_unhooks_upstream() {
        let source = Observers::new();
        let hits = Rc::new(RefCell::new(0));

        let derived = source.observable().filter(|_: &i32| true);
        let counter = Rc::clone(&hits);
        let mut subscription = derived.subscribe(move |_: &i32| *counter.borrow_mut() += 1);
        assert_eq!(source.len(), 1);

        source.emit(&1);
        subscription.cancel();
        source.emit(&2);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(source.len(), 0);
    }

    #[test]
    fn each_derived_subscriber_is_independent() {
        let source = Observers::new();
        let derived = source.observable().select(|v: &i32| v + 1);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&seen);
        let mut first = derived.subscribe(move |v: &i32| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&seen);
        derived.subscribe(move |v: &i32| b.borrow_mut().push(("b", *v)));

        source.emit(&1);
        first.cancel();
        source.emit(&2);

        assert_eq!(*seen.borrow(), vec![("a", 2), ("b", 2), ("b", 3)]);
    }
}
