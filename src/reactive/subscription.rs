//! Cancellable subscription handles.

use std::fmt;

/// Handle returned by every `subscribe` call.
///
/// Calling [`cancel`](Self::cancel) removes exactly the registration that
/// produced this handle. Cancelling twice is a no-op.
///
/// Dropping the handle does not cancel the subscription: observers
/// registered while wiring up a machine stay connected for as long as
/// their source lives.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the registration from its source.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
