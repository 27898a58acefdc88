//! Synchronous publish/subscribe primitives.
//!
//! - [`Output`]: anything observers can subscribe to, with `filter` and
//!   `select` operators for deriving new outputs
//! - [`Subscription`]: the handle that cancels one registration
//! - [`Observers`] / [`Observable`]: an observer registry and its
//!   subscribe-only view
//! - [`Wire`]: a value cell that publishes every change
//!
//! Everything here is single-threaded. Delivery happens on the caller's
//! stack, in registration order, before the publishing call returns.

mod observers;
mod output;
pub(crate) mod reentry;
mod subscription;
mod wire;

pub use observers::{Observable, Observers};
pub use output::{Filter, Output, Select};
pub use subscription::Subscription;
pub use wire::Wire;
