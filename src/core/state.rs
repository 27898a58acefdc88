//! Core State trait for state machine states.
//!
//! States are plain values compared by equality. A machine keys its
//! transition graph and its state handlers by state, so states must also
//! be hashable.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: the current state is handed out by value to observers
/// - `Eq` + `Hash`: states key the transition graph
/// - `Debug`: states must be debuggable for diagnostics
///
/// Most enums can use the [`state_enum!`](crate::state_enum) macro instead
/// of implementing this by hand.
///
/// # Example
///
/// ```rust
/// use statewire::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Vital {
///     Dead,
///     Alive,
/// }
///
/// impl State for Vital {
///     fn name(&self) -> &str {
///         match self {
///             Self::Dead => "Dead",
///             Self::Alive => "Alive",
///         }
///     }
/// }
///
/// assert_eq!(Vital::Alive.name(), "Alive");
/// ```
pub trait State: Clone + Eq + Hash + Debug + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
