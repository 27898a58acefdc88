//! Statewire: a reactive finite state machine library
//!
//! Statewire models a flat state machine as a graph of guarded edges whose
//! firing is published to observers. Machines are single-threaded shared
//! handles, so a guard on one machine can consult and drive another; this is
//! how independent automata are coupled without a global registry.
//!
//! # Core Concepts
//!
//! - **State**: any `Clone + Eq + Hash + Debug` value with a display name,
//!   usually a fieldless enum declared with [`state_enum!`]
//! - **Wire**: a reactive value cell that notifies observers when written
//! - **Output**: anything that can be subscribed to, with lazy `filter` and
//!   `select` chaining
//! - **Guards**: predicates over an edge's endpoints that gate a transition
//! - **History**: a record of fired transitions with timestamps
//!
//! # Example
//!
//! ```rust
//! use statewire::reactive::Output;
//! use statewire::{state_enum, StateMachine};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! let door = StateMachine::new(Door::Closed);
//! let unlocked = Rc::new(RefCell::new(false));
//!
//! let key = Rc::clone(&unlocked);
//! door.define_transition(Door::Closed, Door::Open)
//!     .when(move |_, _| *key.borrow());
//! door.define_transition(Door::Open, Door::Closed);
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! door.transitions()
//!     .subscribe(move |t: &statewire::Transition<Door>| sink.borrow_mut().push(t.to_string()));
//!
//! assert!(!door.next(Door::Open));
//! *unlocked.borrow_mut() = true;
//! assert!(door.next(Door::Open));
//! assert!(door.is(&Door::Open));
//!
//! assert_eq!(*log.borrow(), vec!["(Closed)-->(Open)".to_string()]);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod reactive;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{Guard, State, StateHistory, Transition};
pub use machine::{MachineError, StateMachine};
pub use reactive::{Output, Subscription, Wire};
