//! The `(from, to)` pair that identifies an edge.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed pair of states.
///
/// This is both the key of an edge in the transition graph and the value
/// delivered to transition observers when the edge fires.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Transition<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
}

impl<S> Transition<S> {
    pub fn new(from: S, to: S) -> Self {
        Self { from, to }
    }
}

impl<S: PartialEq> Transition<S> {
    /// Whether the edge leaves and enters the same state.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl<S: State> fmt::Display for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-->({})", self.from.name(), self.to.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Light {
            Red,
            Green,
        }
    }

    #[test]
    fn display_uses_state_names() {
        let transition = Transition::new(Light::Red, Light::Green);
        assert_eq!(transition.to_string(), "(Red)-->(Green)");
    }

    #[test]
    fn self_loop_is_detected() {
        assert!(Transition::new(Light::Red, Light::Red).is_self_loop());
        assert!(!Transition::new(Light::Red, Light::Green).is_self_loop());
    }

    #[test]
    fn transition_serializes_with_serde_states() {
        let transition = Transition::new("idle".to_string(), "busy".to_string());
        let json = serde_json::to_string(&transition).unwrap();
        assert_eq!(json, r#"{"from":"idle","to":"busy"}"#);

        let back: Transition<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transition);
    }
}
