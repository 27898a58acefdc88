//! Macros for ergonomic state machine construction.

/// Generate a fieldless state enum and its State trait implementation.
///
/// The enum derives `Clone, Copy, PartialEq, Eq, Hash, Debug`. Extra
/// attributes, such as serde derives, are passed through.
///
/// # Example
///
/// ```
/// use statewire::core::State;
/// use statewire::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Closed,
///         Open,
///         Locked,
///     }
/// }
///
/// assert_eq!(Door::Locked.name(), "Locked");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;
    use std::collections::HashSet;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn state_enum_derives_hash_and_copy() {
        let state = TestState::Processing;
        let copy = state;
        assert_eq!(state, copy);

        let set: HashSet<_> = [TestState::Initial, TestState::Initial, TestState::Complete]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn state_enum_supports_visibility() {
        // The macro should work with pub visibility
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_ne!(PublicState::A, PublicState::B);
    }

    #[test]
    fn state_enum_passes_attributes_through() {
        state_enum! {
            #[derive(serde::Serialize, serde::Deserialize)]
            enum Stored {
                /// Not yet written.
                Fresh,
                Saved,
            }
        }

        let json = serde_json::to_string(&Stored::Saved).unwrap();
        assert_eq!(json, "\"Saved\"");
        let back: Stored = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stored::Saved);
        assert_eq!(Stored::Fresh.name(), "Fresh");
    }
}
