//! Macros for ergonomic state machine construction.

/// Declare a fieldless state enum with its full state universe.
///
/// Generates the enum with the derives a machine needs, plus
/// implementations of `State`, `StateSet` (variants in declaration order)
/// and `Default` (the first variant).
///
/// The calling crate must depend on `serde`.
///
/// # Example
///
/// ```
/// use tickstate::state_enum;
/// use tickstate::core::{State, StateSet};
///
/// state_enum! {
///     pub enum PlayerState {
///         Idle,
///         Running,
///         Paused,
///     }
/// }
///
/// assert_eq!(PlayerState::all().len(), 3);
/// assert_eq!(PlayerState::default(), PlayerState::Idle);
/// assert_eq!(PlayerState::Paused.name(), "Paused");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident
            $(
                ,
                $(#[$variant_meta:meta])*
                $variant:ident
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(#[$first_meta])*
            $first,
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }

        impl $crate::core::StateSet for $name {
            fn all() -> ::std::vec::Vec<Self> {
                ::std::vec![Self::$first $(, Self::$variant)*]
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }
    };
}
