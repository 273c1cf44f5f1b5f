//! Type-safe identifier wrappers.
//!
//! The engine juggles two identifier spaces that are both plain integers on
//! the wire: *symbolic* ids assigned by the planner before any entity exists,
//! and *runtime* ids assigned by the simulation once entities are spawned.
//! Mixing them up is exactly the bug the identifier mapping exists to
//! prevent, so each space gets its own newtype and the compiler refuses to
//! confuse them.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw integer identifier.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Planning-time placeholder for an entity, stable only within one plan.
    SymbolicId
}

define_id! {
    /// Identifier the simulation assigned to a live unit.
    UnitId
}

define_id! {
    /// Identifier of a production template (e.g. the peasant template).
    TemplateId
}

define_id! {
    /// Identifier of a resource node in the world.
    ResourceId
}

define_id! {
    /// Player number controlled by an agent.
    PlayerId
}
