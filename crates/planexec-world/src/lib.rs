//! Entity and resource model for the plan execution engine.
//!
//! This crate is a read-only adaptation layer: it turns the runtime's raw
//! per-turn views ([`WorldSnapshot`], [`UnitView`], [`ResourceView`]) into
//! typed entities ([`Peasant`], [`TownHall`], [`Resource`]) so symbolic
//! actions can be interpreted without re-deriving facts from the runtime's
//! representation. Nothing here mutates world state.
//!
//! # Modules
//!
//! - [`entity`] -- The [`Entity`] capability and the typed entity views.
//! - [`snapshot`] -- Per-turn views the runtime hands to the engine.

pub mod entity;
pub mod snapshot;

// Re-export primary types at crate root.
pub use entity::{Cargo, Entity, Peasant, Resource, TownHall};
pub use snapshot::{ResourceView, TemplateView, UnitView, WorldSnapshot};
