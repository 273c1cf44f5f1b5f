//! Shared type definitions for the plan execution engine.
//!
//! Every crate in the workspace speaks in terms of the types defined here:
//! identifiers on both sides of the planner/runtime boundary, grid positions
//! and compass directions, the low-level commands submitted to the runtime,
//! and the per-unit feedback the runtime reports back each turn.
//!
//! # Modules
//!
//! - [`ids`] -- Newtype wrappers for symbolic, runtime, template and player
//!   identifiers
//! - [`enums`] -- Resource kinds, symbolic action kinds, feedback status
//! - [`position`] -- Grid positions and the 8-way [`Direction`]
//! - [`command`] -- Low-level runtime commands and their feedback
//!
//! [`Direction`]: position::Direction

pub mod command;
pub mod enums;
pub mod ids;
pub mod position;

// Re-export all public types at crate root for convenience.
pub use command::{Command, CommandBatch, CommandResult, FeedbackMap};
pub use enums::{ActionKind, FeedbackStatus, ResourceKind};
pub use ids::{PlayerId, ResourceId, SymbolicId, TemplateId, UnitId};
pub use position::{Direction, Position};
