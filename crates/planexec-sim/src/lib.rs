//! Deterministic in-memory turn-based runtime.
//!
//! [`SimRuntime`] implements [`planexec_core::Runtime`] with just enough of a
//! peasant economy to exercise plan execution end to end: units on a grid,
//! gold and wood nodes, one cargo slot per peasant, a town hall that accepts
//! deposits and produces peasants, compound moves that take one turn per
//! `move_speed` cells, and per-turn command feedback.
//!
//! # Modules
//!
//! - [`error`] -- Construction errors.
//! - [`world`] -- [`SimRuntime`] and its turn resolution.
//! - [`scenario`] -- JSON scenario files: starting world, goal, and plan.

pub mod error;
pub mod scenario;
pub mod world;

pub use error::SimError;
pub use scenario::{ResourceSpec, Scenario, UnitSpec};
pub use world::{Goal, SimConfig, SimRuntime, SimUnit, Stockpile};
