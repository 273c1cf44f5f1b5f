//! Plan execution engine.
//!
//! Replays an offline planner's symbolic plan against a live turn-based
//! runtime: symbolic peasant ids are bound to runtime ids, one plan step is
//! translated into concrete commands per turn, and commands still in
//! progress are echoed until the runtime reports them done.
//!
//! # Modules
//!
//! - [`action`] -- [`SymbolicAction`], the closed set of plan steps.
//! - [`plan`] -- [`Plan`], the LIFO stack of remaining steps.
//! - [`bindings`] -- [`IdentifierMap`], the append-only symbolic-to-runtime
//!   id mapping.
//! - [`translate`] -- Symbolic action to runtime command translation.
//! - [`executor`] -- [`PlanExecutor`], the per-turn state machine.
//! - [`controller`] -- [`TurnController`], the host lifecycle contract, and
//!   the end-of-session report.
//! - [`runtime`] -- [`Runtime`], the simulation boundary.
//! - [`runner`] -- [`run_plan`](runner::run_plan), the turn loop.
//! - [`config`] -- Configuration loading from `planexec-config.yaml`.
//!
//! [`SymbolicAction`]: action::SymbolicAction
//! [`Plan`]: plan::Plan
//! [`IdentifierMap`]: bindings::IdentifierMap
//! [`PlanExecutor`]: executor::PlanExecutor
//! [`TurnController`]: controller::TurnController
//! [`Runtime`]: runtime::Runtime

pub mod action;
pub mod bindings;
pub mod config;
pub mod controller;
pub mod executor;
pub mod plan;
pub mod runner;
pub mod runtime;
pub mod translate;

pub use action::{ActorRef, HarvestLeg, MoveLeg, SymbolicAction};
pub use bindings::{Binding, IdentifierMap};
pub use config::ExecutorConfig;
pub use controller::{ExecutionReport, PlanOutcome, TurnController};
pub use executor::{ExecutorError, PlanExecutor};
pub use plan::Plan;
pub use runtime::{Runtime, RuntimeError};
