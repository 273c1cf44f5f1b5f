//! The host-facing lifecycle contract.
//!
//! The runtime drives an agent through three entry points: once at the
//! start of a session, once per turn after that, and once at the end. A
//! [`TurnController`] is that agent. All inputs arrive as explicit values
//! (the turn's [`WorldSnapshot`] and the previous turn's feedback), and the
//! only output is the [`CommandBatch`] to submit.
//!
//! The host contract also carries persistence hooks. Plan execution keeps
//! no state worth saving across sessions, so the defaults do nothing.

use std::io::{Read, Write};

use planexec_types::{Command, CommandBatch, FeedbackMap, FeedbackStatus, UnitId};
use planexec_world::WorldSnapshot;
use serde::Serialize;

use crate::executor::ExecutorError;

/// A turn-driven agent.
pub trait TurnController {
    /// Called on the first turn. Classifies the world and issues the first
    /// batch of commands.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`]; see [`ExecutorError::is_fatal`] for which
    /// errors end the session.
    fn on_init(&mut self, snapshot: &WorldSnapshot) -> Result<CommandBatch, ExecutorError>;

    /// Called on every later turn with the feedback for the previous turn.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`]; see [`ExecutorError::is_fatal`] for which
    /// errors end the session.
    fn on_turn(
        &mut self,
        snapshot: &WorldSnapshot,
        feedback: &FeedbackMap,
    ) -> Result<CommandBatch, ExecutorError>;

    /// Called once when the session ends.
    fn on_end(&mut self, snapshot: &WorldSnapshot) -> ExecutionReport;

    /// Whether the controller has nothing left to issue or wait for.
    fn is_finished(&self) -> bool;

    /// Persist agent state between sessions.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `out`.
    fn save_state(&self, _out: &mut dyn Write) -> std::io::Result<()> {
        Ok(())
    }

    /// Restore agent state saved by [`save_state`](Self::save_state).
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `input`.
    fn load_state(&mut self, _input: &mut dyn Read) -> std::io::Result<()> {
        Ok(())
    }
}

/// A command the runtime reported as failed or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    /// Turn the command was submitted on.
    pub turn: u64,
    /// Unit that carried it.
    pub unit: UnitId,
    /// The command as submitted.
    pub command: Command,
    /// The reported status.
    pub status: FeedbackStatus,
}

/// How a session ended from the plan's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    /// Every step was issued and nothing is still running.
    Completed,
    /// A failure stopped plan advancement.
    Halted,
    /// Steps remain or commands were still in progress.
    Unfinished,
}

/// Summary returned by [`TurnController::on_end`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    /// How the plan ended.
    pub outcome: PlanOutcome,
    /// Turns the controller was invoked for.
    pub turns: u64,
    /// Symbolic actions taken off the plan.
    pub actions_executed: usize,
    /// Fresh commands issued (echoes not counted).
    pub commands_issued: usize,
    /// In-progress commands echoed back to the runtime.
    pub resubmissions: usize,
    /// Failures observed in feedback.
    pub failures: Vec<FailureRecord>,
    /// Steps left on the plan.
    pub remaining_actions: usize,
    /// Identifier bindings held at the end.
    pub bindings: usize,
}
