//! Turn loop that drives a [`TurnController`] against a [`Runtime`].
//!
//! [`run_plan`] plays the host's role: it fetches the snapshot and the
//! previous turn's feedback, asks the controller for this turn's commands,
//! submits them and resolves the turn. It stops when:
//!
//! - **Plan complete**: the controller has nothing left to issue or wait for
//! - **Runtime terminal**: the scenario ended on its own
//! - **Turn limit**: `max_turns` turns have run
//!
//! Turn-local controller errors (see [`ExecutorError::is_fatal`]) are logged
//! and the turn submits nothing; fatal ones end the run with an error.

use chrono::{DateTime, Utc};
use planexec_types::{CommandBatch, PlayerId};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::RunnerConfig;
use crate::controller::{ExecutionReport, TurnController};
use crate::executor::ExecutorError;
use crate::runtime::{Runtime, RuntimeError};

/// Errors that end a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The runtime failed.
    #[error("runtime error: {source}")]
    Runtime {
        /// The underlying runtime error.
        #[from]
        source: RuntimeError,
    },

    /// The controller hit an unrecoverable error.
    #[error("executor error: {source}")]
    Executor {
        /// The underlying executor error.
        #[from]
        source: ExecutorError,
    },
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEndReason {
    /// The controller finished its plan.
    PlanComplete,
    /// The runtime reported an end state first.
    RuntimeTerminal,
    /// The configured `max_turns` was reached.
    MaxTurnsReached,
}

/// Result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Why the run stopped.
    pub end_reason: RunEndReason,
    /// The controller's end-of-session report.
    pub report: ExecutionReport,
    /// Turns played.
    pub total_turns: u64,
    /// Turns whose controller call failed with a turn-local error.
    pub turn_errors: u64,
    /// Wall-clock start.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end.
    pub finished_at: DateTime<Utc>,
}

/// Observer invoked with every batch just before it is submitted.
pub trait TurnCallback: Send {
    /// Called once per turn.
    fn on_turn(&mut self, turn: u64, batch: &CommandBatch);
}

/// A callback that does nothing.
pub struct NoOpCallback;

impl TurnCallback for NoOpCallback {
    fn on_turn(&mut self, _turn: u64, _batch: &CommandBatch) {}
}

/// Run `controller` against `runtime` as `player` until a stop condition.
///
/// # Errors
///
/// Returns [`RunnerError`] if the runtime fails or the controller reports a
/// fatal error.
pub async fn run_plan(
    runtime: &mut dyn Runtime,
    controller: &mut dyn TurnController,
    player: PlayerId,
    config: &RunnerConfig,
    callback: &mut dyn TurnCallback,
) -> Result<RunResult, RunnerError> {
    let started_at = Utc::now();
    let mut total_turns: u64 = 0;
    let mut turn_errors: u64 = 0;
    let mut initialized = false;

    info!(
        %player,
        max_turns = config.max_turns,
        turn_interval_ms = config.turn_interval_ms,
        "plan execution starting"
    );

    let end_reason = loop {
        let turn = runtime.turn();
        let snapshot = runtime.snapshot(player)?;

        let outcome = if initialized {
            let feedback = runtime.command_feedback(player, turn.saturating_sub(1))?;
            controller.on_turn(&snapshot, &feedback)
        } else {
            initialized = true;
            controller.on_init(&snapshot)
        };

        let batch = match outcome {
            Ok(batch) => batch,
            Err(err) if !err.is_fatal() => {
                warn!(turn, error = %err, "turn produced no commands");
                turn_errors = turn_errors.saturating_add(1);
                CommandBatch::new()
            }
            Err(err) => {
                error!(turn, error = %err, "plan execution aborted");
                return Err(err.into());
            }
        };

        debug!(turn, commands = batch.len(), "submitting commands");
        callback.on_turn(turn, &batch);
        runtime.submit(player, &batch)?;
        total_turns = total_turns.saturating_add(1);

        if controller.is_finished() {
            info!(turn, "plan complete");
            break RunEndReason::PlanComplete;
        }

        if runtime.is_terminal() {
            info!(turn, "runtime reached an end state");
            break RunEndReason::RuntimeTerminal;
        }

        runtime.step()?;

        if config.max_turns > 0 && total_turns >= config.max_turns {
            info!(turn, max_turns = config.max_turns, "turn limit reached");
            break RunEndReason::MaxTurnsReached;
        }

        if config.turn_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(config.turn_interval_ms)).await;
        }
    };

    let final_snapshot = runtime.snapshot(player)?;
    let report = controller.on_end(&final_snapshot);

    Ok(RunResult {
        end_reason,
        report,
        total_turns,
        turn_errors,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Log the outcome of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        outcome = ?result.report.outcome,
        total_turns = result.total_turns,
        actions_executed = result.report.actions_executed,
        commands_issued = result.report.commands_issued,
        resubmissions = result.report.resubmissions,
        failures = result.report.failures.len(),
        turn_errors = result.turn_errors,
        elapsed_ms = result
            .finished_at
            .signed_duration_since(result.started_at)
            .num_milliseconds(),
        "plan execution ended"
    );
}
