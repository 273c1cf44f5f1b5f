//! Turn callback that logs every submitted batch.

use planexec_core::runner::TurnCallback;
use planexec_types::CommandBatch;
use tracing::{debug, info};

/// Logs each turn's commands and keeps a running total.
#[derive(Debug, Default)]
pub struct LogCallback {
    /// Commands submitted so far, echoes included.
    submitted: usize,
    /// Turns on which nothing was submitted.
    idle_turns: u64,
}

impl LogCallback {
    /// Create a callback with zeroed counters.
    pub const fn new() -> Self {
        Self {
            submitted: 0,
            idle_turns: 0,
        }
    }

    /// Commands submitted so far, echoes included.
    pub const fn submitted(&self) -> usize {
        self.submitted
    }

    /// Turns on which nothing was submitted.
    pub const fn idle_turns(&self) -> u64 {
        self.idle_turns
    }
}

impl TurnCallback for LogCallback {
    fn on_turn(&mut self, turn: u64, batch: &CommandBatch) {
        if batch.is_empty() {
            self.idle_turns = self.idle_turns.saturating_add(1);
            debug!(turn, "Nothing to submit");
            return;
        }
        for command in batch.values() {
            debug!(turn, %command, "Submitting command");
        }
        self.submitted = self.submitted.saturating_add(batch.len());
        info!(
            turn,
            commands = batch.len(),
            submitted_total = self.submitted,
            "Turn submitted"
        );
    }
}
