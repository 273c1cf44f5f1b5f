//! The boundary with the simulation runtime.
//!
//! The engine never reaches into the simulation directly. Everything it
//! needs (the live unit list, templates, last turn's feedback) comes through
//! [`Runtime`], and everything it decides goes back through
//! [`Runtime::submit`]. Any turn-based host can sit behind this trait: the
//! in-memory simulator used by tests and the demo binary, or an adapter to
//! a real game server.

use planexec_types::{CommandBatch, FeedbackMap, PlayerId};
use planexec_world::WorldSnapshot;

/// Errors reported by a runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The runtime does not know the player.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// The runtime refused a submission as a whole.
    #[error("submission rejected: {message}")]
    Rejected {
        /// Why the submission was refused.
        message: String,
    },

    /// The runtime hit an internal problem.
    #[error("runtime error: {message}")]
    Internal {
        /// Description of the problem.
        message: String,
    },
}

/// A turn-based simulation the engine can drive.
pub trait Runtime {
    /// The current turn number (starts at 0).
    fn turn(&self) -> u64;

    /// The player's view of the world this turn: live units in enumeration
    /// order, resource nodes, production templates.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownPlayer`] for players not in the game.
    fn snapshot(&self, player: PlayerId) -> Result<WorldSnapshot, RuntimeError>;

    /// Feedback for the commands `player` submitted on `turn`, keyed by
    /// unit. Turns with no submissions yield an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownPlayer`] for players not in the game.
    fn command_feedback(&self, player: PlayerId, turn: u64) -> Result<FeedbackMap, RuntimeError>;

    /// Queue commands for the current turn. A unit with no command this
    /// turn holds position.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if the submission cannot be accepted.
    fn submit(&mut self, player: PlayerId, batch: &CommandBatch) -> Result<(), RuntimeError>;

    /// Resolve the current turn and move to the next one. Returns the new
    /// turn number.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if the turn cannot be resolved.
    fn step(&mut self) -> Result<u64, RuntimeError>;

    /// Whether the scenario has reached an end state (e.g. victory).
    fn is_terminal(&self) -> bool;
}
