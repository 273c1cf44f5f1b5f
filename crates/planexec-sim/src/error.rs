//! Error types for the `planexec-sim` crate.

use planexec_types::{Position, ResourceId, UnitId};

/// Errors that can occur while loading a scenario or building a world.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A unit id was used twice.
    #[error("duplicate unit id: {0}")]
    DuplicateUnit(UnitId),

    /// A resource id was used twice.
    #[error("duplicate resource id: {0}")]
    DuplicateResource(ResourceId),

    /// Something already stands on the cell.
    #[error("cell {0} is occupied")]
    CellOccupied(Position),

    /// An id counter ran out.
    #[error("identifier space exhausted")]
    IdOverflow,

    /// The scenario's plan is malformed.
    #[error("invalid plan: {source}")]
    Plan {
        /// The underlying validation error.
        #[from]
        source: planexec_core::action::ActionError,
    },

    /// The scenario file could not be read.
    #[error("failed to read scenario: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The scenario file could not be parsed.
    #[error("invalid scenario JSON: {source}")]
    Json {
        /// The underlying parse error.
        #[from]
        source: serde_json::Error,
    },
}
