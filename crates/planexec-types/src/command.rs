//! Low-level commands submitted to the runtime and the feedback it returns.
//!
//! Commands are either *compound* (may span many turns and must be
//! resubmitted unchanged each turn until the runtime resolves them) or
//! *primitive* (resolve within a single turn).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::FeedbackStatus;
use crate::ids::{TemplateId, UnitId};
use crate::position::Direction;

/// A command for a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Walk to an absolute cell; the runtime does its own pathfinding.
    CompoundMove {
        /// The unit to move.
        unit: UnitId,
        /// Target column.
        x: i32,
        /// Target row.
        y: i32,
    },
    /// Gather from the resource in the adjacent cell at `direction`.
    PrimitiveGather {
        /// The gathering peasant.
        unit: UnitId,
        /// Where the resource lies relative to the peasant.
        direction: Direction,
    },
    /// Deposit carried cargo into the building in the adjacent cell at
    /// `direction`.
    PrimitiveDeposit {
        /// The carrying peasant.
        unit: UnitId,
        /// Where the town hall lies relative to the peasant.
        direction: Direction,
    },
    /// Produce a unit from `template` at `producer`.
    PrimitiveProduction {
        /// The producing building.
        producer: UnitId,
        /// Template of the unit to produce.
        template: TemplateId,
    },
}

impl Command {
    /// The unit that carries the command out.
    pub const fn unit_id(&self) -> UnitId {
        match *self {
            Self::CompoundMove { unit, .. }
            | Self::PrimitiveGather { unit, .. }
            | Self::PrimitiveDeposit { unit, .. } => unit,
            Self::PrimitiveProduction { producer, .. } => producer,
        }
    }

    /// Whether the command may take more than one turn.
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::CompoundMove { .. })
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CompoundMove { unit, x, y } => write!(f, "move({unit} -> ({x}, {y}))"),
            Self::PrimitiveGather { unit, direction } => write!(f, "gather({unit}, {direction:?})"),
            Self::PrimitiveDeposit { unit, direction } => {
                write!(f, "deposit({unit}, {direction:?})")
            }
            Self::PrimitiveProduction { producer, template } => {
                write!(f, "produce({producer}, template {template})")
            }
        }
    }
}

/// Commands to submit this turn, keyed by the executing unit.
///
/// A unit can receive at most one command per turn.
pub type CommandBatch = BTreeMap<UnitId, Command>;

/// The runtime's verdict on one previously submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// The command exactly as it was submitted.
    pub command: Command,
    /// How far the command got.
    pub status: FeedbackStatus,
}

/// All feedback for one player and turn, keyed by unit.
pub type FeedbackMap = BTreeMap<UnitId, CommandResult>;
