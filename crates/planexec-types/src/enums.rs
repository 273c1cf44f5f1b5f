//! Enumeration types shared by the planner and runtime boundaries.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// The kind of material a resource node yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Gold, mined from a gold mine.
    Gold,
    /// Wood, chopped from a forest.
    Wood,
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Gold => write!(f, "gold"),
            Self::Wood => write!(f, "wood"),
        }
    }
}

// ---------------------------------------------------------------------------
// Symbolic action kinds
// ---------------------------------------------------------------------------

/// The tag of a symbolic plan action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Walk one or more peasants to target cells.
    Move,
    /// Gather from an adjacent resource node.
    Harvest,
    /// Drop carried cargo at the town hall.
    Deposit,
    /// Produce a new peasant at the town hall.
    Build,
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Move => write!(f, "MOVE"),
            Self::Harvest => write!(f, "HARVEST"),
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::Build => write!(f, "BUILD"),
        }
    }
}

// ---------------------------------------------------------------------------
// Command feedback
// ---------------------------------------------------------------------------

/// Status the runtime reports for a command submitted on a previous turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    /// The command finished.
    Complete,
    /// The command is still running and must be resubmitted unchanged.
    Incomplete,
    /// The command was attempted and could not be carried out.
    Failed,
    /// The runtime rejected the command outright (unknown unit, bad target).
    Invalid,
}

impl FeedbackStatus {
    /// Whether the unit still has work in progress.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Incomplete)
    }

    /// Whether the command ended without doing what was asked.
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Invalid)
    }
}
