//! Symbolic plan actions.
//!
//! A symbolic action is what the planner emits: a tagged step naming `k`
//! participating peasants by their *symbolic* ids plus whatever each kind of
//! step needs (a target cell, a resource, the town hall). Every variant
//! exposes the same accessors ([`SymbolicAction::k`],
//! [`SymbolicAction::actors`], [`SymbolicAction::target_position`]) so the
//! translator never has to ask which concrete kind it holds before reading
//! the common fields.

use std::collections::BTreeSet;

use planexec_types::{ActionKind, Position, SymbolicId};
use planexec_world::{Entity, Resource};
use serde::{Deserialize, Serialize};

/// Errors for structurally invalid symbolic actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action names no actors (`k == 0`).
    #[error("{kind} action has no participating actors")]
    NoActors {
        /// Kind of the offending action.
        kind: ActionKind,
    },

    /// The same symbolic actor appears more than once.
    #[error("{kind} action lists actor {actor} more than once")]
    DuplicateActor {
        /// Kind of the offending action.
        kind: ActionKind,
        /// The repeated actor.
        actor: SymbolicId,
    },
}

/// A participating peasant as the planner saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    /// Symbolic identifier assigned by the planner.
    pub id: SymbolicId,
    /// Where the planner expected the peasant to be when this step runs.
    pub position: Position,
}

impl ActorRef {
    /// Create an actor reference.
    pub const fn new(id: SymbolicId, position: Position) -> Self {
        Self { id, position }
    }
}

/// One peasant's part in a MOVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLeg {
    /// Who moves.
    pub actor: ActorRef,
    /// Absolute destination cell.
    pub target: Position,
}

/// One peasant's part in a HARVEST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestLeg {
    /// Who gathers.
    pub actor: ActorRef,
    /// The adjacent node to gather from.
    pub resource: Resource,
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SymbolicAction {
    /// Walk each actor to its own destination.
    Move {
        /// One leg per actor.
        legs: Vec<MoveLeg>,
    },
    /// Each actor gathers from its own adjacent resource.
    Harvest {
        /// One leg per actor.
        legs: Vec<HarvestLeg>,
    },
    /// Every actor drops its cargo at the town hall.
    Deposit {
        /// Depositing peasants.
        actors: Vec<ActorRef>,
        /// Shared deposit target.
        town_hall: Position,
    },
    /// The town hall produces one peasant; `actors` only records who the
    /// planner counted toward the step.
    Build {
        /// Participating peasants.
        actors: Vec<ActorRef>,
    },
}

impl SymbolicAction {
    /// A single-peasant MOVE.
    pub fn move_to(actor: ActorRef, target: Position) -> Self {
        Self::Move {
            legs: vec![MoveLeg { actor, target }],
        }
    }

    /// A single-peasant HARVEST.
    pub fn harvest(actor: ActorRef, resource: Resource) -> Self {
        Self::Harvest {
            legs: vec![HarvestLeg { actor, resource }],
        }
    }

    /// A single-peasant DEPOSIT.
    pub fn deposit(actor: ActorRef, town_hall: Position) -> Self {
        Self::Deposit {
            actors: vec![actor],
            town_hall,
        }
    }

    /// A BUILD counted against `actors`.
    pub const fn build(actors: Vec<ActorRef>) -> Self {
        Self::Build { actors }
    }

    /// The variant tag.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Move { .. } => ActionKind::Move,
            Self::Harvest { .. } => ActionKind::Harvest,
            Self::Deposit { .. } => ActionKind::Deposit,
            Self::Build { .. } => ActionKind::Build,
        }
    }

    /// Number of participating actors.
    pub fn k(&self) -> usize {
        match self {
            Self::Move { legs } => legs.len(),
            Self::Harvest { legs } => legs.len(),
            Self::Deposit { actors, .. } | Self::Build { actors } => actors.len(),
        }
    }

    /// The `i`-th participating actor.
    pub fn actor(&self, i: usize) -> Option<ActorRef> {
        match self {
            Self::Move { legs } => legs.get(i).map(|l| l.actor),
            Self::Harvest { legs } => legs.get(i).map(|l| l.actor),
            Self::Deposit { actors, .. } | Self::Build { actors } => actors.get(i).copied(),
        }
    }

    /// All participating actors, in order.
    pub fn actors(&self) -> Vec<ActorRef> {
        match self {
            Self::Move { legs } => legs.iter().map(|l| l.actor).collect(),
            Self::Harvest { legs } => legs.iter().map(|l| l.actor).collect(),
            Self::Deposit { actors, .. } | Self::Build { actors } => actors.clone(),
        }
    }

    /// Where the `i`-th actor's effort is directed: the destination for
    /// MOVE, the resource cell for HARVEST, the town hall for DEPOSIT.
    /// BUILD has no per-actor target.
    pub fn target_position(&self, i: usize) -> Option<Position> {
        match self {
            Self::Move { legs } => legs.get(i).map(|l| l.target),
            Self::Harvest { legs } => legs.get(i).map(|l| l.resource.position()),
            Self::Deposit { actors, town_hall } => (i < actors.len()).then_some(*town_hall),
            Self::Build { .. } => None,
        }
    }

    /// Check `k >= 1` and that no actor is listed twice.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoActors`] or [`ActionError::DuplicateActor`].
    pub fn validate(&self) -> Result<(), ActionError> {
        let kind = self.kind();
        let actors = self.actors();
        if actors.is_empty() {
            return Err(ActionError::NoActors { kind });
        }
        let mut seen = BTreeSet::new();
        for actor in actors {
            if !seen.insert(actor.id) {
                return Err(ActionError::DuplicateActor {
                    kind,
                    actor: actor.id,
                });
            }
        }
        Ok(())
    }
}

impl core::fmt::Display for SymbolicAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}(k={})", self.kind(), self.k())
    }
}
