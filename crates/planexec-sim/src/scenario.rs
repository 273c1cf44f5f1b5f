//! JSON scenario files.
//!
//! A scenario bundles a starting world with the plan to run in it:
//!
//! ```json
//! {
//!   "player": 0,
//!   "config": { "move_speed": 8, "goal": { "wood": 100 } },
//!   "units": [
//!     { "template": "TownHall", "position": { "x": 1, "y": 0 } },
//!     { "template": "Peasant", "position": { "x": 0, "y": 2 } }
//!   ],
//!   "resources": [
//!     { "kind": "wood", "position": { "x": 5, "y": 4 }, "amount": 400 }
//!   ],
//!   "templates": ["Peasant"],
//!   "plan": [
//!     { "type": "move", "legs": [{ "actor": { "id": 1, "position": { "x": 0, "y": 2 } },
//!                                  "target": { "x": 5, "y": 5 } }] }
//!   ]
//! }
//! ```
//!
//! `plan` is listed in execution order; the first entry runs first.

use std::path::Path;

use planexec_core::{Plan, SymbolicAction};
use planexec_types::{PlayerId, Position, ResourceId, ResourceKind, UnitId};
use serde::Deserialize;

use crate::error::SimError;
use crate::world::{SimConfig, SimRuntime};

/// A starting world plus the plan to execute in it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    /// The player the plan is executed for.
    #[serde(default)]
    pub player: PlayerId,
    /// Simulation rules.
    #[serde(default)]
    pub config: SimConfig,
    /// Units in enumeration order.
    pub units: Vec<UnitSpec>,
    /// Resource nodes.
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
    /// Production template names, in id order.
    #[serde(default)]
    pub templates: Vec<String>,
    /// Symbolic actions in execution order.
    #[serde(default)]
    pub plan: Vec<SymbolicAction>,
}

/// A unit placed at scenario start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitSpec {
    /// Fixed id; the next free id when omitted.
    #[serde(default)]
    pub id: Option<UnitId>,
    /// Controlling player.
    #[serde(default)]
    pub owner: PlayerId,
    /// Template name.
    pub template: String,
    /// Starting cell.
    pub position: Position,
}

/// A resource node placed at scenario start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResourceSpec {
    /// Fixed id; the next free id when omitted.
    #[serde(default)]
    pub id: Option<ResourceId>,
    /// What the node yields.
    pub kind: ResourceKind,
    /// Cell it occupies.
    pub position: Position,
    /// Units available.
    pub amount: u32,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] or [`SimError::Json`].
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a scenario from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the starting world.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] if units or nodes collide.
    pub fn build_runtime(&self) -> Result<SimRuntime, SimError> {
        let mut sim = SimRuntime::new(self.config.clone());
        sim.add_player(self.player);
        for name in &self.templates {
            sim.add_template(name)?;
        }
        for unit in &self.units {
            match unit.id {
                Some(id) => sim.add_unit_with_id(id, unit.owner, &unit.template, unit.position)?,
                None => {
                    sim.add_unit(unit.owner, &unit.template, unit.position)?;
                }
            }
        }
        for node in &self.resources {
            match node.id {
                Some(id) => sim.add_resource_with_id(id, node.kind, node.position, node.amount)?,
                None => {
                    sim.add_resource(node.kind, node.position, node.amount)?;
                }
            }
        }
        Ok(sim)
    }

    /// The plan, with the first listed action on top.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Plan`] if an action fails validation.
    pub fn plan(&self) -> Result<Plan, SimError> {
        Ok(Plan::from_execution_order(self.plan.iter().cloned())?)
    }
}
