//! Per-turn views of the world as the runtime reports it.
//!
//! A [`WorldSnapshot`] is scoped to one player: `units` and `templates` only
//! contain what that player controls, in the runtime's enumeration order.
//! The order matters: identifier backfill binds unmapped units in exactly
//! this order.

use planexec_types::{PlayerId, Position, ResourceId, ResourceKind, TemplateId, UnitId};
use serde::{Deserialize, Serialize};

use crate::entity::Cargo;

/// A live unit as the runtime describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitView {
    /// Runtime identifier.
    pub id: UnitId,
    /// Name of the template the unit was built from (e.g. `"Peasant"`).
    pub template_name: String,
    /// Current cell.
    pub position: Position,
    /// What the unit is carrying, if anything.
    #[serde(default)]
    pub cargo: Option<Cargo>,
}

impl UnitView {
    /// Whether the unit's template name matches `name`, ignoring ASCII case.
    pub fn is_template(&self, name: &str) -> bool {
        self.template_name.eq_ignore_ascii_case(name)
    }
}

/// A resource node as the runtime describes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceView {
    /// Runtime identifier of the node.
    pub id: ResourceId,
    /// What the node yields.
    pub kind: ResourceKind,
    /// Cell the node occupies.
    pub position: Position,
    /// Units remaining.
    pub amount: u32,
}

/// A production template available to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateView {
    /// Template identifier used in production commands.
    pub id: TemplateId,
    /// Human-readable template name.
    pub name: String,
}

/// Everything the engine may look at during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Turn number, starting at 0.
    pub turn: u64,
    /// Player the snapshot belongs to.
    pub player: PlayerId,
    /// The player's live units, in enumeration order.
    pub units: Vec<UnitView>,
    /// All resource nodes still on the map.
    #[serde(default)]
    pub resources: Vec<ResourceView>,
    /// Production templates available to the player.
    #[serde(default)]
    pub templates: Vec<TemplateView>,
}

impl WorldSnapshot {
    /// Look up a live unit by runtime id.
    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Current position of a live unit.
    pub fn position_of(&self, id: UnitId) -> Option<Position> {
        self.unit(id).map(|u| u.position)
    }

    /// Units whose template name matches `name` (case-insensitive), in
    /// enumeration order.
    pub fn units_of_template<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a UnitView> {
        self.units.iter().filter(move |u| u.is_template(name))
    }

    /// The first template whose name matches `name` (case-insensitive).
    pub fn template_named(&self, name: &str) -> Option<&TemplateView> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// The resource node occupying `position`, if any.
    pub fn resource_at(&self, position: Position) -> Option<&ResourceView> {
        self.resources.iter().find(|r| r.position == position)
    }
}
