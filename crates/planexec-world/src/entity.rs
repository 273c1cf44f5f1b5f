//! Typed entity views.
//!
//! Forests and gold mines behave identically; they differ only in the
//! [`ResourceKind`] tag, so both are a single [`Resource`] type. Narrowing to
//! "a forest" or "a gold mine" is a kind check that hands back a copy of the
//! same fields.

use planexec_types::{Position, ResourceId, ResourceKind, UnitId};
use serde::{Deserialize, Serialize};

use crate::snapshot::{ResourceView, UnitView};

/// Anything placed on the world grid.
pub trait Entity {
    /// The identifier space the entity lives in.
    type Id: Copy + Eq;

    /// Runtime identifier.
    fn id(&self) -> Self::Id;

    /// Current cell.
    fn position(&self) -> Position;
}

/// A load carried by a peasant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    /// What is being carried.
    pub kind: ResourceKind,
    /// How much.
    pub amount: u32,
}

/// A harvestable resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    position: Position,
    amount: u32,
    kind: ResourceKind,
}

impl Resource {
    /// Build a resource from its parts.
    pub const fn new(id: ResourceId, position: Position, amount: u32, kind: ResourceKind) -> Self {
        Self {
            id,
            position,
            amount,
            kind,
        }
    }

    /// Units remaining in the node.
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// What the node yields.
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// A depleted node must not be the target of new harvests.
    pub const fn is_depleted(&self) -> bool {
        self.amount == 0
    }

    /// Whether the node is a forest.
    pub const fn is_forest(&self) -> bool {
        matches!(self.kind, ResourceKind::Wood)
    }

    /// Whether the node is a gold mine.
    pub const fn is_gold_mine(&self) -> bool {
        matches!(self.kind, ResourceKind::Gold)
    }

    /// View the node as a resource of `kind`, keeping every field.
    ///
    /// Returns `None` if the node yields something else.
    pub const fn narrow(&self, kind: ResourceKind) -> Option<Self> {
        match (self.kind, kind) {
            (ResourceKind::Gold, ResourceKind::Gold) | (ResourceKind::Wood, ResourceKind::Wood) => {
                Some(*self)
            }
            _ => None,
        }
    }
}

impl Entity for Resource {
    type Id = ResourceId;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl From<&ResourceView> for Resource {
    fn from(view: &ResourceView) -> Self {
        Self::new(view.id, view.position, view.amount, view.kind)
    }
}

impl From<ResourceView> for Resource {
    fn from(view: ResourceView) -> Self {
        Self::from(&view)
    }
}

/// A worker unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peasant {
    id: UnitId,
    position: Position,
    cargo: Option<Cargo>,
}

impl Peasant {
    /// Build a peasant from its parts.
    pub const fn new(id: UnitId, position: Position, cargo: Option<Cargo>) -> Self {
        Self {
            id,
            position,
            cargo,
        }
    }

    /// The load the peasant is carrying.
    pub const fn cargo(&self) -> Option<Cargo> {
        self.cargo
    }

    /// Whether the peasant holds a load.
    pub const fn is_carrying(&self) -> bool {
        self.cargo.is_some()
    }
}

impl Entity for Peasant {
    type Id = UnitId;

    fn id(&self) -> UnitId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl From<&UnitView> for Peasant {
    fn from(view: &UnitView) -> Self {
        Self::new(view.id, view.position, view.cargo)
    }
}

/// The player's deposit and production building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownHall {
    id: UnitId,
    position: Position,
}

impl TownHall {
    /// Build a town hall from its parts.
    pub const fn new(id: UnitId, position: Position) -> Self {
        Self { id, position }
    }
}

impl Entity for TownHall {
    type Id = UnitId;

    fn id(&self) -> UnitId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl From<&UnitView> for TownHall {
    fn from(view: &UnitView) -> Self {
        Self::new(view.id, view.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest_view() -> ResourceView {
        ResourceView {
            id: ResourceId::new(3),
            kind: ResourceKind::Wood,
            position: Position::new(5, 4),
            amount: 250,
        }
    }

    #[test]
    fn resource_from_view_keeps_every_field() {
        let resource = Resource::from(forest_view());
        assert_eq!(resource.id(), ResourceId::new(3));
        assert_eq!(resource.position(), Position::new(5, 4));
        assert_eq!(resource.amount(), 250);
        assert_eq!(resource.kind(), ResourceKind::Wood);
        assert!(resource.is_forest());
        assert!(!resource.is_gold_mine());
    }

    #[test]
    fn narrowing_to_matching_kind_is_lossless() {
        let resource = Resource::from(forest_view());
        assert_eq!(resource.narrow(ResourceKind::Wood), Some(resource));
        assert_eq!(resource.narrow(ResourceKind::Gold), None);
    }

    #[test]
    fn empty_node_is_depleted() {
        let mine = Resource::new(ResourceId::new(1), Position::new(0, 0), 0, ResourceKind::Gold);
        assert!(mine.is_depleted());
        assert!(mine.is_gold_mine());
    }

    #[test]
    fn peasant_from_unit_view() {
        let view = UnitView {
            id: UnitId::new(8),
            template_name: String::from("Peasant"),
            position: Position::new(1, 2),
            cargo: Some(Cargo {
                kind: ResourceKind::Gold,
                amount: 100,
            }),
        };
        let peasant = Peasant::from(&view);
        assert_eq!(peasant.id(), UnitId::new(8));
        assert_eq!(peasant.position(), Position::new(1, 2));
        assert!(peasant.is_carrying());

        let hall = TownHall::from(&view);
        assert_eq!(hall.position(), Position::new(1, 2));
    }
}
