//! The simulated world and its turn resolution.
//!
//! Submissions are queued per player and resolved together in
//! [`Runtime::step`], in ascending unit-id order. Each resolved command
//! produces a [`CommandResult`] that is kept as history, so
//! [`Runtime::command_feedback`] can answer for any past turn.

use std::collections::{BTreeMap, BTreeSet};

use planexec_core::{Runtime, RuntimeError};
use planexec_types::{
    Command, CommandBatch, CommandResult, Direction, FeedbackMap, FeedbackStatus, PlayerId,
    Position, ResourceId, ResourceKind, TemplateId, UnitId,
};
use planexec_world::{Cargo, ResourceView, TemplateView, UnitView, WorldSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SimError;

/// Tunable rules of the simulated economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Cells a compound move covers per turn.
    #[serde(default = "default_move_speed")]
    pub move_speed: u32,
    /// Units taken from a node by one gather.
    #[serde(default = "default_gather_amount")]
    pub gather_amount: u32,
    /// Gold spent from the stockpile per produced unit.
    #[serde(default)]
    pub production_gold_cost: u32,
    /// Template name of buildings that accept deposits and produce units.
    #[serde(default = "default_town_hall_template")]
    pub town_hall_template: String,
    /// Stockpile that ends the scenario once any player reaches it.
    #[serde(default)]
    pub goal: Option<Goal>,
}

const fn default_move_speed() -> u32 {
    1
}

const fn default_gather_amount() -> u32 {
    100
}

fn default_town_hall_template() -> String {
    "townhall".to_owned()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            gather_amount: default_gather_amount(),
            production_gold_cost: 0,
            town_hall_template: default_town_hall_template(),
            goal: None,
        }
    }
}

/// Target stockpile for a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Gold required.
    #[serde(default)]
    pub gold: u32,
    /// Wood required.
    #[serde(default)]
    pub wood: u32,
}

/// Resources a player has deposited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    /// Gold on hand.
    pub gold: u32,
    /// Wood on hand.
    pub wood: u32,
}

impl Stockpile {
    /// Add a deposit.
    pub const fn add(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Gold => self.gold = self.gold.saturating_add(amount),
            ResourceKind::Wood => self.wood = self.wood.saturating_add(amount),
        }
    }

    /// Whether the stockpile satisfies `goal`.
    pub const fn meets(&self, goal: Goal) -> bool {
        self.gold >= goal.gold && self.wood >= goal.wood
    }
}

/// A unit on the simulated map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimUnit {
    /// Runtime identifier.
    pub id: UnitId,
    /// Controlling player.
    pub owner: PlayerId,
    /// Template the unit was built from.
    pub template_name: String,
    /// Current cell.
    pub position: Position,
    /// Carried load.
    pub cargo: Option<Cargo>,
}

impl SimUnit {
    fn view(&self) -> UnitView {
        UnitView {
            id: self.id,
            template_name: self.template_name.clone(),
            position: self.position,
            cargo: self.cargo,
        }
    }
}

/// Deterministic in-memory implementation of [`Runtime`].
#[derive(Debug, Clone, Default)]
pub struct SimRuntime {
    config: SimConfig,
    turn: u64,
    players: BTreeSet<PlayerId>,
    /// Units in enumeration order (creation order).
    units: Vec<SimUnit>,
    resources: Vec<ResourceView>,
    templates: Vec<TemplateView>,
    stockpiles: BTreeMap<PlayerId, Stockpile>,
    pending: BTreeMap<PlayerId, CommandBatch>,
    history: BTreeMap<(PlayerId, u64), FeedbackMap>,
    next_unit: u32,
    next_resource: u32,
    next_template: u32,
}

impl SimRuntime {
    /// An empty world at turn 0.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The rules in force.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Register a player. Idempotent.
    pub fn add_player(&mut self, player: PlayerId) {
        self.players.insert(player);
        self.stockpiles.entry(player).or_default();
    }

    /// Place a unit under the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CellOccupied`] if the cell is taken, or
    /// [`SimError::IdOverflow`] if unit ids are exhausted.
    pub fn add_unit(
        &mut self,
        owner: PlayerId,
        template_name: &str,
        position: Position,
    ) -> Result<UnitId, SimError> {
        let id = UnitId::new(self.next_unit);
        self.add_unit_with_id(id, owner, template_name, position)?;
        Ok(id)
    }

    /// Place a unit under a chosen id. Later automatic ids continue past it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateUnit`], [`SimError::CellOccupied`], or
    /// [`SimError::IdOverflow`].
    pub fn add_unit_with_id(
        &mut self,
        id: UnitId,
        owner: PlayerId,
        template_name: &str,
        position: Position,
    ) -> Result<(), SimError> {
        if self.units.iter().any(|u| u.id == id) {
            return Err(SimError::DuplicateUnit(id));
        }
        if self.is_occupied(position) {
            return Err(SimError::CellOccupied(position));
        }
        let after = id.into_inner().checked_add(1).ok_or(SimError::IdOverflow)?;
        self.next_unit = self.next_unit.max(after);
        self.add_player(owner);
        self.units.push(SimUnit {
            id,
            owner,
            template_name: template_name.to_owned(),
            position,
            cargo: None,
        });
        Ok(())
    }

    /// Place a resource node under the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CellOccupied`] or [`SimError::IdOverflow`].
    pub fn add_resource(
        &mut self,
        kind: ResourceKind,
        position: Position,
        amount: u32,
    ) -> Result<ResourceId, SimError> {
        let id = ResourceId::new(self.next_resource);
        self.add_resource_with_id(id, kind, position, amount)?;
        Ok(id)
    }

    /// Place a resource node under a chosen id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateResource`], [`SimError::CellOccupied`],
    /// or [`SimError::IdOverflow`].
    pub fn add_resource_with_id(
        &mut self,
        id: ResourceId,
        kind: ResourceKind,
        position: Position,
        amount: u32,
    ) -> Result<(), SimError> {
        if self.resources.iter().any(|r| r.id == id) {
            return Err(SimError::DuplicateResource(id));
        }
        if self.is_occupied(position) {
            return Err(SimError::CellOccupied(position));
        }
        let after = id.into_inner().checked_add(1).ok_or(SimError::IdOverflow)?;
        self.next_resource = self.next_resource.max(after);
        self.resources.push(ResourceView {
            id,
            kind,
            position,
            amount,
        });
        Ok(())
    }

    /// Register a production template. Names are matched ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IdOverflow`] if template ids are exhausted.
    pub fn add_template(&mut self, name: &str) -> Result<TemplateId, SimError> {
        let id = TemplateId::new(self.next_template);
        self.next_template = self.next_template.checked_add(1).ok_or(SimError::IdOverflow)?;
        self.templates.push(TemplateView {
            id,
            name: name.to_owned(),
        });
        Ok(id)
    }

    /// Deposited resources for `player`.
    pub fn stockpile(&self, player: PlayerId) -> Stockpile {
        self.stockpiles.get(&player).copied().unwrap_or_default()
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&SimUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// All units, in enumeration order.
    pub fn units(&self) -> &[SimUnit] {
        &self.units
    }

    /// The node on `position`, depleted or not.
    pub fn resource_at(&self, position: Position) -> Option<&ResourceView> {
        self.resources.iter().find(|r| r.position == position)
    }

    /// Whether `position` is off the map or has a unit or a non-depleted
    /// node on it. The map is the non-negative quadrant.
    pub fn is_occupied(&self, position: Position) -> bool {
        position.x < 0
            || position.y < 0
            || self.units.iter().any(|u| u.position == position)
            || self
                .resources
                .iter()
                .any(|r| r.position == position && r.amount > 0)
    }

    fn ensure_player(&self, player: PlayerId) -> Result<(), RuntimeError> {
        if self.players.contains(&player) {
            Ok(())
        } else {
            Err(RuntimeError::UnknownPlayer(player))
        }
    }

    fn owned_index(&self, player: PlayerId, unit: UnitId) -> Option<usize> {
        self.units
            .iter()
            .position(|u| u.id == unit && u.owner == player)
    }

    fn is_town_hall(&self, unit: &SimUnit) -> bool {
        unit.template_name
            .eq_ignore_ascii_case(&self.config.town_hall_template)
    }

    fn resolve(&mut self, player: PlayerId, command: Command) -> FeedbackStatus {
        let status = match command {
            Command::CompoundMove { unit, x, y } => {
                self.resolve_move(player, unit, Position::new(x, y))
            }
            Command::PrimitiveGather { unit, direction } => {
                self.resolve_gather(player, unit, direction)
            }
            Command::PrimitiveDeposit { unit, direction } => {
                self.resolve_deposit(player, unit, direction)
            }
            Command::PrimitiveProduction { producer, template } => {
                self.resolve_production(player, producer, template)
            }
        };
        debug!(
            player = player.into_inner(),
            turn = self.turn,
            command = %command,
            status = ?status,
            "Command resolved"
        );
        status
    }

    fn resolve_move(&mut self, player: PlayerId, unit: UnitId, target: Position) -> FeedbackStatus {
        let Some(idx) = self.owned_index(player, unit) else {
            return FeedbackStatus::Invalid;
        };
        for _ in 0..self.config.move_speed.max(1) {
            let Some(current) = self.units.get(idx).map(|u| u.position) else {
                return FeedbackStatus::Invalid;
            };
            let Some(direction) = current.direction_to(target) else {
                return FeedbackStatus::Complete;
            };
            let Some(next) = current.step(direction) else {
                return FeedbackStatus::Failed;
            };
            if self.is_occupied(next) {
                debug!(unit = unit.into_inner(), cell = %next, "Move blocked");
                return FeedbackStatus::Failed;
            }
            if let Some(u) = self.units.get_mut(idx) {
                u.position = next;
            }
        }
        match self.units.get(idx) {
            Some(u) if u.position == target => FeedbackStatus::Complete,
            Some(_) => FeedbackStatus::Incomplete,
            None => FeedbackStatus::Invalid,
        }
    }

    fn resolve_gather(
        &mut self,
        player: PlayerId,
        unit: UnitId,
        direction: Direction,
    ) -> FeedbackStatus {
        let Some(idx) = self.owned_index(player, unit) else {
            return FeedbackStatus::Invalid;
        };
        let Some(gatherer) = self.units.get(idx) else {
            return FeedbackStatus::Invalid;
        };
        if gatherer.cargo.is_some() {
            return FeedbackStatus::Failed;
        }
        let Some(cell) = gatherer.position.step(direction) else {
            return FeedbackStatus::Failed;
        };
        let gather_amount = self.config.gather_amount;
        let Some(node) = self
            .resources
            .iter_mut()
            .find(|r| r.position == cell && r.amount > 0)
        else {
            return FeedbackStatus::Failed;
        };
        let taken = gather_amount.min(node.amount);
        node.amount = node.amount.saturating_sub(taken);
        let kind = node.kind;
        if let Some(u) = self.units.get_mut(idx) {
            u.cargo = Some(Cargo {
                kind,
                amount: taken,
            });
        }
        FeedbackStatus::Complete
    }

    fn resolve_deposit(
        &mut self,
        player: PlayerId,
        unit: UnitId,
        direction: Direction,
    ) -> FeedbackStatus {
        let Some(idx) = self.owned_index(player, unit) else {
            return FeedbackStatus::Invalid;
        };
        let Some(carrier) = self.units.get(idx) else {
            return FeedbackStatus::Invalid;
        };
        let Some(cargo) = carrier.cargo else {
            return FeedbackStatus::Failed;
        };
        let Some(cell) = carrier.position.step(direction) else {
            return FeedbackStatus::Failed;
        };
        let hall_there = self
            .units
            .iter()
            .any(|u| u.owner == player && u.position == cell && self.is_town_hall(u));
        if !hall_there {
            return FeedbackStatus::Failed;
        }
        self.stockpiles
            .entry(player)
            .or_default()
            .add(cargo.kind, cargo.amount);
        if let Some(u) = self.units.get_mut(idx) {
            u.cargo = None;
        }
        FeedbackStatus::Complete
    }

    fn resolve_production(
        &mut self,
        player: PlayerId,
        producer: UnitId,
        template: TemplateId,
    ) -> FeedbackStatus {
        let Some(hall) = self
            .owned_index(player, producer)
            .and_then(|idx| self.units.get(idx))
            .filter(|u| self.is_town_hall(u))
        else {
            return FeedbackStatus::Invalid;
        };
        let Some(name) = self
            .templates
            .iter()
            .find(|t| t.id == template)
            .map(|t| t.name.clone())
        else {
            return FeedbackStatus::Invalid;
        };
        let origin = hall.position;
        let cost = self.config.production_gold_cost;
        if self.stockpile(player).gold < cost {
            return FeedbackStatus::Failed;
        }
        let Some(spawn) = Direction::ALL
            .iter()
            .filter_map(|d| origin.step(*d))
            .find(|cell| !self.is_occupied(*cell))
        else {
            return FeedbackStatus::Failed;
        };
        let Ok(id) = self.add_unit(player, &name, spawn) else {
            return FeedbackStatus::Failed;
        };
        let stock = self.stockpiles.entry(player).or_default();
        stock.gold = stock.gold.saturating_sub(cost);
        info!(
            player = player.into_inner(),
            unit = id.into_inner(),
            template = %name,
            cell = %spawn,
            "Unit produced"
        );
        FeedbackStatus::Complete
    }
}

impl Runtime for SimRuntime {
    fn turn(&self) -> u64 {
        self.turn
    }

    fn snapshot(&self, player: PlayerId) -> Result<WorldSnapshot, RuntimeError> {
        self.ensure_player(player)?;
        Ok(WorldSnapshot {
            turn: self.turn,
            player,
            units: self
                .units
                .iter()
                .filter(|u| u.owner == player)
                .map(SimUnit::view)
                .collect(),
            resources: self
                .resources
                .iter()
                .filter(|r| r.amount > 0)
                .copied()
                .collect(),
            templates: self.templates.clone(),
        })
    }

    fn command_feedback(&self, player: PlayerId, turn: u64) -> Result<FeedbackMap, RuntimeError> {
        self.ensure_player(player)?;
        Ok(self
            .history
            .get(&(player, turn))
            .cloned()
            .unwrap_or_default())
    }

    fn submit(&mut self, player: PlayerId, batch: &CommandBatch) -> Result<(), RuntimeError> {
        self.ensure_player(player)?;
        if let Some((unit, command)) = batch.iter().find(|(unit, c)| c.unit_id() != **unit) {
            return Err(RuntimeError::Rejected {
                message: format!("command {command} filed under unit {unit}"),
            });
        }
        self.pending
            .entry(player)
            .or_default()
            .extend(batch.iter().map(|(unit, command)| (*unit, *command)));
        Ok(())
    }

    fn step(&mut self) -> Result<u64, RuntimeError> {
        let turn = self.turn;
        for (player, batch) in std::mem::take(&mut self.pending) {
            let mut feedback = FeedbackMap::new();
            for (unit, command) in batch {
                let status = self.resolve(player, command);
                feedback.insert(unit, CommandResult { command, status });
            }
            self.history.insert((player, turn), feedback);
        }
        self.turn = turn.checked_add(1).ok_or_else(|| RuntimeError::Internal {
            message: "turn counter overflow".to_owned(),
        })?;
        Ok(self.turn)
    }

    fn is_terminal(&self) -> bool {
        self.config
            .goal
            .is_some_and(|goal| self.stockpiles.values().any(|s| s.meets(goal)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);

    fn world() -> (SimRuntime, UnitId, UnitId) {
        let mut sim = SimRuntime::new(SimConfig::default());
        let hall = sim.add_unit(P0, "TownHall", Position::new(1, 0)).unwrap();
        let peasant = sim.add_unit(P0, "Peasant", Position::new(0, 2)).unwrap();
        sim.add_template("Peasant").unwrap();
        (sim, hall, peasant)
    }

    fn submit_one(sim: &mut SimRuntime, command: Command) -> FeedbackStatus {
        let mut batch = CommandBatch::new();
        batch.insert(command.unit_id(), command);
        sim.submit(P0, &batch).unwrap();
        let turn = sim.turn();
        sim.step().unwrap();
        sim.command_feedback(P0, turn)
            .unwrap()
            .get(&command.unit_id())
            .unwrap()
            .status
    }

    #[test]
    fn snapshot_lists_units_in_creation_order() {
        let (mut sim, hall, peasant) = world();
        sim.add_unit(PlayerId::new(1), "Peasant", Position::new(9, 9))
            .unwrap();
        let snap = sim.snapshot(P0).unwrap();
        let ids: Vec<UnitId> = snap.units.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![hall, peasant]);
        assert_eq!(snap.templates.len(), 1);
    }

    #[test]
    fn unknown_player_is_rejected() {
        let (sim, _, _) = world();
        assert_eq!(
            sim.snapshot(PlayerId::new(7)),
            Err(RuntimeError::UnknownPlayer(PlayerId::new(7)))
        );
    }

    #[test]
    fn move_takes_one_turn_per_speed_cells() {
        let (mut sim, _, peasant) = world();
        let cmd = Command::CompoundMove {
            unit: peasant,
            x: 3,
            y: 2,
        };
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Incomplete);
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Incomplete);
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Complete);
        assert_eq!(sim.unit(peasant).unwrap().position, Position::new(3, 2));
    }

    #[test]
    fn move_into_occupied_cell_fails() {
        let (mut sim, _, peasant) = world();
        sim.add_resource(ResourceKind::Wood, Position::new(1, 2), 50)
            .unwrap();
        let cmd = Command::CompoundMove {
            unit: peasant,
            x: 2,
            y: 2,
        };
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Failed);
        assert_eq!(sim.unit(peasant).unwrap().position, Position::new(0, 2));
    }

    #[test]
    fn gather_then_deposit_fills_stockpile() {
        let (mut sim, _, peasant) = world();
        sim.add_resource(ResourceKind::Gold, Position::new(0, 3), 150)
            .unwrap();
        let gather = Command::PrimitiveGather {
            unit: peasant,
            direction: Direction::South,
        };
        assert_eq!(submit_one(&mut sim, gather), FeedbackStatus::Complete);
        assert_eq!(sim.resource_at(Position::new(0, 3)).unwrap().amount, 50);
        // Cargo slot is full.
        assert_eq!(submit_one(&mut sim, gather), FeedbackStatus::Failed);

        let walk = Command::CompoundMove {
            unit: peasant,
            x: 0,
            y: 1,
        };
        assert_eq!(submit_one(&mut sim, walk), FeedbackStatus::Complete);
        let deposit = Command::PrimitiveDeposit {
            unit: peasant,
            direction: Direction::NorthEast,
        };
        assert_eq!(submit_one(&mut sim, deposit), FeedbackStatus::Complete);
        assert_eq!(sim.stockpile(P0).gold, 100);
        assert!(sim.unit(peasant).unwrap().cargo.is_none());
    }

    #[test]
    fn deposit_without_hall_fails() {
        let (mut sim, _, peasant) = world();
        sim.add_resource(ResourceKind::Wood, Position::new(0, 3), 100)
            .unwrap();
        submit_one(
            &mut sim,
            Command::PrimitiveGather {
                unit: peasant,
                direction: Direction::South,
            },
        );
        let deposit = Command::PrimitiveDeposit {
            unit: peasant,
            direction: Direction::East,
        };
        assert_eq!(submit_one(&mut sim, deposit), FeedbackStatus::Failed);
        assert_eq!(sim.stockpile(P0), Stockpile::default());
    }

    #[test]
    fn production_spawns_next_to_hall() {
        let (mut sim, hall, _) = world();
        let template = sim.snapshot(P0).unwrap().templates.first().unwrap().id;
        let cmd = Command::PrimitiveProduction {
            producer: hall,
            template,
        };
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Complete);
        let snap = sim.snapshot(P0).unwrap();
        assert_eq!(snap.units.len(), 3);
        let newest = snap.units.last().unwrap();
        assert_eq!(newest.id, UnitId::new(2));
        assert!(newest.is_template("peasant"));
        assert!(newest.position.is_adjacent(Position::new(1, 0)));
    }

    #[test]
    fn production_needs_gold_when_priced() {
        let mut sim = SimRuntime::new(SimConfig {
            production_gold_cost: 400,
            ..SimConfig::default()
        });
        let hall = sim.add_unit(P0, "townhall", Position::new(4, 4)).unwrap();
        let template = sim.add_template("Peasant").unwrap();
        let cmd = Command::PrimitiveProduction {
            producer: hall,
            template,
        };
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Failed);
        assert_eq!(sim.units().len(), 1);
    }

    #[test]
    fn commands_for_missing_units_are_invalid() {
        let (mut sim, _, _) = world();
        let cmd = Command::CompoundMove {
            unit: UnitId::new(40),
            x: 0,
            y: 0,
        };
        assert_eq!(submit_one(&mut sim, cmd), FeedbackStatus::Invalid);
    }

    #[test]
    fn mismatched_batch_key_is_rejected() {
        let (mut sim, hall, peasant) = world();
        let mut batch = CommandBatch::new();
        batch.insert(
            hall,
            Command::CompoundMove {
                unit: peasant,
                x: 0,
                y: 0,
            },
        );
        assert!(matches!(
            sim.submit(P0, &batch),
            Err(RuntimeError::Rejected { .. })
        ));
    }

    #[test]
    fn turns_without_submissions_have_empty_feedback() {
        let (mut sim, _, _) = world();
        assert_eq!(sim.step().unwrap(), 1);
        assert!(sim.command_feedback(P0, 0).unwrap().is_empty());
    }

    #[test]
    fn goal_makes_world_terminal() {
        let mut sim = SimRuntime::new(SimConfig {
            goal: Some(Goal { gold: 0, wood: 100 }),
            ..SimConfig::default()
        });
        sim.add_unit(P0, "TownHall", Position::new(1, 0)).unwrap();
        let peasant = sim.add_unit(P0, "Peasant", Position::new(0, 1)).unwrap();
        sim.add_resource(ResourceKind::Wood, Position::new(0, 2), 100)
            .unwrap();
        assert!(!sim.is_terminal());
        submit_one(
            &mut sim,
            Command::PrimitiveGather {
                unit: peasant,
                direction: Direction::South,
            },
        );
        submit_one(
            &mut sim,
            Command::PrimitiveDeposit {
                unit: peasant,
                direction: Direction::NorthEast,
            },
        );
        assert!(sim.is_terminal());
        // The depleted node no longer shows up.
        assert!(sim.snapshot(P0).unwrap().resources.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let (mut sim, hall, _) = world();
        assert!(matches!(
            sim.add_unit_with_id(hall, P0, "Peasant", Position::new(8, 8)),
            Err(SimError::DuplicateUnit(_))
        ));
        assert!(matches!(
            sim.add_unit(P0, "Peasant", Position::new(1, 0)),
            Err(SimError::CellOccupied(_))
        ));
    }
}
