//! Translation of symbolic actions into runtime commands.
//!
//! | Action  | Command per actor                                   |
//! |---------|-----------------------------------------------------|
//! | MOVE    | compound move to the leg's target cell              |
//! | HARVEST | primitive gather toward the resource                |
//! | DEPOSIT | primitive deposit toward the town hall              |
//! | BUILD   | one primitive production at the town hall, total    |
//!
//! Every actor is resolved through the [`IdentifierMap`] first, including
//! BUILD's actors, so a desynchronised plan is caught before anything is
//! emitted. Gather and deposit directions are computed from the unit's live
//! position when the snapshot has it, otherwise from where the planner
//! expected the unit to stand.

use planexec_types::{
    ActionKind, Command, CommandBatch, Direction, Position, SymbolicId, TemplateId, UnitId,
};
use planexec_world::WorldSnapshot;

use crate::action::{ActorRef, SymbolicAction};
use crate::bindings::{BindingError, IdentifierMap};

/// Errors that abort translation of one action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// An actor has no runtime binding: the plan and the world disagree.
    #[error("{kind} actor {symbolic} cannot be resolved: {source}")]
    Desync {
        /// Kind of the action being translated.
        kind: ActionKind,
        /// The unresolvable actor.
        symbolic: SymbolicId,
        /// The underlying lookup failure.
        source: BindingError,
    },

    /// The actor stands on its target, so no direction exists.
    #[error("{kind} actor {unit} at {at} has no direction to its own cell")]
    NoDirection {
        /// Kind of the action being translated.
        kind: ActionKind,
        /// The resolved unit.
        unit: UnitId,
        /// Where it stands.
        at: Position,
    },

    /// An action index had no matching target.
    #[error("{kind} action has no target for actor index {index}")]
    MissingTarget {
        /// Kind of the action being translated.
        kind: ActionKind,
        /// Actor index without a target.
        index: usize,
    },
}

/// Everything translation needs besides the action itself.
#[derive(Debug, Clone, Copy)]
pub struct TranslationContext<'a> {
    /// Symbolic-to-runtime bindings.
    pub bindings: &'a IdentifierMap,
    /// Runtime id of the player's town hall.
    pub town_hall: UnitId,
    /// Template used for BUILD.
    pub peasant_template: TemplateId,
    /// The world as of this turn.
    pub snapshot: &'a WorldSnapshot,
}

impl TranslationContext<'_> {
    /// Resolve an actor's symbolic id.
    fn resolve(&self, kind: ActionKind, actor: ActorRef) -> Result<UnitId, TranslateError> {
        self.bindings
            .resolve(actor.id)
            .map_err(|source| TranslateError::Desync {
                kind,
                symbolic: actor.id,
                source,
            })
    }

    /// Where the unit stands now, falling back to the planned position.
    fn position_of(&self, unit: UnitId, actor: ActorRef) -> Position {
        self.snapshot.position_of(unit).unwrap_or(actor.position)
    }

    /// Direction from the unit to `target`.
    fn direction(
        &self,
        kind: ActionKind,
        unit: UnitId,
        actor: ActorRef,
        target: Position,
    ) -> Result<Direction, TranslateError> {
        let at = self.position_of(unit, actor);
        at.direction_to(target)
            .ok_or(TranslateError::NoDirection { kind, unit, at })
    }
}

/// Translate one symbolic action into the commands to submit this turn.
///
/// Either every actor's command is produced or none is.
///
/// # Errors
///
/// Returns [`TranslateError`] if any actor fails to resolve or has no
/// direction to its target.
pub fn translate(
    action: &SymbolicAction,
    ctx: &TranslationContext<'_>,
) -> Result<CommandBatch, TranslateError> {
    let kind = action.kind();
    let mut batch = CommandBatch::new();

    for (index, actor) in action.actors().into_iter().enumerate() {
        let unit = ctx.resolve(kind, actor)?;
        let target = action.target_position(index);

        let command = match (action, target) {
            (SymbolicAction::Move { .. }, Some(to)) => Command::CompoundMove {
                unit,
                x: to.x,
                y: to.y,
            },
            (SymbolicAction::Harvest { .. }, Some(to)) => Command::PrimitiveGather {
                unit,
                direction: ctx.direction(kind, unit, actor, to)?,
            },
            (SymbolicAction::Deposit { .. }, Some(to)) => Command::PrimitiveDeposit {
                unit,
                direction: ctx.direction(kind, unit, actor, to)?,
            },
            (SymbolicAction::Build { .. }, _) => Command::PrimitiveProduction {
                producer: ctx.town_hall,
                template: ctx.peasant_template,
            },
            (_, None) => return Err(TranslateError::MissingTarget { kind, index }),
        };

        batch.insert(command.unit_id(), command);
    }

    Ok(batch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use planexec_types::{PlayerId, ResourceId, ResourceKind};
    use planexec_world::{Resource, UnitView};

    use super::*;

    const TOWN_HALL: UnitId = UnitId::new(0);
    const TEMPLATE: TemplateId = TemplateId::new(26);

    fn unit_view(id: u32, name: &str, x: i32, y: i32) -> UnitView {
        UnitView {
            id: UnitId::new(id),
            template_name: name.to_owned(),
            position: Position::new(x, y),
            cargo: None,
        }
    }

    fn world() -> WorldSnapshot {
        WorldSnapshot {
            turn: 3,
            player: PlayerId::new(0),
            units: vec![
                unit_view(0, "TownHall", 0, 0),
                unit_view(11, "Peasant", 2, 2),
                unit_view(12, "Peasant", 1, 1),
                unit_view(13, "Peasant", 4, 4),
            ],
            resources: Vec::new(),
            templates: Vec::new(),
        }
    }

    fn bindings() -> IdentifierMap {
        let mut map = IdentifierMap::new(0);
        map.bind(SymbolicId::new(1), UnitId::new(11)).unwrap();
        map.bind(SymbolicId::new(2), UnitId::new(12)).unwrap();
        map.bind(SymbolicId::new(3), UnitId::new(13)).unwrap();
        map
    }

    fn actor(id: u32, x: i32, y: i32) -> ActorRef {
        ActorRef::new(SymbolicId::new(id), Position::new(x, y))
    }

    fn run(action: &SymbolicAction) -> Result<CommandBatch, TranslateError> {
        let map = bindings();
        let snap = world();
        let ctx = TranslationContext {
            bindings: &map,
            town_hall: TOWN_HALL,
            peasant_template: TEMPLATE,
            snapshot: &snap,
        };
        translate(action, &ctx)
    }

    #[test]
    fn move_targets_absolute_cell_for_resolved_unit() {
        let batch = run(&SymbolicAction::move_to(actor(1, 2, 2), Position::new(5, 5))).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch.get(&UnitId::new(11)),
            Some(&Command::CompoundMove {
                unit: UnitId::new(11),
                x: 5,
                y: 5
            })
        );
    }

    #[test]
    fn harvest_faces_the_resource() {
        let forest = Resource::new(ResourceId::new(4), Position::new(2, 1), 100, ResourceKind::Wood);
        let batch = run(&SymbolicAction::harvest(actor(1, 2, 2), forest)).unwrap();
        assert_eq!(
            batch.get(&UnitId::new(11)),
            Some(&Command::PrimitiveGather {
                unit: UnitId::new(11),
                direction: Direction::North
            })
        );
    }

    #[test]
    fn deposit_faces_the_town_hall_from_live_position() {
        // Planner thought peasant 2 was at (0, 1); the world has it at (1, 1).
        let batch = run(&SymbolicAction::deposit(actor(2, 0, 1), Position::new(0, 0))).unwrap();
        assert_eq!(
            batch.get(&UnitId::new(12)),
            Some(&Command::PrimitiveDeposit {
                unit: UnitId::new(12),
                direction: Direction::NorthWest
            })
        );
    }

    #[test]
    fn planned_position_used_when_unit_not_in_snapshot() {
        let mut map = bindings();
        map.bind(SymbolicId::new(4), UnitId::new(99)).unwrap();
        let snap = world();
        let ctx = TranslationContext {
            bindings: &map,
            town_hall: TOWN_HALL,
            peasant_template: TEMPLATE,
            snapshot: &snap,
        };
        let batch =
            translate(&SymbolicAction::deposit(actor(4, 1, 0), Position::new(0, 0)), &ctx).unwrap();
        assert_eq!(
            batch.get(&UnitId::new(99)),
            Some(&Command::PrimitiveDeposit {
                unit: UnitId::new(99),
                direction: Direction::West
            })
        );
    }

    #[test]
    fn build_with_three_actors_emits_one_production() {
        let action = SymbolicAction::build(vec![actor(1, 2, 2), actor(2, 1, 1), actor(3, 4, 4)]);
        let batch = run(&action).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch.get(&TOWN_HALL),
            Some(&Command::PrimitiveProduction {
                producer: TOWN_HALL,
                template: TEMPLATE
            })
        );
    }

    #[test]
    fn batched_move_issues_one_command_per_actor() {
        let action = SymbolicAction::Move {
            legs: vec![
                crate::action::MoveLeg {
                    actor: actor(1, 2, 2),
                    target: Position::new(6, 6),
                },
                crate::action::MoveLeg {
                    actor: actor(3, 4, 4),
                    target: Position::new(7, 1),
                },
            ],
        };
        let batch = run(&action).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.contains_key(&UnitId::new(11)));
        assert!(batch.contains_key(&UnitId::new(13)));
    }

    #[test]
    fn unbound_actor_is_a_desync() {
        let result = run(&SymbolicAction::move_to(actor(8, 0, 0), Position::new(1, 1)));
        assert!(matches!(
            result,
            Err(TranslateError::Desync {
                kind: ActionKind::Move,
                ..
            })
        ));
    }

    #[test]
    fn unbound_build_actor_is_also_a_desync() {
        let result = run(&SymbolicAction::build(vec![actor(1, 0, 0), actor(42, 0, 0)]));
        assert!(matches!(result, Err(TranslateError::Desync { .. })));
    }

    #[test]
    fn standing_on_target_has_no_direction() {
        let result = run(&SymbolicAction::deposit(actor(1, 2, 2), Position::new(2, 2)));
        assert!(matches!(result, Err(TranslateError::NoDirection { .. })));
    }
}
