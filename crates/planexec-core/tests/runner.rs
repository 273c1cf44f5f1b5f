//! Tests for the async turn loop.
//!
//! Each run plays a small scenario on the in-memory simulator through
//! `run_plan` and checks why the loop stopped and what the report says.

#![allow(clippy::unwrap_used)]

use planexec_core::config::{FailurePolicy, RunnerConfig};
use planexec_core::controller::PlanOutcome;
use planexec_core::runner::{NoOpCallback, RunEndReason, RunnerError, TurnCallback, run_plan};
use planexec_core::{
    ActorRef, ExecutorConfig, ExecutorError, Plan, PlanExecutor, SymbolicAction,
};
use planexec_sim::{Goal, Scenario, SimConfig, SimRuntime};
use planexec_types::{
    Command, CommandBatch, PlayerId, Position, ResourceId, ResourceKind, SymbolicId, UnitId,
};
use planexec_world::Resource;

const P0: PlayerId = PlayerId::new(0);
const HALL_AT: Position = Position::new(1, 0);
const FOREST_AT: Position = Position::new(5, 4);

fn village(config: SimConfig) -> SimRuntime {
    let mut sim = SimRuntime::new(config);
    sim.add_unit(P0, "TownHall", HALL_AT).unwrap();
    sim.add_unit(P0, "Peasant", Position::new(0, 2)).unwrap();
    sim.add_resource(ResourceKind::Wood, FOREST_AT, 400).unwrap();
    sim.add_template("Peasant").unwrap();
    sim
}

fn fast() -> SimConfig {
    SimConfig {
        move_speed: 100,
        ..SimConfig::default()
    }
}

fn actor(id: u32, x: i32, y: i32) -> ActorRef {
    ActorRef::new(SymbolicId::new(id), Position::new(x, y))
}

fn wood_run() -> Vec<SymbolicAction> {
    vec![
        SymbolicAction::move_to(actor(1, 0, 2), Position::new(5, 5)),
        SymbolicAction::harvest(
            actor(1, 5, 5),
            Resource::new(ResourceId::new(0), FOREST_AT, 400, ResourceKind::Wood),
        ),
        SymbolicAction::move_to(actor(1, 5, 5), Position::new(0, 0)),
        SymbolicAction::deposit(actor(1, 0, 0), HALL_AT),
    ]
}

fn executor(actions: Vec<SymbolicAction>, config: ExecutorConfig) -> PlanExecutor {
    PlanExecutor::new(Plan::from_execution_order(actions).unwrap(), config)
}

const fn limit(max_turns: u64) -> RunnerConfig {
    RunnerConfig {
        max_turns,
        turn_interval_ms: 0,
    }
}

/// Keeps every submitted batch.
#[derive(Default)]
struct Recorder {
    batches: Vec<(u64, CommandBatch)>,
}

impl TurnCallback for Recorder {
    fn on_turn(&mut self, turn: u64, batch: &CommandBatch) {
        self.batches.push((turn, batch.clone()));
    }
}

#[tokio::test]
async fn wood_run_completes_the_plan() {
    let mut sim = village(fast());
    let mut exec = executor(wood_run(), ExecutorConfig::default());
    let mut recorder = Recorder::default();

    let result = run_plan(&mut sim, &mut exec, P0, &limit(50), &mut recorder)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::PlanComplete);
    assert_eq!(result.report.outcome, PlanOutcome::Completed);
    assert_eq!(result.total_turns, 5);
    assert_eq!(result.turn_errors, 0);
    assert_eq!(result.report.commands_issued, 4);
    assert_eq!(result.report.remaining_actions, 0);
    assert_eq!(sim.stockpile(P0).wood, 100);

    let turns: Vec<u64> = recorder.batches.iter().map(|(t, _)| *t).collect();
    assert_eq!(turns, vec![0, 1, 2, 3, 4]);
    assert!(recorder.batches.last().unwrap().1.is_empty());
}

#[tokio::test]
async fn turn_limit_stops_a_long_walk() {
    let mut sim = village(SimConfig::default());
    let walk = vec![SymbolicAction::move_to(actor(1, 0, 2), Position::new(0, 9))];
    let mut exec = executor(walk, ExecutorConfig::default());

    let result = run_plan(&mut sim, &mut exec, P0, &limit(3), &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::MaxTurnsReached);
    assert_eq!(result.total_turns, 3);
    assert_eq!(result.report.outcome, PlanOutcome::Unfinished);
    assert_eq!(result.report.commands_issued, 1);
    assert_eq!(result.report.resubmissions, 2);
    assert_eq!(
        sim.unit(UnitId::new(1)).unwrap().position,
        Position::new(0, 5)
    );
}

#[tokio::test]
async fn goal_reached_ends_the_run() {
    let mut sim = village(SimConfig {
        goal: Some(Goal { gold: 0, wood: 100 }),
        ..fast()
    });
    let mut actions = wood_run();
    actions.push(SymbolicAction::move_to(actor(1, 0, 0), Position::new(0, 6)));
    let mut exec = executor(actions, ExecutorConfig::default());

    let result = run_plan(&mut sim, &mut exec, P0, &limit(50), &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::RuntimeTerminal);
    assert_eq!(result.total_turns, 5);
    assert_eq!(result.report.outcome, PlanOutcome::Unfinished);
}

#[tokio::test]
async fn unbound_actor_errors_are_counted_not_fatal() {
    let mut sim = village(fast());
    let stray = vec![SymbolicAction::move_to(actor(9, 0, 2), Position::new(3, 3))];
    let mut exec = executor(stray, ExecutorConfig::default());

    let result = run_plan(&mut sim, &mut exec, P0, &limit(4), &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::MaxTurnsReached);
    assert_eq!(result.turn_errors, 4);
    assert_eq!(result.report.remaining_actions, 1);
    assert_eq!(result.report.commands_issued, 0);
}

#[tokio::test]
async fn missing_peasant_template_aborts_the_run() {
    let mut sim = SimRuntime::new(fast());
    sim.add_unit(P0, "TownHall", HALL_AT).unwrap();
    let mut exec = executor(wood_run(), ExecutorConfig::default());

    let err = run_plan(&mut sim, &mut exec, P0, &limit(10), &mut NoOpCallback)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunnerError::Executor {
            source: ExecutorError::NoPeasantTemplate { .. }
        }
    ));
}

#[tokio::test]
async fn halt_policy_reports_the_failure() {
    let mut sim = village(fast());
    let actions = vec![
        SymbolicAction::move_to(actor(1, 0, 2), HALL_AT),
        SymbolicAction::move_to(actor(1, 1, 1), Position::new(3, 3)),
    ];
    let config = ExecutorConfig {
        failure_policy: FailurePolicy::Halt,
        ..ExecutorConfig::default()
    };
    let mut exec = executor(actions, config);

    let result = run_plan(&mut sim, &mut exec, P0, &limit(10), &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::PlanComplete);
    assert_eq!(result.report.outcome, PlanOutcome::Halted);
    assert_eq!(result.report.remaining_actions, 1);
    let failure = result.report.failures.first().unwrap();
    assert_eq!(
        failure.command,
        Command::CompoundMove {
            unit: UnitId::new(1),
            x: 1,
            y: 0,
        }
    );
}

#[tokio::test]
async fn scenario_file_drives_a_full_run() {
    let json = r#"{
        "config": { "move_speed": 100, "goal": { "wood": 100 } },
        "units": [
            { "template": "TownHall", "position": { "x": 1, "y": 0 } },
            { "template": "Peasant", "position": { "x": 0, "y": 2 } }
        ],
        "resources": [
            { "kind": "wood", "position": { "x": 5, "y": 4 }, "amount": 400 }
        ],
        "templates": ["Peasant"],
        "plan": [
            { "type": "move", "legs": [{
                "actor": { "id": 1, "position": { "x": 0, "y": 2 } },
                "target": { "x": 5, "y": 5 } }] },
            { "type": "harvest", "legs": [{
                "actor": { "id": 1, "position": { "x": 5, "y": 5 } },
                "resource": { "id": 0, "position": { "x": 5, "y": 4 },
                              "amount": 400, "kind": "wood" } }] },
            { "type": "move", "legs": [{
                "actor": { "id": 1, "position": { "x": 5, "y": 5 } },
                "target": { "x": 0, "y": 0 } }] },
            { "type": "deposit",
              "actors": [{ "id": 1, "position": { "x": 0, "y": 0 } }],
              "town_hall": { "x": 1, "y": 0 } }
        ]
    }"#;
    let scenario = Scenario::from_json(json).unwrap();
    let mut sim = scenario.build_runtime().unwrap();
    let mut exec = PlanExecutor::new(scenario.plan().unwrap(), ExecutorConfig::default());

    let result = run_plan(&mut sim, &mut exec, scenario.player, &limit(20), &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::PlanComplete);
    assert_eq!(result.report.actions_executed, 4);
    assert_eq!(sim.stockpile(P0).wood, 100);
}

#[tokio::test]
async fn bundled_demo_builds_a_second_peasant_and_reaches_its_goal() {
    let scenario = Scenario::from_json(include_str!("../../../demos/wood-run.json")).unwrap();
    let mut sim = scenario.build_runtime().unwrap();
    let mut exec = PlanExecutor::new(scenario.plan().unwrap(), ExecutorConfig::default());

    let result = run_plan(&mut sim, &mut exec, P0, &limit(100), &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, RunEndReason::PlanComplete);
    assert_eq!(result.report.outcome, PlanOutcome::Completed);
    assert_eq!(result.report.actions_executed, 9);
    assert!(result.report.failures.is_empty());
    assert_eq!(result.report.bindings, 3);
    assert_eq!(result.total_turns, 18);
    assert_eq!(sim.stockpile(P0).wood, 300);
}
