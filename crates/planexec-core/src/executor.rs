//! The plan executor: a turn-driven state machine over a [`Plan`].
//!
//! Each turn runs up to three phases:
//!
//! 1. **Initialization** (first turn only) -- find the town hall, bind the
//!    peasants present at the start, and record the peasant template used
//!    for production.
//!
//! 2. **Feedback reconciliation** (every later turn) -- echo back every
//!    command the runtime reports as still in progress. A unit left without
//!    a command would stop, and a *different* command would cancel what it
//!    was doing, so the exact same command goes back unchanged.
//!
//! 3. **Plan advancement** -- only when nothing is in progress: translate
//!    the top action and pop it. One action per turn, all of its commands
//!    in the same turn.
//!
//! Before phases 2 and 3 the identifier mapping is backfilled from the live
//! unit list so units that appeared mid-session (freshly produced peasants)
//! can be resolved.
//!
//! # Failure handling
//!
//! Failed commands are never retried. Under [`FailurePolicy::Continue`] they
//! are logged and the unit simply stops counting as busy; under
//! [`FailurePolicy::Halt`] the executor also stops taking plan steps.
//! A translation error leaves the plan untouched: the top action is only
//! popped once all of its commands have been built.

use planexec_types::{CommandBatch, FeedbackMap, SymbolicId, TemplateId, UnitId};
use planexec_world::{Entity, Peasant, TownHall, WorldSnapshot};
use tracing::{debug, error, info, warn};

use crate::bindings::{BindingError, IdentifierMap};
use crate::config::{ExecutorConfig, FailurePolicy};
use crate::controller::{ExecutionReport, FailureRecord, PlanOutcome, TurnController};
use crate::plan::Plan;
use crate::translate::{self, TranslateError, TranslationContext};

/// Errors raised while executing a plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    /// The player has no unit of the configured town hall template.
    #[error("no town hall found (template {template:?})")]
    NoTownHall {
        /// The template name searched for.
        template: String,
    },

    /// The player has no production template for peasants.
    #[error("no peasant production template found (template {template:?})")]
    NoPeasantTemplate {
        /// The template name searched for.
        template: String,
    },

    /// Initialization was requested twice.
    #[error("executor already initialized")]
    AlreadyInitialized,

    /// A turn was requested before initialization.
    #[error("executor not initialized")]
    NotInitialized,

    /// The identifier mapping could not be extended.
    #[error("binding error: {source}")]
    Binding {
        /// The underlying binding error.
        #[from]
        source: BindingError,
    },

    /// The top action could not be translated this turn.
    #[error("translation error: {source}")]
    Translate {
        /// The underlying translation error.
        #[from]
        source: TranslateError,
    },
}

impl ExecutorError {
    /// Whether the session cannot make progress after this error.
    ///
    /// Only translation errors are turn-local: the plan and the mapping are
    /// left as they were and the next turn may succeed.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Translate { .. })
    }
}

/// What initialization discovered about the world.
#[derive(Debug, Clone, Copy)]
struct Setup {
    /// The player's town hall.
    town_hall: UnitId,
    /// Template for producing peasants.
    peasant_template: TemplateId,
}

/// Running counters for the final report.
#[derive(Debug, Default)]
struct Stats {
    turns: u64,
    actions_executed: usize,
    commands_issued: usize,
    resubmissions: usize,
    failures: Vec<FailureRecord>,
}

/// Executes a plan one turn at a time.
#[derive(Debug)]
pub struct PlanExecutor {
    /// Executor settings.
    config: ExecutorConfig,
    /// Remaining work.
    plan: Plan,
    /// Symbolic-to-runtime ids.
    bindings: IdentifierMap,
    /// Set by initialization.
    setup: Option<Setup>,
    /// Set when a failure stops advancement under [`FailurePolicy::Halt`].
    halted: bool,
    /// Commands returned by the most recent turn.
    last_batch: CommandBatch,
    /// Report counters.
    stats: Stats,
}

impl PlanExecutor {
    /// Create an executor for `plan`.
    pub const fn new(plan: Plan, config: ExecutorConfig) -> Self {
        let first_slot = config.bindings.first_symbolic_slot;
        Self {
            config,
            plan,
            bindings: IdentifierMap::new(first_slot),
            setup: None,
            halted: false,
            last_batch: CommandBatch::new(),
            stats: Stats {
                turns: 0,
                actions_executed: 0,
                commands_issued: 0,
                resubmissions: 0,
                failures: Vec::new(),
            },
        }
    }

    /// Remaining plan.
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Current identifier mapping.
    pub const fn bindings(&self) -> &IdentifierMap {
        &self.bindings
    }

    /// The town hall found at initialization.
    pub fn town_hall(&self) -> Option<UnitId> {
        self.setup.map(|s| s.town_hall)
    }

    /// The peasant template found at initialization.
    pub fn peasant_template(&self) -> Option<TemplateId> {
        self.setup.map(|s| s.peasant_template)
    }

    /// Whether a failure has stopped plan advancement.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// The executor's configuration.
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Classify the world: town hall, starting peasants, peasant template.
    fn initialize(&mut self, snapshot: &WorldSnapshot) -> Result<Setup, ExecutorError> {
        let names = &self.config.templates;

        let mut halls = snapshot.units_of_template(&names.town_hall).map(TownHall::from);
        let hall = halls.next().ok_or_else(|| ExecutorError::NoTownHall {
            template: names.town_hall.clone(),
        })?;
        if halls.next().is_some() {
            warn!(town_hall = %hall.id(), "more than one town hall; using the first");
        }

        let peasant_template = snapshot
            .template_named(&names.peasant)
            .map(|t| t.id)
            .ok_or_else(|| ExecutorError::NoPeasantTemplate {
                template: names.peasant.clone(),
            })?;

        // The planner planned against the starting world, so the peasants
        // present now keep their runtime ids as symbolic ids.
        for peasant in snapshot.units_of_template(&names.peasant).map(Peasant::from) {
            let unit = peasant.id();
            self.bindings
                .bind(SymbolicId::new(unit.into_inner()), unit)?;
        }

        info!(
            player = %snapshot.player,
            town_hall = %hall.id(),
            peasants = self.bindings.len(),
            %peasant_template,
            "executor initialized"
        );

        Ok(Setup {
            town_hall: hall.id(),
            peasant_template,
        })
    }

    /// Bind any unit the mapping has not seen yet.
    fn backfill(&mut self, snapshot: &WorldSnapshot) -> Result<(), ExecutorError> {
        let added = self.bindings.backfill(snapshot.units.iter().map(|u| u.id))?;
        if !added.is_empty() {
            info!(turn = snapshot.turn, added = added.len(), "new units bound");
        }
        Ok(())
    }

    /// Phase 2: collect commands to echo and record failures.
    fn reconcile(&mut self, turn: u64, feedback: &FeedbackMap) -> CommandBatch {
        let previous_turn = turn.saturating_sub(1);
        let mut held = CommandBatch::new();

        for (unit, result) in feedback {
            debug!(
                turn = previous_turn,
                %unit,
                command = %result.command,
                status = ?result.status,
                "command feedback"
            );

            if result.status.is_pending() {
                held.insert(result.command.unit_id(), result.command);
            } else if result.status.is_failure() {
                warn!(
                    turn = previous_turn,
                    %unit,
                    command = %result.command,
                    status = ?result.status,
                    "command failed, not retrying"
                );
                self.stats.failures.push(FailureRecord {
                    turn: previous_turn,
                    unit: *unit,
                    command: result.command,
                    status: result.status,
                });
                if self.config.failure_policy == FailurePolicy::Halt && !self.halted {
                    error!(turn, %unit, "halting plan execution after command failure");
                    self.halted = true;
                }
            }
        }

        held
    }

    /// Phase 3: translate and pop the top action.
    fn advance(&mut self, setup: Setup, snapshot: &WorldSnapshot) -> Result<CommandBatch, ExecutorError> {
        let Some(action) = self.plan.peek() else {
            return Ok(CommandBatch::new());
        };

        let ctx = TranslationContext {
            bindings: &self.bindings,
            town_hall: setup.town_hall,
            peasant_template: setup.peasant_template,
            snapshot,
        };
        let batch = translate::translate(action, &ctx)?;

        info!(
            turn = snapshot.turn,
            %action,
            commands = batch.len(),
            remaining = self.plan.len().saturating_sub(1),
            "plan step issued"
        );

        self.plan.pop();
        self.stats.actions_executed = self.stats.actions_executed.saturating_add(1);
        self.stats.commands_issued = self.stats.commands_issued.saturating_add(batch.len());
        Ok(batch)
    }

    /// Remember what was returned this turn.
    fn record(&mut self, batch: CommandBatch) -> CommandBatch {
        self.last_batch.clone_from(&batch);
        batch
    }

    /// Start-of-turn bookkeeping.
    fn begin_turn(&mut self) {
        self.stats.turns = self.stats.turns.saturating_add(1);
        self.last_batch.clear();
    }
}

impl TurnController for PlanExecutor {
    fn on_init(&mut self, snapshot: &WorldSnapshot) -> Result<CommandBatch, ExecutorError> {
        if self.setup.is_some() {
            return Err(ExecutorError::AlreadyInitialized);
        }
        self.begin_turn();

        let setup = self.initialize(snapshot)?;
        self.setup = Some(setup);
        self.backfill(snapshot)?;

        let batch = self.advance(setup, snapshot)?;
        Ok(self.record(batch))
    }

    fn on_turn(
        &mut self,
        snapshot: &WorldSnapshot,
        feedback: &FeedbackMap,
    ) -> Result<CommandBatch, ExecutorError> {
        let setup = self.setup.ok_or(ExecutorError::NotInitialized)?;
        self.begin_turn();
        self.backfill(snapshot)?;

        let held = self.reconcile(snapshot.turn, feedback);
        if !held.is_empty() {
            debug!(
                turn = snapshot.turn,
                in_progress = held.len(),
                "waiting on in-progress commands"
            );
            self.stats.resubmissions = self.stats.resubmissions.saturating_add(held.len());
            return Ok(self.record(held));
        }

        if self.halted {
            return Ok(self.record(CommandBatch::new()));
        }

        let batch = self.advance(setup, snapshot)?;
        Ok(self.record(batch))
    }

    fn on_end(&mut self, snapshot: &WorldSnapshot) -> ExecutionReport {
        let outcome = if self.halted {
            PlanOutcome::Halted
        } else if self.is_finished() {
            PlanOutcome::Completed
        } else {
            PlanOutcome::Unfinished
        };

        info!(
            turn = snapshot.turn,
            ?outcome,
            remaining = self.plan.len(),
            failures = self.stats.failures.len(),
            "plan execution ended"
        );

        ExecutionReport {
            outcome,
            turns: self.stats.turns,
            actions_executed: self.stats.actions_executed,
            commands_issued: self.stats.commands_issued,
            resubmissions: self.stats.resubmissions,
            failures: self.stats.failures.clone(),
            remaining_actions: self.plan.len(),
            bindings: self.bindings.len(),
        }
    }

    fn is_finished(&self) -> bool {
        self.setup.is_some() && self.last_batch.is_empty() && (self.plan.is_empty() || self.halted)
    }
}
