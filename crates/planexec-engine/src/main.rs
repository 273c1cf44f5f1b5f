//! Plan execution engine binary.
//!
//! Loads the executor configuration and a JSON scenario (starting world plus
//! plan), builds the in-memory runtime, and drives the plan executor turn by
//! turn until the plan completes, the scenario ends, or the turn limit is
//! hit. The final run result is printed to stdout as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `planexec-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load the scenario named on the command line or in `PLANEXEC_SCENARIO`
//! 4. Build the runtime and the executor
//! 5. Run the turn loop
//! 6. Log and print the result

mod error;
mod log_callback;

use std::path::{Path, PathBuf};

use planexec_core::runner::{self, run_plan};
use planexec_core::{ExecutorConfig, PlanExecutor};
use planexec_sim::Scenario;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LogCallback;

/// Configuration file, relative to the working directory.
const CONFIG_PATH: &str = "planexec-config.yaml";

/// Environment variable naming the scenario file.
const SCENARIO_ENV: &str = "PLANEXEC_SCENARIO";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the scenario, or the run fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration first; it carries the default log level.
    let config_path = Path::new(CONFIG_PATH);
    let config_found = config_path.exists();
    let config = if config_found {
        ExecutorConfig::from_file(config_path)?
    } else {
        ExecutorConfig::parse("")?
    };

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("planexec-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        player = %config.player,
        town_hall_template = config.templates.town_hall,
        peasant_template = config.templates.peasant,
        failure_policy = ?config.failure_policy,
        max_turns = config.runner.max_turns,
        turn_interval_ms = config.runner.turn_interval_ms,
        "Configuration loaded"
    );

    // 3. Load the scenario.
    let path = scenario_path(std::env::args().nth(1), std::env::var(SCENARIO_ENV).ok())?;
    let scenario = Scenario::from_file(&path).map_err(EngineError::from)?;
    info!(
        path = %path.display(),
        units = scenario.units.len(),
        resources = scenario.resources.len(),
        plan_steps = scenario.plan.len(),
        "Scenario loaded"
    );

    // 4. Build the runtime and the executor.
    let mut runtime = scenario.build_runtime().map_err(EngineError::from)?;
    let plan = scenario.plan().map_err(EngineError::from)?;
    let player = config.player;
    let runner_config = config.runner.clone();
    let mut executor = PlanExecutor::new(plan, config);
    let mut callback = LogCallback::new();

    // 5. Run.
    let result = run_plan(
        &mut runtime,
        &mut executor,
        player,
        &runner_config,
        &mut callback,
    )
    .await
    .map_err(EngineError::from)?;

    // 6. Log and print.
    runner::log_run_end(&result);
    info!(
        end_reason = ?result.end_reason,
        submitted = callback.submitted(),
        idle_turns = callback.idle_turns(),
        "planexec-engine shutdown complete"
    );
    let rendered = serde_json::to_string_pretty(&result).map_err(EngineError::from)?;
    println!("{rendered}");

    Ok(())
}

/// Pick the scenario path: command-line argument first, then environment.
fn scenario_path(arg: Option<String>, env: Option<String>) -> Result<PathBuf, EngineError> {
    arg.or(env)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .ok_or(EngineError::MissingScenario { env: SCENARIO_ENV })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn argument_wins_over_environment() {
        let path = scenario_path(Some("a.json".to_owned()), Some("b.json".to_owned())).unwrap();
        assert_eq!(path, PathBuf::from("a.json"));
    }

    #[test]
    fn environment_is_the_fallback() {
        let path = scenario_path(None, Some("b.json".to_owned())).unwrap();
        assert_eq!(path, PathBuf::from("b.json"));
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(matches!(
            scenario_path(None, Some("  ".to_owned())),
            Err(EngineError::MissingScenario { .. })
        ));
    }
}
