//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `planexec-config.yaml`. Every field
//! has a default, so an empty file (or no file at all) yields a working
//! configuration for the standard peasant/town-hall scenario.
//!
//! ```yaml
//! player: 0
//! templates:
//!   town_hall: townhall
//!   peasant: peasant
//! bindings:
//!   first_symbolic_slot: 0
//! failure_policy: continue
//! runner:
//!   max_turns: 1000
//!   turn_interval_ms: 0
//! logging:
//!   level: info
//! ```

use std::path::Path;

use planexec_types::PlayerId;
use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "PLANEXEC_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level executor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecutorConfig {
    /// The player this agent controls.
    #[serde(default)]
    pub player: PlayerId,

    /// Template names used to classify units.
    #[serde(default)]
    pub templates: TemplateNames,

    /// Identifier binding settings.
    #[serde(default)]
    pub bindings: BindingConfig,

    /// What to do when the runtime reports a failed command.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Turn loop settings.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExecutorConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// [`LOG_LEVEL_ENV`] overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        Ok(config)
    }
}

/// Template names the executor classifies units by (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateNames {
    /// Template name of the town hall.
    #[serde(default = "default_town_hall")]
    pub town_hall: String,

    /// Template name of peasants, also the BUILD production template.
    #[serde(default = "default_peasant")]
    pub peasant: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            town_hall: default_town_hall(),
            peasant: default_peasant(),
        }
    }
}

/// Identifier binding settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BindingConfig {
    /// Lowest symbolic slot backfill may hand out.
    #[serde(default)]
    pub first_symbolic_slot: u32,
}

/// Reaction to a command the runtime reports as failed.
///
/// Failed commands are never retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log and count the failure; the unit no longer counts as busy and the
    /// plan may advance.
    #[default]
    Continue,
    /// Log the failure and stop taking plan steps. Commands still in
    /// progress keep being echoed.
    Halt,
}

/// Turn loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// Stop after this many turns (0 = unlimited).
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,

    /// Real-time pause between turns, in milliseconds.
    #[serde(default)]
    pub turn_interval_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            turn_interval_ms: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Apply the [`LOG_LEVEL_ENV`] override, if set and non-empty.
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.level = level;
            }
        }
    }
}

fn default_town_hall() -> String {
    String::from("townhall")
}

fn default_peasant() -> String {
    String::from("peasant")
}

const fn default_max_turns() -> u64 {
    1000
}

fn default_log_level() -> String {
    String::from("info")
}
