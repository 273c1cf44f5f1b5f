//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the run so that
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: planexec_core::config::ConfigError,
    },

    /// The scenario could not be loaded or built.
    #[error("scenario error: {source}")]
    Scenario {
        /// The underlying simulator error.
        #[from]
        source: planexec_sim::SimError,
    },

    /// No scenario path was given.
    #[error("no scenario given: pass a path or set {env}")]
    MissingScenario {
        /// The environment variable consulted.
        env: &'static str,
    },

    /// The run ended with an error.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: planexec_core::runner::RunnerError,
    },

    /// The result could not be rendered.
    #[error("report error: {source}")]
    Report {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
