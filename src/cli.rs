//! CLI command implementations for Dilemma.

pub(crate) mod export;
pub(crate) mod games;
pub(crate) mod play;
pub(crate) mod validate;

mod output;
mod spinner;

use clap::ValueEnum;
use dilemma::game::{Mode, ValidationPolicy};
use dilemma::{ConfigError, EngineError, GameConfig, ScenarioError};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable transcript.
    Text,
    /// Machine-readable JSON report.
    Json,
}

/// How choices are made, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// Choices are typed at the console.
    Interactive,
    /// The generator chooses, with a random fallback.
    Auto,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Interactive => Self::Interactive,
            ModeArg::Auto => Self::Automated,
        }
    }
}

/// Validation policy, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    /// Coerce and clamp effect values.
    Repair,
    /// Require integer effect values as given.
    Reject,
}

impl From<PolicyArg> for ValidationPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Repair => Self::Repair,
            PolicyArg::Reject => Self::Reject,
        }
    }
}

/// Resolve `--game` / `--game-file` to a configuration.
///
/// # Errors
///
/// Returns an error if the game is unknown or the file is invalid.
pub(crate) fn load_game(game: &str, game_file: Option<&Path>) -> Result<GameConfig, CliError> {
    match game_file {
        Some(path) => GameConfig::load(path).map_err(Into::into),
        None => GameConfig::builtin(game).map_err(Into::into),
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ScenarioError> for CliError {
    fn from(e: ScenarioError) -> Self {
        Self::new(format!("Invalid scenario: {e}"))
    }
}
