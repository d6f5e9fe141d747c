//! Error types for the decision engine.
//!
//! Every error here is recoverable at the turn-loop boundary except
//! [`EngineError`], which ends the run.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::Label;

/// A generated scenario failed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// The payload was not parseable JSON.
    #[error("malformed scenario JSON: {0}")]
    InvalidJson(String),
    /// No `{ ... }` object could be located in the response.
    #[error("no JSON object found in response")]
    NoJsonObject,
    /// A value that must be an object was something else.
    #[error("`{0}` is not a JSON object")]
    NotAnObject(String),
    /// A value that must be text was something else.
    #[error("`{0}` is not a string")]
    NotAString(String),
    /// A required key is absent.
    #[error("missing required key `{key}` in `{path}`")]
    MissingKey {
        /// Location of the object that lacks the key.
        path: String,
        /// The absent key.
        key: String,
    },
    /// One of the two choices is absent.
    #[error("missing choice {0}")]
    MissingChoice(Label),
    /// An effect value could not be accepted under the active policy.
    #[error("choice {choice}: effect `{metric}` {reason}")]
    InvalidEffect {
        /// The choice holding the effect.
        choice: Label,
        /// Metric key of the effect.
        metric: String,
        /// What is wrong with the value.
        reason: String,
    },
}

/// The text-generation service could not produce a response.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The service is not configured or could not be located.
    #[error("text generator unavailable: {0}")]
    Unavailable(String),
    /// The generator process could not be started.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Talking to the generator process failed.
    #[error("generator I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The generator process exited unsuccessfully.
    #[error("generator exited with {status}: {stderr}")]
    Failed {
        /// Exit status description.
        status: String,
        /// Captured standard error (truncated).
        stderr: String,
    },
    /// The generator produced no text.
    #[error("generator returned an empty response")]
    EmptyResponse,
    /// A scripted generator ran out of queued responses.
    #[error("no scripted responses left")]
    Exhausted,
}

/// A game configuration could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid TOML for a game.
    #[error("failed to parse game config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be written out as TOML.
    #[error("failed to serialize game config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The config parsed but violates a consistency rule.
    #[error("invalid game config: {0}")]
    Invalid(String),
    /// No built-in game has the requested id.
    #[error("unknown game `{0}`")]
    UnknownGame(String),
}

/// A run of the turn engine had to stop.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading from or writing to the console failed.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Interactive input ended before a valid choice was entered.
    #[error("input closed before a choice was made")]
    InputClosed,
    /// The game configuration cannot be played.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Generation failed and the game has no fallback scenario.
    #[error("no scenario available for turn {0}")]
    NoScenario(u32),
}
