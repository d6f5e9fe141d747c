//! Game configuration.
//!
//! A game is a value, not a code path: metric names, bounds, prompt texts,
//! outcome messages and fallback scenarios all live in a [`GameConfig`].
//! The built-in games are presets; custom games load from TOML.

mod presets;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{
    DEFAULT_INITIAL_VALUE, DEFAULT_MAX_TURNS, GameState, METRIC_MAX, METRIC_MIN, MetricDef, Mode,
    Scenario, Thresholds, Tier, ValidationPolicy,
};

pub use presets::{BUILTIN_GAMES, doge_audit, shadow_government};

/// Messages shown when a run ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcomes {
    /// Shown for [`Tier::Best`].
    pub best: String,
    /// Shown for [`Tier::Middling`].
    pub middling: String,
    /// Shown for [`Tier::Worst`].
    pub worst: String,
    /// Shown when a metric breaches a bound and the run stops early.
    pub compromised: String,
}

impl Outcomes {
    /// Message for a tier.
    #[must_use]
    pub fn message(&self, tier: Tier) -> &str {
        match tier {
            Tier::Best => &self.best,
            Tier::Middling => &self.middling,
            Tier::Worst => &self.worst,
        }
    }
}

/// Prompt texts sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompts {
    /// Include current metric values in scenario requests.
    #[serde(default)]
    pub include_state: bool,
    /// Request a short analysis after each choice.
    #[serde(default)]
    pub analysis: bool,
    /// System role for scenario generation.
    pub scenario_system: String,
    /// Thematic brief opening every scenario request.
    pub scenario_brief: String,
    /// System role for the automated chooser.
    pub chooser_system: String,
    /// Question the chooser answers with `A` or `B`.
    pub chooser_goal: String,
    /// System role for post-choice analysis.
    pub analyst_system: String,
}

/// Everything that distinguishes one game from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Short identifier (e.g. `doge-audit`).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Starting value of every metric.
    #[serde(default = "default_initial_value")]
    pub initial_value: i32,
    /// Number of turns in a full run.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Treatment of generated effect values.
    #[serde(default)]
    pub validation: ValidationPolicy,
    /// End the run as soon as a metric reaches 0 or 100.
    #[serde(default)]
    pub end_on_breach: bool,
    /// Lines printed before the first turn.
    #[serde(default)]
    pub intro: Vec<String>,
    /// Final assessment cut-offs.
    #[serde(default)]
    pub thresholds: Thresholds,
    /// End-of-run messages.
    pub outcomes: Outcomes,
    /// Generator prompt texts.
    pub prompts: Prompts,
    /// Tracked metrics, in display order.
    pub metrics: Vec<MetricDef>,
    /// Scenarios used whenever generation fails.
    pub fallback_scenarios: Vec<Scenario>,
}

const fn default_initial_value() -> i32 {
    DEFAULT_INITIAL_VALUE
}

const fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl GameConfig {
    /// Look up a built-in game by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownGame`] if no preset has this id.
    pub fn builtin(id: &str) -> Result<Self, ConfigError> {
        match id {
            "doge-audit" | "doge" => Ok(doge_audit()),
            "shadow-government" | "shadow" => Ok(shadow_government()),
            other => Err(ConfigError::UnknownGame(other.to_string())),
        }
    }

    /// Parse and validate a TOML game definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid game or fails
    /// [`GameConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML game definition from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid game.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render this game as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.is_empty() {
            return Err(invalid("at least one metric is required"));
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if metric.key.trim().is_empty() {
                return Err(invalid("metric keys must not be empty"));
            }
            if !seen.insert(metric.key.as_str()) {
                return Err(invalid(format!("duplicate metric key `{}`", metric.key)));
            }
        }

        if self.max_turns == 0 {
            return Err(invalid("max_turns must be at least 1"));
        }
        if !(METRIC_MIN..=METRIC_MAX).contains(&self.initial_value) {
            return Err(invalid(format!(
                "initial_value {} is outside [{METRIC_MIN}, {METRIC_MAX}]",
                self.initial_value
            )));
        }
        if self.thresholds.best < self.thresholds.middling {
            return Err(invalid(format!(
                "best threshold {} is below middling threshold {}",
                self.thresholds.best, self.thresholds.middling
            )));
        }

        if self.fallback_scenarios.is_empty() {
            return Err(invalid("at least one fallback scenario is required"));
        }
        for (i, scenario) in self.fallback_scenarios.iter().enumerate() {
            for (label, choice) in scenario.iter_choices() {
                if let Some(key) = choice.effects.keys().find(|k| !seen.contains(k.as_str())) {
                    return Err(invalid(format!(
                        "fallback scenario {} choice {label} names unknown metric `{key}`",
                        i + 1
                    )));
                }
            }
        }

        Ok(())
    }

    /// Display label for a metric key, or the key itself if unknown.
    #[must_use]
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.metrics
            .iter()
            .find(|m| m.key == key)
            .map_or(key, |m| m.label.as_str())
    }

    /// Fresh state for a new run.
    #[must_use]
    pub fn initial_state(&self, mode: Mode) -> GameState {
        GameState::new(&self.metrics, self.initial_value, self.max_turns, mode)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
