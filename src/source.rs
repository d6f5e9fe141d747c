//! Scenario source: generated scenarios with a static fallback.
//!
//! A failed or invalid generation is never retried. The turn uses one of the
//! game's fallback scenarios instead.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::game::{GameState, Label, Scenario, parse_scenario};
use crate::generator::{TextGenerator, analysis_prompt, scenario_prompt};

/// Where a turn's scenario came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScenarioOrigin {
    /// Produced by the generator and accepted by validation.
    Generated,
    /// Taken from the game's fallback list.
    Fallback {
        /// Why generation was not used.
        reason: String,
    },
}

/// A scenario together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedScenario {
    /// The scenario to present.
    pub scenario: Scenario,
    /// Where it came from.
    pub origin: ScenarioOrigin,
}

/// Obtain the scenario for the current turn.
///
/// Asks `generator` (when present) and validates the response under the
/// game's policy. Any failure substitutes a random fallback scenario.
/// Returns `None` only if generation failed and the game has no fallback.
pub fn fetch_scenario<G, R>(
    config: &GameConfig,
    state: &GameState,
    generator: Option<&mut G>,
    rng: &mut R,
) -> Option<SourcedScenario>
where
    G: TextGenerator + ?Sized,
    R: Rng + ?Sized,
{
    let reason = match generator {
        None => "no text generator".to_string(),
        Some(generator) => {
            let prompt = scenario_prompt(config, state);
            match generator.generate(&prompt) {
                Ok(raw) => match parse_scenario(&raw, &config.metrics, config.validation) {
                    Ok(scenario) => {
                        debug!(turn = state.turn, generator = generator.name(), "scenario.generated");
                        return Some(SourcedScenario {
                            scenario,
                            origin: ScenarioOrigin::Generated,
                        });
                    }
                    Err(e) => {
                        warn!(turn = state.turn, error = %e, "scenario.discarded");
                        e.to_string()
                    }
                },
                Err(e) => {
                    warn!(turn = state.turn, error = %e, "scenario.generation_failed");
                    e.to_string()
                }
            }
        }
    };

    fallback_scenario(config, rng).map(|scenario| SourcedScenario {
        scenario: scenario.clone(),
        origin: ScenarioOrigin::Fallback { reason },
    })
}

/// Pick one of the game's fallback scenarios uniformly at random.
pub fn fallback_scenario<'c, R: Rng + ?Sized>(config: &'c GameConfig, rng: &mut R) -> Option<&'c Scenario> {
    config.fallback_scenarios.choose(rng)
}

/// Ask for a short analysis of the choice just made.
///
/// Returns `None` if the game does not request analyses, there is no
/// generator, or the request fails.
pub fn fetch_analysis<G: TextGenerator + ?Sized>(
    config: &GameConfig,
    scenario: &Scenario,
    label: Label,
    generator: Option<&mut G>,
) -> Option<String> {
    if !config.prompts.analysis {
        return None;
    }
    let generator = generator?;
    match generator.generate(&analysis_prompt(config, scenario, label)) {
        Ok(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Err(e) => {
            warn!(error = %e, "analysis.omitted");
            None
        }
    }
}
