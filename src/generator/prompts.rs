//! Prompt builders for scenario, chooser and analysis requests.

#![allow(clippy::format_push_string)]

use crate::config::GameConfig;
use crate::game::{EFFECT_MAX, EFFECT_MIN, GameState, Label, METRIC_MAX, Scenario};
use crate::generator::{
    ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE, CHOOSER_MAX_TOKENS, CHOOSER_TEMPERATURE, Prompt,
    SCENARIO_MAX_TOKENS, SCENARIO_TEMPERATURE,
};
use crate::render::format_effects;

/// Request a new scenario as strict JSON.
#[must_use]
pub fn scenario_prompt(config: &GameConfig, state: &GameState) -> Prompt {
    let mut user = String::new();

    if config.prompts.include_state {
        user.push_str(&state_block(config, state));
        user.push_str(&format!("- Turn: {}/{}\n\n", state.turn, state.max_turns));
    }

    user.push_str(&config.prompts.scenario_brief);
    user.push_str(&format!(
        "\n\nIMPORTANT: All effect values must be integers between {EFFECT_MIN} and +{EFFECT_MAX}.\n\n"
    ));
    user.push_str("Return exactly this JSON structure:\n");
    user.push_str(&schema_block(config));

    Prompt {
        system: config.prompts.scenario_system.clone(),
        user,
        temperature: SCENARIO_TEMPERATURE,
        max_tokens: SCENARIO_MAX_TOKENS,
    }
}

/// Ask for a strategic pick between the two choices.
#[must_use]
pub fn chooser_prompt(config: &GameConfig, state: &GameState, scenario: &Scenario) -> Prompt {
    let mut user = state_block(config, state);
    user.push_str(&format!("\nScenario: {}\n", scenario.description));

    for (label, choice) in scenario.iter_choices() {
        user.push_str(&format!("\nChoice {label}: {}\n", choice.text));
        user.push_str(&format!("Effects {label}: {}\n", format_effects(config, choice)));
        if let Some(reasoning) = &choice.reasoning {
            user.push_str(&format!("Reasoning {label}: {reasoning}\n"));
        }
    }

    user.push_str(&format!("\n{} Return only A or B.", config.prompts.chooser_goal));

    Prompt {
        system: config.prompts.chooser_system.clone(),
        user,
        temperature: CHOOSER_TEMPERATURE,
        max_tokens: CHOOSER_MAX_TOKENS,
    }
}

/// Ask for a short analysis of the choice just made.
#[must_use]
pub fn analysis_prompt(config: &GameConfig, scenario: &Scenario, label: Label) -> Prompt {
    let choice = scenario.choice(label);
    let user = format!(
        "Given this scenario and choice, provide a brief analysis of the implications:\n\n\
         Scenario: {}\n\
         Choice made: {}\n\
         Effects: {}\n\n\
         Provide a brief (2-3 sentence) strategic analysis of this decision and its implications.",
        scenario.description,
        choice.text,
        format_effects(config, choice),
    );

    Prompt {
        system: config.prompts.analyst_system.clone(),
        user,
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    }
}

/// `Current game state:` followed by one line per metric.
fn state_block(config: &GameConfig, state: &GameState) -> String {
    let mut block = String::from("Current game state:\n");
    for metric in state.metrics() {
        block.push_str(&format!(
            "- {}: {}/{METRIC_MAX}\n",
            config.label_for(metric.key()),
            metric.value()
        ));
    }
    block
}

/// The JSON shape the model must return, spelled out with this game's metrics.
fn schema_block(config: &GameConfig) -> String {
    let effects = config
        .metrics
        .iter()
        .map(|m| format!("                \"{}\": integer ({EFFECT_MIN} to +{EFFECT_MAX})", m.key))
        .collect::<Vec<_>>()
        .join(",\n");

    let choice = |label: Label, ordinal: &str| {
        format!(
            "        \"{label}\": {{\n            \"text\": \"{ordinal} choice description\",\n            \"effects\": {{\n{effects}\n            }},\n            \"reasoning\": \"Why this choice has these effects\"\n        }}"
        )
    };

    format!(
        "{{\n    \"description\": \"Detailed scenario description\",\n    \"context\": \"Brief background information\",\n    \"choices\": {{\n{},\n{}\n    }}\n}}",
        choice(Label::A, "First"),
        choice(Label::B, "Second"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{doge_audit, shadow_government};
    use crate::game::Mode;

    #[test]
    fn test_scenario_prompt_includes_state_when_configured() {
        let config = doge_audit();
        let state = config.initial_state(Mode::Automated);
        let prompt = scenario_prompt(&config, &state);

        assert!(prompt.user.starts_with("Current game state:\n- Transparency: 50/100"));
        assert!(prompt.user.contains("- Turn: 1/10"));
        assert!(prompt.user.contains("\"public_trust\": integer (-15 to +15)"));
        assert!(prompt.user.contains("between -15 and +15"));
        assert!((prompt.temperature - SCENARIO_TEMPERATURE).abs() < f32::EPSILON);
        assert_eq!(prompt.max_tokens, SCENARIO_MAX_TOKENS);
    }

    #[test]
    fn test_scenario_prompt_fixed_brief_omits_state() {
        let config = shadow_government();
        let state = config.initial_state(Mode::Automated);
        let prompt = scenario_prompt(&config, &state);

        assert!(!prompt.user.contains("Current game state"));
        assert!(prompt.user.starts_with("Create a scenario for the leader"));
        assert!(prompt.user.contains("\"secrecy\": integer"));
    }

    #[test]
    fn test_schema_block_is_valid_json_shape() {
        let schema = schema_block(&doge_audit());
        // Replace the placeholders so the block parses.
        let parseable = schema.replace("integer (-15 to +15)", "0");
        let value: serde_json::Value = serde_json::from_str(&parseable).unwrap();
        assert!(value["choices"]["A"]["effects"]["evidence"].is_number());
        assert!(value["choices"]["B"]["reasoning"].is_string());
    }

    #[test]
    fn test_chooser_prompt_lists_both_choices() {
        let config = doge_audit();
        let state = config.initial_state(Mode::Automated);
        let scenario = &config.fallback_scenarios[0];
        let prompt = chooser_prompt(&config, &state, scenario);

        assert!(prompt.user.contains("Choice A: Launch an immediate public investigation"));
        assert!(prompt.user.contains("Effects A: Transparency +15, Public Trust +10, Evidence -5"));
        assert!(prompt.user.contains("Reasoning B:"));
        assert!(prompt.user.ends_with("Return only A or B."));
        assert_eq!(prompt.max_tokens, CHOOSER_MAX_TOKENS);
    }

    #[test]
    fn test_analysis_prompt_names_choice() {
        let config = doge_audit();
        let scenario = &config.fallback_scenarios[1];
        let prompt = analysis_prompt(&config, scenario, Label::B);
        assert!(prompt.user.contains("Choice made: Release the documents immediately"));
        assert!(prompt.user.contains("Effects: Transparency +15, Public Trust -5, Evidence +5"));
    }
}
