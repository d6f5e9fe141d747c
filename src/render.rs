//! Console text for turns, status and outcomes.
//!
//! Everything here is a pure function from state to `String`; the engine
//! decides where the text goes.

// format! with push_str reads better than write! for text blocks
#![allow(clippy::format_push_string)]

use crate::config::GameConfig;
use crate::game::{Choice, GameState, METRIC_MAX, METRIC_MIN, Metric, MetricWarning, Scenario, Tier, WarningKind};

/// Characters between the brackets of a progress bar.
pub const BAR_WIDTH: usize = 20;

/// Widest bar [`progress_bar`] will draw.
pub const MAX_BAR_WIDTH: usize = 200;

/// Width of the rule closing a status block.
const RULE_WIDTH: usize = 50;

/// Render a fixed-width bar for a metric value.
///
/// Filled cells are `floor(value / 100 * width)`, the rest are spaces.
/// `width` is capped at [`MAX_BAR_WIDTH`].
///
/// ```
/// assert_eq!(dilemma::render::progress_bar(65, 20), "[=============       ]");
/// ```
#[must_use]
pub fn progress_bar(value: i32, width: usize) -> String {
    let value = usize::try_from(value.clamp(METRIC_MIN, METRIC_MAX)).unwrap_or(0);
    let range = usize::try_from(METRIC_MAX).unwrap_or(100);
    let width = width.min(MAX_BAR_WIDTH);
    let filled = value.saturating_mul(width) / range;
    format!("[{}{}]", "=".repeat(filled), " ".repeat(width - filled))
}

/// `Label +n, Label -n, ...` for every metric of the game.
#[must_use]
pub fn format_effects(config: &GameConfig, choice: &Choice) -> String {
    config
        .metrics
        .iter()
        .map(|m| format!("{} {:+}", m.label, choice.effect(&m.key)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Title and intro lines.
#[must_use]
pub fn render_intro(config: &GameConfig) -> String {
    let mut output = format!("\n=== {} ===\n", config.title);
    for line in &config.intro {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// The status block: turn counter and one bar per metric.
#[must_use]
pub fn render_status(config: &GameConfig, state: &GameState) -> String {
    let width = config
        .metrics
        .iter()
        .map(|m| m.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Turn".len())
        + 1;

    let mut output = String::from("\nCurrent Status:\n");
    output.push_str(&format!(
        " {:<width$} {}/{}\n",
        "Turn:", state.turn, state.max_turns
    ));
    for metric in state.metrics() {
        output.push_str(&format!(
            " {:<width$} {} {}\n",
            format!("{}:", config.label_for(metric.key())),
            progress_bar(metric.value(), BAR_WIDTH),
            metric.value()
        ));
    }
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output
}

/// Turn banner, scenario text and both choices with their effects.
#[must_use]
pub fn render_scenario(config: &GameConfig, scenario: &Scenario, turn: u32) -> String {
    let mut output = format!("\nTurn {turn}:\n\n{}\n", scenario.description);
    if let Some(context) = &scenario.context {
        output.push_str(&format!("\nContext: {context}\n"));
    }

    for (label, choice) in scenario.iter_choices() {
        output.push_str(&format!("\n  {label}) {}\n", choice.text));
        output.push_str(&format!("     Effects: {}\n", format_effects(config, choice)));
        if let Some(reasoning) = &choice.reasoning {
            output.push_str(&format!("     Reasoning: {reasoning}\n"));
        }
    }
    output
}

/// One warning line for a metric near a bound.
#[must_use]
pub fn render_warning(config: &GameConfig, warning: &MetricWarning) -> String {
    let label = config.label_for(&warning.key);
    match warning.kind {
        WarningKind::Low => format!("Warning: {label} is critically low ({})\n", warning.value),
        WarningKind::High => format!("Warning: {label} is dangerously high ({})\n", warning.value),
    }
}

/// Early-end message naming the metric that hit a bound.
#[must_use]
pub fn render_compromised(config: &GameConfig, metric: &Metric, turn: u32) -> String {
    format!(
        "\n{} {} reached {} on turn {turn}.\n",
        config.outcomes.compromised,
        config.label_for(metric.key()),
        metric.value()
    )
}

/// Final assessment after a full run.
#[must_use]
pub fn render_assessment(config: &GameConfig, state: &GameState, tier: Tier) -> String {
    format!(
        "\n{} complete! Final Assessment:\nAverage score: {:.1}\n{}\n",
        config.title,
        state.average(),
        config.outcomes.message(tier)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{doge_audit, shadow_government};
    use crate::game::{Effects, Mode};

    #[test]
    fn test_progress_bar_fill() {
        assert_eq!(progress_bar(0, 20), format!("[{}]", " ".repeat(20)));
        assert_eq!(progress_bar(100, 20), format!("[{}]", "=".repeat(20)));
        assert_eq!(progress_bar(65, 20), "[=============       ]");
        assert_eq!(progress_bar(4, 20), format!("[{}]", " ".repeat(20)));
        assert_eq!(progress_bar(5, 20), format!("[={}]", " ".repeat(19)));
        assert_eq!(progress_bar(57, 20).matches('=').count(), 11);
    }

    #[test]
    fn test_progress_bar_clamps_out_of_range() {
        assert_eq!(progress_bar(-10, 20), progress_bar(0, 20));
        assert_eq!(progress_bar(250, 20), progress_bar(100, 20));
    }

    #[test]
    fn test_progress_bar_caps_width() {
        let bar = progress_bar(50, usize::MAX);
        assert_eq!(bar.chars().count(), MAX_BAR_WIDTH + 2);
        assert_eq!(bar.matches('=').count(), MAX_BAR_WIDTH / 2);
    }

    #[test]
    fn test_status_block() {
        let config = doge_audit();
        let mut effects = Effects::new();
        effects.insert("transparency".to_string(), 15);
        let state = config.initial_state(Mode::Automated).apply_effects(&effects);

        let status = render_status(&config, &state);
        assert!(status.contains("Current Status:"));
        assert!(status.contains(" Turn:         1/10"));
        assert!(status.contains(" Transparency: [=============       ] 65"));
        assert!(status.contains(" Evidence:     [==========          ] 50"));
        assert!(status.trim_end().ends_with(&"-".repeat(50)));
    }

    #[test]
    fn test_scenario_shows_signed_effects() {
        let config = doge_audit();
        let text = render_scenario(&config, &config.fallback_scenarios[0], 3);
        assert!(text.starts_with("\nTurn 3:\n"));
        assert!(text.contains("Context: The AI has detected"));
        assert!(text.contains("  A) Launch an immediate public investigation"));
        assert!(text.contains("     Effects: Transparency +15, Public Trust +10, Evidence -5"));
        assert!(text.contains("     Effects: Transparency -5, Public Trust -5, Evidence +15"));
    }

    #[test]
    fn test_warning_and_outcome_text() {
        let config = shadow_government();
        let low = MetricWarning {
            key: "funds".to_string(),
            value: 8,
            kind: WarningKind::Low,
        };
        assert_eq!(render_warning(&config, &low), "Warning: Funds is critically low (8)\n");

        let state = config.initial_state(Mode::Automated);
        let text = render_assessment(&config, &state, Tier::Middling);
        assert!(text.contains("Average score: 50.0"));
        assert!(text.contains(&config.outcomes.middling));
    }
}
