//! Output formatting utilities for CLI.

use dilemma::render::progress_bar;
use dilemma::{Ending, GameConfig, GameReport};
use dilemma::selector::Chooser;

/// Format a finished run as a short text summary.
pub(super) fn format_summary(config: &GameConfig, report: &GameReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} ({} turns played)\n", config.title, report.turns_played()));
    for turn in &report.turns {
        let chooser = match turn.selection.chooser {
            Chooser::Human => "human",
            Chooser::Generator => "generator",
            Chooser::Random => "random",
        };
        output.push_str(&format!(
            "  Turn {:>2}: {} ({chooser})\n",
            turn.turn, turn.selection.label
        ));
    }
    output.push('\n');

    for metric in report.final_state.metrics() {
        output.push_str(&format!(
            "  {:<14} {} {}\n",
            config.label_for(metric.key()),
            progress_bar(metric.value(), 20),
            metric.value()
        ));
    }
    output.push('\n');

    match &report.ending {
        Ending::Completed { tier, average } => {
            output.push_str(&format!("  Average: {average:.1}\n"));
            output.push_str(&format!("  {}\n", config.outcomes.message(*tier)));
        }
        Ending::Compromised { metric, value, turn } => {
            output.push_str(&format!(
                "  {} {} reached {value} on turn {turn}.\n",
                config.outcomes.compromised,
                config.label_for(metric)
            ));
        }
    }

    output
}

/// Format the list of built-in games.
pub(super) fn format_games(games: &[GameConfig]) -> String {
    let mut output = String::new();
    for game in games {
        let metrics: Vec<&str> = game.metrics.iter().map(|m| m.label.as_str()).collect();
        output.push_str(&format!("{:<18} {}\n", game.id, game.title));
        output.push_str(&format!("{:<18} metrics: {}\n", "", metrics.join(", ")));
        output.push_str(&format!(
            "{:<18} {} turns, {} fallback scenarios\n",
            "",
            game.max_turns,
            game.fallback_scenarios.len()
        ));
    }
    output
}
