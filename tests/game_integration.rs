//! Multi-turn integration tests for full runs.
//!
//! These drive the engine end to end with a scripted generator and
//! in-memory consoles, covering both built-in games and file-based ones.
//!
//! Run with: cargo test game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::{Cursor, Write};

use dilemma::config::{doge_audit, shadow_government};
use dilemma::engine::{Console, Engine, Ending};
use dilemma::game::{Choice, Choices, Label, Mode, Scenario, Tier};
use dilemma::render::{BAR_WIDTH, progress_bar};
use dilemma::selector::Chooser;
use dilemma::source::ScenarioOrigin;
use dilemma::{GameConfig, ScriptedGenerator};
use serde_json::{Value, json};

fn doge_response(a: [i64; 3], b: [i64; 3]) -> String {
    json!({
        "description": "A whistleblower hands over a ledger of shell-company payments.",
        "context": "The ledger names three agencies.",
        "choices": {
            "A": {
                "text": "Publish the ledger",
                "effects": {"transparency": a[0], "public_trust": a[1], "evidence": a[2]},
                "reasoning": "Sunlight first."
            },
            "B": {
                "text": "Verify it quietly",
                "effects": {"transparency": b[0], "public_trust": b[1], "evidence": b[2]},
                "reasoning": "Build the case."
            }
        }
    })
    .to_string()
}

fn shadow_response(secrecy: i64) -> String {
    json!({
        "description": "A courier has been followed to a safe house.",
        "context": "Local police are asking questions.",
        "choices": {
            "A": {
                "text": "Burn the safe house",
                "effects": {"secrecy": secrecy, "influence": 0, "funds": 0},
                "reasoning": "Remove the evidence."
            },
            "B": {
                "text": "Move the courier abroad",
                "effects": {"secrecy": secrecy, "influence": 0, "funds": 0},
                "reasoning": "Remove the witness."
            }
        }
    })
    .to_string()
}

fn zero_scenario() -> Scenario {
    let zero = |text: &str| Choice {
        text: text.to_string(),
        reasoning: None,
        effects: [("transparency", 0), ("public_trust", 0), ("evidence", 0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    };
    Scenario {
        description: "Nothing happens.".to_string(),
        context: None,
        choices: Choices {
            a: zero("Wait"),
            b: zero("Wait longer"),
        },
    }
}

#[test]
fn test_first_turn_applies_generated_effects() {
    let config = doge_audit();
    let mut generator = ScriptedGenerator::new([
        doge_response([15, 10, -5], [-5, -5, 15]),
        "A".to_string(),
        "Bold.".to_string(),
    ]);
    let mut output = Vec::new();

    let (next, record) = {
        let console = Console::new(Cursor::new(""), &mut output);
        let mut engine = Engine::new(&config, console, 1).unwrap().with_generator(&mut generator);
        engine.play_turn(&config.initial_state(Mode::Automated)).unwrap()
    };

    assert_eq!(record.origin, ScenarioOrigin::Generated);
    assert_eq!(record.selection.label, Label::A);
    assert_eq!(next.value("transparency"), Some(65));
    assert_eq!(next.value("public_trust"), Some(60));
    assert_eq!(next.value("evidence"), Some(45));
    assert_eq!(progress_bar(65, BAR_WIDTH).matches('=').count(), 13);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Context: The ledger names three agencies."));
    assert!(text.contains("     Effects: Transparency +15, Public Trust +10, Evidence -5"));
    assert!(text.contains("[Auto Mode] AI selected option: A"));
    assert!(text.contains("You chose: Publish the ledger"));
}

#[test]
fn test_out_of_range_effects_are_repaired() {
    let config = doge_audit();
    let mut raw: Value = serde_json::from_str(&doge_response([0, 0, 0], [0, 0, 0])).unwrap();
    raw["choices"]["A"]["effects"]["transparency"] = json!(40);
    raw["choices"]["A"]["effects"]["evidence"] = json!("-7");
    let mut generator = ScriptedGenerator::new([raw.to_string(), "A".to_string(), String::new()]);

    let console = Console::new(Cursor::new(""), std::io::sink());
    let mut engine = Engine::new(&config, console, 2).unwrap().with_generator(&mut generator);
    let (next, record) = engine.play_turn(&config.initial_state(Mode::Automated)).unwrap();

    assert_eq!(record.origin, ScenarioOrigin::Generated);
    assert_eq!(record.effects.get("transparency"), Some(&15));
    assert_eq!(record.effects.get("evidence"), Some(&-7));
    assert_eq!(next.value("transparency"), Some(65));
    assert_eq!(next.value("evidence"), Some(43));
    assert_eq!(record.analysis, None);
}

#[test]
fn test_scenario_missing_choice_uses_fallback() {
    let config = doge_audit();
    let mut raw: Value = serde_json::from_str(&doge_response([1, 1, 1], [1, 1, 1])).unwrap();
    raw["choices"].as_object_mut().unwrap().remove("B");
    let mut generator = ScriptedGenerator::new([raw.to_string(), "B".to_string(), "ok".to_string()]);

    let console = Console::new(Cursor::new(""), std::io::sink());
    let mut engine = Engine::new(&config, console, 3).unwrap().with_generator(&mut generator);
    let (_, record) = engine.play_turn(&config.initial_state(Mode::Automated)).unwrap();

    match record.origin {
        ScenarioOrigin::Fallback { reason } => assert!(reason.contains('B')),
        ScenarioOrigin::Generated => panic!("scenario without choice B must be discarded"),
    }
    assert!(config.fallback_scenarios.iter().any(|s| s.description == record.description));
}

#[test]
fn test_unusable_chooser_answers_pick_both_labels() {
    let config = doge_audit();
    let mut seen_a = false;
    let mut seen_b = false;

    for seed in 0..32 {
        let mut generator = ScriptedGenerator::default();
        for _ in 0..config.max_turns {
            generator.push_response(doge_response([0, 0, 0], [0, 0, 0]));
            generator.push_response(if seed % 2 == 0 { "C" } else { "" });
            generator.push_response("fine");
        }
        let console = Console::new(Cursor::new(""), std::io::sink());
        let mut engine = Engine::new(&config, console, seed).unwrap().with_generator(&mut generator);
        let report = engine.play(Mode::Automated).unwrap();

        for turn in &report.turns {
            assert_eq!(turn.selection.chooser, Chooser::Random);
            match turn.selection.label {
                Label::A => seen_a = true,
                Label::B => seen_b = true,
            }
        }
    }

    assert!(seen_a && seen_b);
}

#[test]
fn test_shadow_run_ends_on_breach() {
    let config = shadow_government();
    let mut generator = ScriptedGenerator::default();
    for _ in 0..config.max_turns {
        generator.push_response(shadow_response(-15));
        generator.push_response("A");
        generator.push_response("Risky.");
    }
    let mut output = Vec::new();

    let report = {
        let console = Console::new(Cursor::new(""), &mut output);
        let mut engine = Engine::new(&config, console, 4).unwrap().with_generator(&mut generator);
        engine.play(Mode::Automated).unwrap()
    };

    // 50 -> 35 -> 20 -> 5 -> 0
    assert_eq!(report.turns_played(), 4);
    assert_eq!(
        report.ending,
        Ending::Compromised {
            metric: "secrecy".to_string(),
            value: 0,
            turn: 4
        }
    );
    assert_eq!(report.final_state.value("secrecy"), Some(0));
    assert_eq!(generator.remaining(), 18);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Warning: Secrecy is critically low (5)"));
    assert!(text.contains("Your operation has been compromised!"));
    assert!(!text.contains("Final Assessment"));
    assert!(!text.contains("Turn 5:"));
}

#[test]
fn test_shadow_discards_non_integer_effects() {
    let config = shadow_government();
    let mut raw: Value = serde_json::from_str(&shadow_response(5)).unwrap();
    raw["choices"]["B"]["effects"]["funds"] = json!(2.5);
    let mut generator = ScriptedGenerator::new([raw.to_string(), "A".to_string(), "ok".to_string()]);

    let console = Console::new(Cursor::new(""), std::io::sink());
    let mut engine = Engine::new(&config, console, 5).unwrap().with_generator(&mut generator);
    let (_, record) = engine.play_turn(&config.initial_state(Mode::Automated)).unwrap();
    assert!(matches!(record.origin, ScenarioOrigin::Fallback { .. }));
}

#[test]
fn test_doge_run_never_ends_early() {
    let config = doge_audit();
    let mut generator = ScriptedGenerator::default();
    for _ in 0..config.max_turns {
        generator.push_response(doge_response([-15, -15, -15], [-15, -15, -15]));
        generator.push_response("B");
        generator.push_response("Ouch.");
    }

    let console = Console::new(Cursor::new(""), std::io::sink());
    let mut engine = Engine::new(&config, console, 6).unwrap().with_generator(&mut generator);
    let report = engine.play(Mode::Automated).unwrap();

    assert_eq!(report.turns_played(), 10);
    assert!(report.final_state.metrics().iter().all(|m| m.value() == 0));
    assert_eq!(
        report.ending,
        Ending::Completed {
            tier: Tier::Worst,
            average: 0.0
        }
    );
}

#[test]
fn test_zero_effect_run_is_middling() {
    let mut config = doge_audit();
    config.fallback_scenarios = vec![zero_scenario()];
    let mut output = Vec::new();

    let report = {
        let console = Console::new(Cursor::new(""), &mut output);
        let mut engine = Engine::new(&config, console, 7).unwrap();
        engine.play(Mode::Automated).unwrap()
    };

    assert_eq!(report.turns_played(), 10);
    assert_eq!(
        report.ending,
        Ending::Completed {
            tier: Tier::Middling,
            average: 50.0
        }
    );
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Average score: 50.0"));
    assert!(text.contains(&config.outcomes.middling));
}

#[test]
fn test_interactive_transcript() {
    let config = doge_audit();
    let input = "maybe\n".to_string() + &"a\n".repeat(10);
    let mut output = Vec::new();

    let report = {
        let console = Console::new(Cursor::new(input), &mut output);
        let mut engine = Engine::new(&config, console, 8).unwrap();
        engine.play(Mode::Interactive).unwrap()
    };

    assert!(report.turns.iter().all(|t| t.selection == dilemma::selector::Selection {
        label: Label::A,
        chooser: Chooser::Human
    }));

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("\n=== DOGE Audit: Operation Transparency ===\n"));
    assert_eq!(text.matches("Enter your choice (A/B): ").count(), 11);
    assert_eq!(text.matches("Invalid choice. Please enter A or B.").count(), 1);
    assert_eq!(text.matches("You chose: ").count(), 10);
    assert_eq!(text.matches("Current Status:").count(), 11);
    assert!(!text.contains("[Auto Mode]"));
}

#[test]
fn test_report_serializes_to_json() {
    let config = shadow_government();
    let console = Console::new(Cursor::new(""), std::io::sink());
    let mut engine = Engine::new(&config, console, 9).unwrap();
    let report = engine.play(Mode::Automated).unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["game"], "shadow-government");
    assert_eq!(value["mode"], "automated");
    assert_eq!(value["generator"], false);
    assert!(value["ending"]["kind"].is_string());
    assert_eq!(value["turns"][0]["origin"]["kind"], "fallback");
    assert_eq!(value["turns"][0]["selection"]["chooser"], "random");
}

#[test]
fn test_same_seed_same_offline_run() {
    let config = doge_audit();
    let run = |seed| {
        let console = Console::new(Cursor::new(""), std::io::sink());
        let mut engine = Engine::new(&config, console, seed).unwrap();
        engine.play(Mode::Automated).unwrap()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn test_game_file_round_trip() {
    let mut config = doge_audit();
    config.id = "custom".to_string();
    config.title = "Custom Audit".to_string();
    config.max_turns = 3;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.to_toml_string().unwrap().as_bytes()).unwrap();
    let loaded = GameConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);

    let console = Console::new(Cursor::new(""), std::io::sink());
    let mut engine = Engine::new(&loaded, console, 10).unwrap();
    let report = engine.play(Mode::Automated).unwrap();
    assert_eq!(report.game, "custom");
    assert_eq!(report.turns_played(), 3);
}

#[test]
fn test_invalid_game_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"id = \"broken\"\ntitle = 5\n").unwrap();
    assert!(GameConfig::load(file.path()).is_err());
}
