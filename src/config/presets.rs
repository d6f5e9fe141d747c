//! Built-in games.

use crate::config::{GameConfig, Outcomes, Prompts};
use crate::game::{
    Choice, Choices, DEFAULT_INITIAL_VALUE, DEFAULT_MAX_TURNS, MetricDef, Scenario, Thresholds,
    ValidationPolicy,
};

/// Ids of every built-in game.
pub const BUILTIN_GAMES: [&str; 2] = ["doge-audit", "shadow-government"];

fn choice(text: &str, effects: [(&str, i32); 3], reasoning: &str) -> Choice {
    Choice {
        text: text.to_string(),
        reasoning: Some(reasoning.to_string()),
        effects: effects
            .into_iter()
            .map(|(key, delta)| (key.to_string(), delta))
            .collect(),
    }
}

fn scenario(description: &str, context: &str, a: Choice, b: Choice) -> Scenario {
    Scenario {
        description: description.to_string(),
        context: Some(context.to_string()),
        choices: Choices { a, b },
    }
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|line| (*line).to_string()).collect()
}

/// "DOGE Audit: Operation Transparency".
///
/// Scenario requests carry the current metrics, generated effects are
/// repaired into range, and the run always lasts the full ten turns.
#[must_use]
pub fn doge_audit() -> GameConfig {
    GameConfig {
        id: "doge-audit".to_string(),
        title: "DOGE Audit: Operation Transparency".to_string(),
        initial_value: DEFAULT_INITIAL_VALUE,
        max_turns: DEFAULT_MAX_TURNS,
        validation: ValidationPolicy::Repair,
        end_on_breach: false,
        intro: lines(&[
            "Lead the Department of Government Efficiency (DOGE) in exposing corruption!",
            "Use AI, gather evidence, and build public trust to clean up the government.",
            "Every decision shapes the future of transparency. Choose wisely!",
        ]),
        thresholds: Thresholds::default(),
        outcomes: Outcomes {
            best: "Outstanding success! Your investigation has exposed major corruption networks!"
                .to_string(),
            middling: "Good progress made in fighting corruption. The foundation is laid!"
                .to_string(),
            worst: "The investigation faced significant challenges. Time to regroup and try new approaches."
                .to_string(),
            compromised: "The audit has been compromised and cannot continue.".to_string(),
        },
        prompts: Prompts {
            include_state: true,
            analysis: true,
            scenario_system: "You are an expert in government auditing and anti-corruption initiatives."
                .to_string(),
            scenario_brief: "Create a scenario for DOGE (Department of Government Efficiency) auditors investigating corruption.\n\n\
                Current themes:\n\
                - Money laundering through NGOs\n\
                - Cryptocurrency transaction tracking\n\
                - AI-powered financial forensics\n\
                - Whistleblower protection\n\
                - International financial networks\n\
                - Government accountability"
                .to_string(),
            chooser_system: "You are a strategic advisor for anti-corruption operations.".to_string(),
            chooser_goal: "Based on the current state and potential effects, which choice (A or B) would be most strategic for advancing the anti-corruption mission?"
                .to_string(),
            analyst_system: "You are an expert analyst in government operations and anti-corruption initiatives."
                .to_string(),
        },
        metrics: vec![
            MetricDef::new("transparency", "Transparency"),
            MetricDef::new("public_trust", "Public Trust"),
            MetricDef::new("evidence", "Evidence"),
        ],
        fallback_scenarios: vec![
            scenario(
                "DOGE's AI system flags suspicious patterns in NGO financial transactions.",
                "The AI has detected unusual patterns suggesting potential money laundering.",
                choice(
                    "Launch an immediate public investigation with full transparency.",
                    [("transparency", 15), ("public_trust", 10), ("evidence", -5)],
                    "Public disclosure could rally support but might allow suspects to cover tracks.",
                ),
                choice(
                    "Quietly expand the investigation to gather more concrete evidence.",
                    [("transparency", -5), ("public_trust", -5), ("evidence", 15)],
                    "Gathering more evidence first could lead to stronger case but delays public awareness.",
                ),
            ),
            scenario(
                "A whistleblower comes forward with evidence of systematic corruption.",
                "Internal documents suggest widespread misuse of government funds.",
                choice(
                    "Protect the whistleblower and verify the evidence thoroughly.",
                    [("transparency", 5), ("public_trust", 5), ("evidence", 10)],
                    "Careful verification builds a stronger case while maintaining source protection.",
                ),
                choice(
                    "Release the documents immediately to maintain maximum transparency.",
                    [("transparency", 15), ("public_trust", -5), ("evidence", 5)],
                    "Quick release shows commitment to transparency but risks unverified information.",
                ),
            ),
        ],
    }
}

/// "Shadow Government Simulator".
///
/// Scenario requests use a fixed thematic brief, generated scenarios with
/// any non-integer effect are discarded, and a metric reaching 0 or 100
/// ends the run early.
#[must_use]
pub fn shadow_government() -> GameConfig {
    GameConfig {
        id: "shadow-government".to_string(),
        title: "Shadow Government Simulator".to_string(),
        initial_value: DEFAULT_INITIAL_VALUE,
        max_turns: DEFAULT_MAX_TURNS,
        validation: ValidationPolicy::Reject,
        end_on_breach: true,
        intro: lines(&[
            "You pull the strings behind the official government.",
            "Keep your operation secret, grow your influence, and keep the money flowing.",
            "Push any of them to the edge and the whole network unravels.",
        ]),
        thresholds: Thresholds::default(),
        outcomes: Outcomes {
            best: "Total control. The shadow government runs the country from behind the curtain."
                .to_string(),
            middling: "Your network survives. Power is yours, for now.".to_string(),
            worst: "The network is in disarray. Rivals circle what is left of your influence."
                .to_string(),
            compromised: "Your operation has been compromised!".to_string(),
        },
        prompts: Prompts {
            include_state: false,
            analysis: true,
            scenario_system: "You are the narrator of a political intrigue game about a secret shadow government."
                .to_string(),
            scenario_brief: "Create a scenario for the leader of a secret shadow government.\n\n\
                Current themes:\n\
                - Covert influence over elected officials\n\
                - Media manipulation and leaks\n\
                - Offshore funding and shell companies\n\
                - Rival factions and informants\n\
                - Investigative journalists closing in"
                .to_string(),
            chooser_system: "You are the chief strategist of a secret shadow government.".to_string(),
            chooser_goal: "Based on the current state and potential effects, which choice (A or B) best keeps the operation secret, influential and funded without pushing any metric to an extreme?"
                .to_string(),
            analyst_system: "You are an intelligence analyst advising a secret shadow government."
                .to_string(),
        },
        metrics: vec![
            MetricDef::new("secrecy", "Secrecy"),
            MetricDef::new("influence", "Influence"),
            MetricDef::new("funds", "Funds"),
        ],
        fallback_scenarios: vec![
            scenario(
                "An investigative journalist is asking questions about your offshore accounts.",
                "Her source inside a partner bank has already handed over transaction records.",
                choice(
                    "Buy the bank's silence and move the accounts to a new jurisdiction.",
                    [("secrecy", 10), ("influence", 0), ("funds", -15)],
                    "Money closes the leak, but relocating assets is expensive.",
                ),
                choice(
                    "Pressure the newspaper's owner to kill the story.",
                    [("secrecy", 5), ("influence", -10), ("funds", 0)],
                    "The story dies, but leaning on an ally spends political capital.",
                ),
            ),
            scenario(
                "A senator offers to champion your legislation in exchange for a seat at the table.",
                "The senator is ambitious, well connected, and known to talk too much.",
                choice(
                    "Bring the senator into the inner circle.",
                    [("secrecy", -10), ("influence", 15), ("funds", 5)],
                    "A powerful new ally widens your reach but is another mouth that knows the truth.",
                ),
                choice(
                    "Keep the senator at arm's length through intermediaries.",
                    [("secrecy", 5), ("influence", 5), ("funds", -5)],
                    "Intermediaries protect you, but they need to be paid and the gains are modest.",
                ),
            ),
        ],
    }
}
