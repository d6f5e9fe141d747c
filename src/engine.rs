//! The turn engine.
//!
//! Runs one game from the initial state to either the turn limit or a
//! breached metric:
//!
//! ```text
//! intro, status
//! for each turn:
//!     fetch scenario -> display -> select choice -> analysis
//!     apply effects -> status -> warnings / breach check
//! final assessment
//! ```
//!
//! All console traffic and generator calls happen here. The state updates
//! themselves are the pure functions in [`crate::game`].

use std::fmt;
use std::io::{self, BufRead, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::{
    Effects, GameState, Metric, Mode, Scenario, Tier, assess, breached_metric, is_game_over,
    metric_warnings,
};
use crate::generator::TextGenerator;
use crate::render::{
    render_assessment, render_compromised, render_intro, render_scenario, render_status,
    render_warning,
};
use crate::selector::{Chooser, Selection, select_automated, select_interactive};
use crate::source::{ScenarioOrigin, fetch_analysis, fetch_scenario};

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    /// Turn number (1-indexed).
    pub turn: u32,
    /// Scenario description.
    pub description: String,
    /// Where the scenario came from.
    pub origin: ScenarioOrigin,
    /// The choice made and who made it.
    pub selection: Selection,
    /// Text of the chosen option.
    pub choice: String,
    /// Effects of the chosen option.
    pub effects: Effects,
    /// Post-choice analysis, when one was obtained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    /// Metric values after the effects were applied.
    pub metrics: Vec<Metric>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Ending {
    /// All turns were played.
    Completed {
        /// Final assessment tier.
        tier: Tier,
        /// Mean of the final metric values.
        average: f64,
    },
    /// A metric reached a bound and the run stopped early.
    Compromised {
        /// Key of the breached metric.
        metric: String,
        /// Its value (0 or 100).
        value: i32,
        /// Turn on which it happened.
        turn: u32,
    },
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    /// Game id.
    pub game: String,
    /// How choices were made.
    pub mode: Mode,
    /// Whether a text generator was available.
    pub generator: bool,
    /// One record per turn played.
    pub turns: Vec<TurnRecord>,
    /// State after the last turn.
    pub final_state: GameState,
    /// How the run ended.
    pub ending: Ending,
}

impl GameReport {
    /// Number of turns played.
    #[must_use]
    pub fn turns_played(&self) -> usize {
        self.turns.len()
    }
}

/// Input and output streams for a run.
pub struct Console<'io> {
    input: Box<dyn BufRead + 'io>,
    output: Box<dyn Write + 'io>,
}

impl<'io> Console<'io> {
    /// Wrap arbitrary streams.
    #[must_use]
    pub fn new(input: impl BufRead + 'io, output: impl Write + 'io) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Standard input and standard output.
    #[must_use]
    pub fn stdio() -> Console<'static> {
        Console::new(io::stdin().lock(), io::stdout())
    }

    /// Standard input, with all output discarded.
    #[must_use]
    pub fn silent() -> Console<'static> {
        Console::new(io::stdin().lock(), io::sink())
    }
}

impl fmt::Debug for Console<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// Plays one game configuration.
pub struct Engine<'a> {
    config: &'a GameConfig,
    generator: Option<Box<dyn TextGenerator + 'a>>,
    console: Console<'a>,
    rng: StdRng,
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("game", &self.config.id)
            .field("generator", &self.generator.as_ref().map(|g| g.name().to_string()))
            .finish_non_exhaustive()
    }
}

impl<'a> Engine<'a> {
    /// Create an engine with no text generator.
    ///
    /// `seed` drives fallback scenario picks and random choices.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is inconsistent.
    pub fn new(config: &'a GameConfig, console: Console<'a>, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            generator: None,
            console,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Use `generator` for scenarios, automated choices and analyses.
    #[must_use]
    pub fn with_generator(mut self, generator: impl TextGenerator + 'a) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Whether a text generator is attached.
    #[must_use]
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Play a full run.
    ///
    /// # Errors
    ///
    /// Returns an error if the console fails, interactive input ends, or
    /// a turn has no scenario at all.
    pub fn play(&mut self, mode: Mode) -> Result<GameReport, EngineError> {
        let config = self.config;
        let mut state = config.initial_state(mode);
        let mut turns = Vec::new();

        info!(game = %config.id, ?mode, generator = self.has_generator(), "game.start");
        self.emit(&render_intro(config))?;
        self.emit(&render_status(config, &state))?;

        let final_state = loop {
            let (next, record) = self.play_turn(&state)?;
            turns.push(record);
            self.emit(&render_status(config, &next))?;

            if config.end_on_breach {
                for warning in metric_warnings(&next) {
                    self.emit(&render_warning(config, &warning))?;
                }
            }

            let breach = if config.end_on_breach && is_game_over(&next) {
                breached_metric(&next)
            } else {
                None
            };
            if let Some(metric) = breach {
                self.emit(&render_compromised(config, metric, next.turn))?;
                self.console.output.flush()?;
                info!(game = %config.id, turn = next.turn, metric = metric.key(), "game.compromised");
                let ending = Ending::Compromised {
                    metric: metric.key().to_string(),
                    value: metric.value(),
                    turn: next.turn,
                };
                return Ok(self.report(mode, turns, next, ending));
            }

            let advanced = next.next_turn();
            if advanced.turns_exhausted() {
                break next;
            }
            state = advanced;
        };

        let average = final_state.average();
        let tier = assess(average, config.thresholds);
        self.emit(&render_assessment(config, &final_state, tier))?;
        self.console.output.flush()?;
        info!(game = %config.id, average, ?tier, "game.complete");

        Ok(self.report(mode, turns, final_state, Ending::Completed { tier, average }))
    }

    /// Play one turn from `state`, returning the updated state and a record.
    ///
    /// The returned state keeps the same turn number; advancing is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the console fails, interactive input ends, or
    /// no scenario can be obtained.
    pub fn play_turn(&mut self, state: &GameState) -> Result<(GameState, TurnRecord), EngineError> {
        let config = self.config;
        let sourced = fetch_scenario(config, state, self.generator.as_deref_mut(), &mut self.rng)
            .ok_or(EngineError::NoScenario(state.turn))?;
        let scenario = &sourced.scenario;

        self.emit(&render_scenario(config, scenario, state.turn))?;

        let selection = self.select_choice(state, scenario)?;
        match selection.chooser {
            Chooser::Human => {}
            Chooser::Generator => {
                self.emit(&format!("\n[Auto Mode] AI selected option: {}\n", selection.label))?;
            }
            Chooser::Random => {
                self.emit(&format!(
                    "\n[Auto Mode] Random fallback selected option: {}\n",
                    selection.label
                ))?;
            }
        }

        let chosen = scenario.choice(selection.label);
        self.emit(&format!("\nYou chose: {}\n", chosen.text))?;

        let analysis = fetch_analysis(config, scenario, selection.label, self.generator.as_deref_mut());
        if let Some(text) = &analysis {
            self.emit(&format!("\nAnalysis: {text}\n"))?;
        }

        let next = state.apply_effects(&chosen.effects);
        info!(
            turn = state.turn,
            label = %selection.label,
            chooser = ?selection.chooser,
            generated = matches!(sourced.origin, ScenarioOrigin::Generated),
            "turn.complete"
        );

        let record = TurnRecord {
            turn: state.turn,
            description: scenario.description.clone(),
            origin: sourced.origin.clone(),
            selection,
            choice: chosen.text.clone(),
            effects: chosen.effects.clone(),
            analysis,
            metrics: next.metrics().to_vec(),
        };
        Ok((next, record))
    }

    /// Pick a label for `scenario` according to the state's mode.
    ///
    /// # Errors
    ///
    /// Returns an error if interactive input fails or ends.
    pub fn select_choice(&mut self, state: &GameState, scenario: &Scenario) -> Result<Selection, EngineError> {
        match state.mode {
            Mode::Interactive => {
                let label = select_interactive(self.console.input.as_mut(), self.console.output.as_mut())?;
                Ok(Selection {
                    label,
                    chooser: Chooser::Human,
                })
            }
            Mode::Automated => Ok(select_automated(
                self.config,
                state,
                scenario,
                self.generator.as_deref_mut(),
                &mut self.rng,
            )),
        }
    }

    fn emit(&mut self, text: &str) -> Result<(), EngineError> {
        self.console.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn report(&self, mode: Mode, turns: Vec<TurnRecord>, final_state: GameState, ending: Ending) -> GameReport {
        GameReport {
            game: self.config.id.clone(),
            mode,
            generator: self.has_generator(),
            turns,
            final_state,
            ending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{doge_audit, shadow_government};
    use crate::generator::ScriptedGenerator;
    use std::io::Cursor;

    #[test]
    fn test_offline_automated_run_completes() {
        let config = doge_audit();
        let mut output = Vec::new();
        let report = {
            let console = Console::new(Cursor::new(""), &mut output);
            let mut engine = Engine::new(&config, console, 7).unwrap();
            engine.play(Mode::Automated).unwrap()
        };

        assert_eq!(report.turns_played(), 10);
        assert!(!report.generator);
        assert!(matches!(report.ending, Ending::Completed { .. }));
        assert!(report.turns.iter().all(|t| t.selection.chooser == Chooser::Random));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("=== DOGE Audit: Operation Transparency ==="));
        assert!(text.contains("Turn 10:"));
        assert!(text.contains("Final Assessment:"));
    }

    #[test]
    fn test_interactive_turn_reads_console() {
        let config = doge_audit();
        let mut output = Vec::new();
        let (next, record) = {
            let console = Console::new(Cursor::new("q\na\n"), &mut output);
            let mut engine = Engine::new(&config, console, 1).unwrap();
            let state = config.initial_state(Mode::Interactive);
            engine.play_turn(&state).unwrap()
        };

        assert_eq!(record.selection.chooser, Chooser::Human);
        assert_eq!(record.turn, 1);
        assert_eq!(next.turn, 1);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid choice. Please enter A or B."));
        assert!(text.contains("You chose: "));
    }

    #[test]
    fn test_interactive_run_survives_undecodable_line() {
        let config = doge_audit();
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice("a\n".repeat(10).as_bytes());
        let mut output = Vec::new();

        let report = {
            let console = Console::new(Cursor::new(input), &mut output);
            let mut engine = Engine::new(&config, console, 1).unwrap();
            engine.play(Mode::Interactive).unwrap()
        };

        assert_eq!(report.turns_played(), 10);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid choice. Please enter A or B.").count(), 1);
    }

    #[test]
    fn test_interactive_eof_stops_run() {
        let config = shadow_government();
        let console = Console::new(Cursor::new(""), io::sink());
        let mut engine = Engine::new(&config, console, 1).unwrap();
        assert!(matches!(engine.play(Mode::Interactive), Err(EngineError::InputClosed)));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let mut config = doge_audit();
        config.metrics.clear();
        let console = Console::new(Cursor::new(""), io::sink());
        assert!(matches!(Engine::new(&config, console, 0), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_generator_choice_and_analysis_are_shown() {
        let config = doge_audit();
        // Scenario request fails, chooser answers A, analysis succeeds.
        let mut generator = ScriptedGenerator::new(["not json", "A", "Solid call."]);
        let mut output = Vec::new();
        {
            let console = Console::new(Cursor::new(""), &mut output);
            let mut engine = Engine::new(&config, console, 3)
                .unwrap()
                .with_generator(&mut generator);
            let state = config.initial_state(Mode::Automated);
            let (_, record) = engine.play_turn(&state).unwrap();
            assert_eq!(record.selection.chooser, Chooser::Generator);
            assert_eq!(record.analysis.as_deref(), Some("Solid call."));
            assert!(matches!(record.origin, ScenarioOrigin::Fallback { .. }));
        }

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[Auto Mode] AI selected option: A"));
        assert!(text.contains("Analysis: Solid call."));
        assert_eq!(generator.prompts().len(), 3);
    }
}
