//! Choice selection: a person at the console, or the generator.

use std::io::{BufRead, Write};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::{GameState, Label, Mode, Scenario};
use crate::generator::{TextGenerator, chooser_prompt};

/// Prompt shown before reading a choice.
pub const CHOICE_PROMPT: &str = "Enter your choice (A/B): ";

/// Shown after an unusable choice.
pub const INVALID_CHOICE: &str = "Invalid choice. Please enter A or B.";

/// Startup prompt selecting the mode.
pub const MODE_PROMPT: &str = "Choose mode: Interactive (I) or Auto (A): ";

/// Who made a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chooser {
    /// Typed at the console.
    Human,
    /// Returned by the generator.
    Generator,
    /// Picked at random after the generator failed or answered badly.
    Random,
}

/// A chosen label and who chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// The chosen option.
    pub label: Label,
    /// Who chose it.
    pub chooser: Chooser,
}

/// Read labels until a valid one is entered.
///
/// Input is trimmed and case-insensitive. There is no retry limit.
///
/// # Errors
///
/// Returns [`EngineError::InputClosed`] at end of input, or
/// [`EngineError::Io`] if the console fails.
pub fn select_interactive<R, W>(input: &mut R, output: &mut W) -> Result<Label, EngineError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        write!(output, "\n{CHOICE_PROMPT}")?;
        output.flush()?;

        let Some(line) = read_console_line(&mut *input)? else {
            return Err(EngineError::InputClosed);
        };
        if let Some(label) = Label::parse_input(&line) {
            return Ok(label);
        }
        writeln!(output, "{INVALID_CHOICE}")?;
    }
}

/// Let the generator pick, falling back to a uniform random label.
///
/// Any response other than a bare `A` or `B`, and any generator failure,
/// results in a random pick.
pub fn select_automated<G, R>(
    config: &GameConfig,
    state: &GameState,
    scenario: &Scenario,
    generator: Option<&mut G>,
    rng: &mut R,
) -> Selection
where
    G: TextGenerator + ?Sized,
    R: Rng + ?Sized,
{
    if let Some(generator) = generator {
        match generator.generate(&chooser_prompt(config, state, scenario)) {
            Ok(response) => {
                if let Some(label) = Label::parse_token(&response) {
                    debug!(turn = state.turn, %label, "choice.generated");
                    return Selection {
                        label,
                        chooser: Chooser::Generator,
                    };
                }
                warn!(turn = state.turn, response = %response.trim(), "choice.unusable_response");
            }
            Err(e) => warn!(turn = state.turn, error = %e, "choice.generation_failed"),
        }
    }

    Selection {
        label: random_label(rng),
        chooser: Chooser::Random,
    }
}

/// `A` or `B` with equal probability.
pub fn random_label<R: Rng + ?Sized>(rng: &mut R) -> Label {
    if rng.gen_bool(0.5) { Label::A } else { Label::B }
}

/// Interpret a mode answer: `A` (any case) is automated, anything else
/// interactive.
#[must_use]
pub fn parse_mode(answer: &str) -> Mode {
    if answer.trim().eq_ignore_ascii_case("A") {
        Mode::Automated
    } else {
        Mode::Interactive
    }
}

/// Ask for the mode at startup. End of input selects interactive.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the console fails.
pub fn prompt_mode<R, W>(input: &mut R, output: &mut W) -> Result<Mode, EngineError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{MODE_PROMPT}")?;
    output.flush()?;
    let line = read_console_line(&mut *input)?.unwrap_or_default();
    Ok(parse_mode(&line))
}

/// One line of console input, `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced rather than treated as an error,
/// so a stray byte only makes the line unparseable.
fn read_console_line<R: BufRead + ?Sized>(input: &mut R) -> Result<Option<String>, EngineError> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
