//! Play command implementation.

use super::output::format_summary;
use super::spinner::SpinnerGenerator;
use super::{CliError, ModeArg, OutputFormat, load_game};
use dilemma::game::Mode;
use dilemma::selector::prompt_mode;
use dilemma::{CommandGenerator, Console, Engine};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the game cannot be loaded or the run fails.
#[allow(clippy::too_many_arguments, clippy::needless_pass_by_value)]
pub(crate) fn execute(
    game: String,
    game_file: Option<PathBuf>,
    mode: Option<ModeArg>,
    generator: Option<PathBuf>,
    generator_args: Vec<String>,
    seed: Option<u64>,
    turns: Option<u32>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let mut config = load_game(&game, game_file.as_deref())?;
    if let Some(turns) = turns {
        config.max_turns = turns;
    }

    // The mode prompt shares a stream with the transcript
    let mode = match mode {
        Some(mode) => Mode::from(mode),
        None if format == OutputFormat::Json => prompt_mode(&mut io::stdin().lock(), &mut io::stderr())?,
        None => prompt_mode(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    if quiet && mode == Mode::Interactive {
        return Err(CliError::new("--quiet requires automated mode (--mode auto)"));
    }

    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });
    info!(seed, game = %config.id, "play.seed");

    let generator = match generator {
        Some(program) => match CommandGenerator::connect(&program, generator_args) {
            Ok(generator) => Some(generator),
            Err(e) => {
                warn!(error = %e, "generator.unavailable");
                None
            }
        },
        None => {
            info!("no generator configured, using fallback scenarios");
            None
        }
    };

    let console = match (quiet, format) {
        (true, _) => Console::silent(),
        (false, OutputFormat::Text) => Console::stdio(),
        (false, OutputFormat::Json) => Console::new(io::stdin().lock(), io::stderr()),
    };

    let mut engine = Engine::new(&config, console, seed)?;
    if let Some(generator) = generator {
        engine = if quiet {
            engine.with_generator(generator)
        } else {
            engine.with_generator(SpinnerGenerator::new(generator))
        };
    }

    let report = engine.play(mode)?;

    match format {
        OutputFormat::Text => {
            if quiet {
                print!("{}", format_summary(&config, &report));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
