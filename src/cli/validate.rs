//! Scenario validation command implementation.

use super::{CliError, PolicyArg, load_game};
use dilemma::game::{ValidationPolicy, parse_scenario};
use dilemma::render::render_scenario;
use std::fs;
use std::path::PathBuf;

/// Execute the validate command.
///
/// Runs a saved generator response through the same boundary check the
/// engine applies during play.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the scenario is invalid.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    file: PathBuf,
    game: String,
    game_file: Option<PathBuf>,
    policy: Option<PolicyArg>,
) -> Result<(), CliError> {
    let raw = fs::read_to_string(&file)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", file.display())))?;
    let config = load_game(&game, game_file.as_deref())?;
    let policy = policy.map_or(config.validation, ValidationPolicy::from);

    println!("Validating: {} ({}, {policy:?})", file.display(), config.id);

    let scenario = parse_scenario(&raw, &config.metrics, policy)?;
    print!("{}", render_scenario(&config, &scenario, 1));
    println!();
    println!("Validation successful!");

    Ok(())
}
