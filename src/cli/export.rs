//! Export command implementation.

use super::CliError;
use dilemma::GameConfig;

/// Execute the export command.
///
/// Prints the built-in game as TOML, ready to edit and load with
/// `play --game-file`.
///
/// # Errors
///
/// Returns an error if the game is unknown.
pub(crate) fn execute(game: &str) -> Result<(), CliError> {
    let config = GameConfig::builtin(game)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
