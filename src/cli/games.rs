//! Games command implementation.

use super::CliError;
use super::output::format_games;
use dilemma::GameConfig;
use dilemma::config::BUILTIN_GAMES;

/// Execute the games command.
///
/// # Errors
///
/// Returns an error if a built-in game fails to load.
pub(crate) fn execute() -> Result<(), CliError> {
    let games = BUILTIN_GAMES
        .iter()
        .map(|id| GameConfig::builtin(id))
        .collect::<Result<Vec<_>, _>>()?;
    print!("{}", format_games(&games));
    Ok(())
}
