//! Dilemma CLI - Command-line interface for playing decision games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Dilemma - A turn-based decision game driven by a text generator
#[derive(Parser, Debug)]
#[command(name = "dilemma")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game
    Play {
        /// Built-in game: doge-audit or shadow-government
        #[arg(short, long, default_value = "doge-audit", conflicts_with = "game_file")]
        game: String,

        /// Game definition file (TOML)
        #[arg(long)]
        game_file: Option<PathBuf>,

        /// Choice mode (default: ask at startup)
        #[arg(short, long)]
        mode: Option<cli::ModeArg>,

        /// Program that answers prompts on stdin (default: none, fallback scenarios only)
        #[arg(long)]
        generator: Option<PathBuf>,

        /// Extra argument for the generator program (repeatable)
        #[arg(long = "generator-arg", allow_hyphen_values = true)]
        generator_args: Vec<String>,

        /// Random seed for fallback picks and random choices (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override the number of turns
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        turns: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the transcript (automated mode only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the built-in games
    Games,

    /// Validate a saved generator response against a game
    Validate {
        /// File holding the raw response
        #[arg(required = true)]
        file: PathBuf,

        /// Built-in game whose metrics apply
        #[arg(short, long, default_value = "doge-audit", conflicts_with = "game_file")]
        game: String,

        /// Game definition file (TOML)
        #[arg(long)]
        game_file: Option<PathBuf>,

        /// Validation policy (default: the game's own)
        #[arg(short, long)]
        policy: Option<cli::PolicyArg>,
    },

    /// Print a built-in game as TOML
    Export {
        /// Built-in game id
        #[arg(required = true)]
        game: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Play {
            game,
            game_file,
            mode,
            generator,
            generator_args,
            seed,
            turns,
            format,
            quiet,
        } => cli::play::execute(
            game,
            game_file,
            mode,
            generator,
            generator_args,
            seed,
            turns,
            format,
            quiet,
        ),

        Commands::Games => cli::games::execute(),

        Commands::Validate {
            file,
            game,
            game_file,
            policy,
        } => cli::validate::execute(file, game, game_file, policy),

        Commands::Export { game } => cli::export::execute(&game),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
