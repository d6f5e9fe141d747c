// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Dilemma: a turn-based decision game engine driven by a text generator.
//!
//! Each turn the engine asks a generator for a scenario with two choices,
//! validates it, shows it, takes a choice from a person or from the
//! generator, and applies the chosen effects to a small set of bounded
//! metrics. Two games ship built in, and more can be loaded from TOML.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │       CLI (play, games, ...)        │
//! ├─────────────────────────────────────┤
//! │   Turn Engine (engine, render)      │
//! ├──────────────────┬──────────────────┤
//! │ Scenario Source  │ Choice Selector  │
//! ├──────────────────┴──────────────────┤
//! │  Game model (state, validation)     │
//! ├─────────────────────────────────────┤
//! │  Text generator (command, scripted) │
//! └─────────────────────────────────────┘
//! ```
//!
//! A run never needs the generator. Without one, every turn draws from the
//! game's fallback scenarios and automated choices are random.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod generator;
pub mod render;
pub mod selector;
pub mod source;

pub use config::GameConfig;
pub use engine::{Console, Engine, Ending, GameReport, TurnRecord};
pub use error::{ConfigError, EngineError, GeneratorError, ScenarioError};
pub use game::{GameState, Label, Mode, Scenario, Tier};
pub use generator::{CommandGenerator, Prompt, ScriptedGenerator, TextGenerator};
