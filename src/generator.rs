//! Text-generation service boundary.
//!
//! The engine never talks to a model directly. It sends a [`Prompt`] to a
//! [`TextGenerator`] and treats whatever text comes back as untrusted.
//!
//! - [`CommandGenerator`] pipes prompts through an external program
//! - [`ScriptedGenerator`] replays canned responses

mod command;
mod prompts;
mod scripted;

pub use command::CommandGenerator;
pub use prompts::{analysis_prompt, chooser_prompt, scenario_prompt};
pub use scripted::ScriptedGenerator;

use crate::error::GeneratorError;

/// Sampling temperature for scenario requests.
pub const SCENARIO_TEMPERATURE: f32 = 0.7;
/// Token budget for scenario requests.
pub const SCENARIO_MAX_TOKENS: u32 = 800;
/// Sampling temperature for chooser requests.
pub const CHOOSER_TEMPERATURE: f32 = 0.3;
/// Token budget for chooser requests.
pub const CHOOSER_MAX_TOKENS: u32 = 10;
/// Sampling temperature for analysis requests.
pub const ANALYSIS_TEMPERATURE: f32 = 0.7;
/// Token budget for analysis requests.
pub const ANALYSIS_MAX_TOKENS: u32 = 150;

/// One request to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Role or persona for the model.
    pub system: String,
    /// The request itself.
    pub user: String,
    /// Sampling temperature hint.
    pub temperature: f32,
    /// Response length hint, in tokens.
    pub max_tokens: u32,
}

/// Anything that can turn a prompt into text.
pub trait TextGenerator {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce a response for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`] if no response could be obtained.
    fn generate(&mut self, prompt: &Prompt) -> Result<String, GeneratorError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, GeneratorError> {
        (**self).generate(prompt)
    }
}

impl<G: TextGenerator + ?Sized> TextGenerator for &mut G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, GeneratorError> {
        (**self).generate(prompt)
    }
}
