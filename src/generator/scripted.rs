//! Generator that replays queued responses.

use std::collections::VecDeque;

use crate::error::GeneratorError;
use crate::generator::{Prompt, TextGenerator};

/// Returns queued responses in order and records every prompt.
///
/// Once the queue is empty every request fails with
/// [`GeneratorError::Exhausted`].
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: VecDeque<Result<String, GeneratorError>>,
    prompts: Vec<Prompt>,
}

impl ScriptedGenerator {
    /// Create a generator that answers with `responses` in order.
    #[must_use]
    pub fn new<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        Self {
            responses: responses.into_iter().map(|r| Ok(r.into())).collect(),
            prompts: Vec::new(),
        }
    }

    /// Queue a successful response.
    pub fn push_response(&mut self, response: impl Into<String>) {
        self.responses.push_back(Ok(response.into()));
    }

    /// Queue a failure.
    pub fn push_error(&mut self, error: GeneratorError) {
        self.responses.push_back(Err(error));
    }

    /// Every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Number of responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, GeneratorError> {
        self.prompts.push(prompt.clone());
        self.responses.pop_front().unwrap_or(Err(GeneratorError::Exhausted))
    }
}
