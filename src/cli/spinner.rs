//! Spinner shown while waiting for the text generator.

use dilemma::error::GeneratorError;
use dilemma::generator::{CHOOSER_MAX_TOKENS, Prompt, SCENARIO_MAX_TOKENS, TextGenerator};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Wraps a generator and draws a spinner on stderr during each request.
#[derive(Debug)]
pub(super) struct SpinnerGenerator<G> {
    inner: G,
}

impl<G: TextGenerator> SpinnerGenerator<G> {
    pub(super) fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: TextGenerator> TextGenerator for SpinnerGenerator<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, GeneratorError> {
        let spinner = start_spinner(subject(prompt));
        let result = self.inner.generate(prompt);
        spinner.finish_and_clear();
        result
    }
}

fn subject(prompt: &Prompt) -> &'static str {
    match prompt.max_tokens {
        SCENARIO_MAX_TOKENS => "Generating scenario...",
        CHOOSER_MAX_TOKENS => "Choosing...",
        _ => "Analyzing...",
    }
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(90));
    pb.set_message(message);
    pb
}
