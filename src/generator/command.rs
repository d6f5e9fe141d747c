//! Generator backed by an external program.
//!
//! The program receives the system text, a blank line, and the user text on
//! stdin. Sampling hints are passed as `DILEMMA_TEMPERATURE` and
//! `DILEMMA_MAX_TOKENS`. Whatever it prints on stdout is the response.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::GeneratorError;
use crate::generator::{Prompt, TextGenerator};

/// Longest stderr excerpt kept in a [`GeneratorError::Failed`].
const STDERR_EXCERPT: usize = 400;

/// Runs a program once per request.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: PathBuf,
    args: Vec<String>,
    name: String,
}

impl CommandGenerator {
    /// Locate `program` and prepare to run it with `args`.
    ///
    /// This is the one-time availability check: a program that cannot be
    /// found means the run proceeds without a service.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Unavailable`] if the program does not exist
    /// as a path and is not on `PATH`.
    pub fn connect(program: impl AsRef<Path>, args: Vec<String>) -> Result<Self, GeneratorError> {
        let program = program.as_ref();
        let resolved = resolve_program(program).ok_or_else(|| {
            GeneratorError::Unavailable(format!("`{}` not found", program.display()))
        })?;

        let name = program
            .file_name()
            .map_or_else(|| program.display().to_string(), |n| n.to_string_lossy().to_string());

        Ok(Self {
            program: resolved,
            args,
            name,
        })
    }

    /// Resolved path of the program.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl TextGenerator for CommandGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, GeneratorError> {
        debug!(program = %self.program.display(), max_tokens = prompt.max_tokens, "generator.request");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("DILEMMA_TEMPERATURE", prompt.temperature.to_string())
            .env("DILEMMA_MAX_TOKENS", prompt.max_tokens.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GeneratorError::Spawn {
                program: self.name.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            write!(stdin, "{}\n\n{}\n", prompt.system, prompt.user)?;
            // Dropping stdin closes the pipe so the program sees EOF.
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GeneratorError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().chars().take(STDERR_EXCERPT).collect(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Find a program as given, or by name on `PATH`.
fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        return program.is_file().then(|| program.to_path_buf());
    }

    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let err = CommandGenerator::connect("/definitely/not/a/real/program", Vec::new()).unwrap_err();
        assert!(matches!(err, GeneratorError::Unavailable(_)));

        let err = CommandGenerator::connect("no-such-dilemma-generator-binary", Vec::new()).unwrap_err();
        assert!(matches!(err, GeneratorError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_output_is_returned() {
        let Ok(mut generator) = CommandGenerator::connect("sh", vec!["-c".to_string(), "cat >/dev/null; echo B".to_string()]) else {
            return;
        };
        let prompt = Prompt {
            system: "system".to_string(),
            user: "user".to_string(),
            temperature: 0.3,
            max_tokens: 10,
        };
        assert_eq!(generator.generate(&prompt).unwrap(), "B");
        assert_eq!(generator.name(), "sh");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_an_error() {
        let Ok(mut generator) = CommandGenerator::connect("sh", vec!["-c".to_string(), "cat >/dev/null; echo oops >&2; exit 3".to_string()]) else {
            return;
        };
        let prompt = Prompt {
            system: String::new(),
            user: String::new(),
            temperature: 0.7,
            max_tokens: 800,
        };
        match generator.generate(&prompt) {
            Err(GeneratorError::Failed { stderr, .. }) => assert_eq!(stderr, "oops"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
