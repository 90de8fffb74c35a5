//! Line-oriented prompting for the interactive commands.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt io error: {0}")]
    Io(#[from] io::Error),
    /// Input ended before the flow finished.
    #[error("cancelled")]
    Cancelled,
}

/// Source of answers and sink for messages in an interactive flow.
pub trait Prompter {
    /// Show `prompt` and read one line, without its line terminator.
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Print one line of output.
    fn say(&mut self, line: &str) -> Result<(), PromptError>;

    /// Ask until a non-empty answer is given.
    fn ask_required(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.ask(&format!("{prompt}: "))?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            self.say("This field is required. Please enter a value.")?;
        }
    }

    /// Ask once, falling back to `default` on an empty answer.
    fn ask_default(&mut self, prompt: &str, default: &str) -> Result<String, PromptError> {
        let answer = self.ask(&format!("{prompt} [{default}]: "))?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    /// Collect items until `done`; blank lines are skipped.
    fn ask_list(&mut self, prompt: &str) -> Result<Vec<String>, PromptError> {
        self.say(&format!(
            "{prompt} (Enter each item on a new line, 'done' when finished):"
        ))?;
        let mut items = Vec::new();
        loop {
            let item = self.ask("  - ")?;
            let item = item.trim();
            if item.eq_ignore_ascii_case("done") {
                return Ok(items);
            }
            if !item.is_empty() {
                items.push(item.to_string());
            }
        }
    }

    /// Yes only for `y`, case-insensitive.
    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// Prompter over the process stdin and stdout.
pub struct StdinPrompter<R, W> {
    input: R,
    output: W,
}

impl StdinPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn new() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl Default for StdinPrompter<io::StdinLock<'static>, io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> StdinPrompter<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for StdinPrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Cancelled);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn say(&mut self, line: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

/// Prompter replaying canned answers and recording everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Prompts and messages in the order they were shown.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Answers not consumed by the flow.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.transcript.push(prompt.to_string());
        self.answers.pop_front().ok_or(PromptError::Cancelled)
    }

    fn say(&mut self, line: &str) -> Result<(), PromptError> {
        self.transcript.push(line.to_string());
        Ok(())
    }
}
