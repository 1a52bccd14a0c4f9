//! User prompts behind a swappable capability.
//!
//! Core logic asks questions through [`Prompter`]; the binary plugs in
//! [`InquirePrompter`] on a terminal and [`NonInteractivePrompter`]
//! otherwise, tests plug in [`ScriptedPrompter`].

use anyhow::{anyhow, Context, Result};
use inquire::{Confirm, Select, Text};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader};

/// Capability to ask the user questions
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Ask the user to pick one of `options`
    fn select(&self, message: &str, options: &[String]) -> Result<String>;

    /// Ask for free text, offering `default` when given
    fn text(&self, message: &str, default: Option<&str>) -> Result<String>;
}

/// Check if we're running in an interactive terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr)
}

/// Pick the prompter matching the current terminal
pub fn for_terminal() -> Box<dyn Prompter> {
    if is_interactive() {
        Box::new(InquirePrompter)
    } else {
        Box::new(NonInteractivePrompter::new())
    }
}

/// Terminal prompts rendered with `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .context("Failed to get confirmation")
    }

    fn select(&self, message: &str, options: &[String]) -> Result<String> {
        Select::new(message, options.to_vec())
            .prompt()
            .context("Failed to get selection")
    }

    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        let mut prompt = Text::new(message);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        prompt.prompt().context("Failed to get input")
    }
}

/// Answers questions without a terminal
///
/// Questions with a default take it. Free text without a default is read
/// as one line from the input (stdin unless given), so answers can be
/// piped in; end of input or a read error yields an empty answer. Choices
/// cannot be made and fail, which callers treat like a cancelled prompt.
pub struct NonInteractivePrompter {
    input: RefCell<Box<dyn BufRead>>,
}

impl NonInteractivePrompter {
    pub fn new() -> Self {
        Self::with_input(BufReader::new(io::stdin()))
    }

    /// Read free-text answers from `input` instead of stdin
    pub fn with_input(input: impl BufRead + 'static) -> Self {
        NonInteractivePrompter {
            input: RefCell::new(Box::new(input)),
        }
    }

    fn read_line(&self, message: &str) -> String {
        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => log::debug!("Non-interactive: no input for '{message}'"),
            Ok(_) => {}
            Err(e) => {
                log::debug!("Non-interactive: failed to read answer for '{message}': {e}");
                line.clear();
            }
        }
        line.trim().to_string()
    }
}

impl Default for NonInteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for NonInteractivePrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        log::debug!("Non-interactive: '{message}' -> {default}");
        Ok(default)
    }

    fn select(&self, message: &str, _options: &[String]) -> Result<String> {
        Err(anyhow!("Cannot ask '{message}' without a terminal"))
    }

    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(default) => Ok(default.to_string()),
            None => Ok(self.read_line(message)),
        }
    }
}

/// A queued answer for [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Select(String),
    Text(String),
    /// Use the prompt's default (`text` and `confirm` only)
    Default,
    /// Behave as if the user cancelled
    Cancel,
}

/// Replays queued answers in order and records every question asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer for '{message}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(value) => Ok(value),
            Answer::Default => Ok(default),
            Answer::Cancel => Err(anyhow!("Prompt '{message}' cancelled")),
            other => Err(anyhow!("Expected a confirmation for '{message}', got {other:?}")),
        }
    }

    fn select(&self, message: &str, options: &[String]) -> Result<String> {
        match self.next(message)? {
            Answer::Select(choice) if options.contains(&choice) => Ok(choice),
            Answer::Select(choice) => Err(anyhow!("'{choice}' is not an option for '{message}'")),
            Answer::Cancel => Err(anyhow!("Prompt '{message}' cancelled")),
            other => Err(anyhow!("Expected a selection for '{message}', got {other:?}")),
        }
    }

    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        match self.next(message)? {
            Answer::Text(text) => Ok(text),
            Answer::Default => default
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Prompt '{message}' has no default")),
            Answer::Cancel => Err(anyhow!("Prompt '{message}' cancelled")),
            other => Err(anyhow!("Expected text for '{message}', got {other:?}")),
        }
    }
}
