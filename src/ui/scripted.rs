//! Scripted presenter for automated playthroughs.
//!
//! Choices and input lines come from queues; everything presented lands in a
//! transcript. Exhausted queues fall back to the first option / an empty
//! line so a playthrough can run to completion deterministically.

use std::collections::VecDeque;

use crate::engine::errors::EngineError;
use crate::ui::Presenter;

#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    choices: VecDeque<usize>,
    lines: VecDeque<String>,
    /// Everything presented, in order.
    pub transcript: Vec<String>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue 0-based selections, consumed in order by `choose`.
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = usize>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Queue free-form input lines, consumed in order by `prompt_line`.
    pub fn with_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn push_choice(&mut self, choice: usize) {
        self.choices.push_back(choice);
    }

    pub fn transcript_contains(&self, needle: &str) -> bool {
        self.transcript.iter().any(|entry| entry.contains(needle))
    }
}

impl Presenter for ScriptedPresenter {
    fn heading(&mut self, text: &str) -> Result<(), EngineError> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), EngineError> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn narration(&mut self, text: &str) -> Result<(), EngineError> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn dialogue(&mut self, speaker: &str, text: &str) -> Result<(), EngineError> {
        self.transcript.push(format!("[{}] {}", speaker, text));
        Ok(())
    }

    fn choose(&mut self, _prompt: &str, options: &[String]) -> Result<usize, EngineError> {
        for option in options {
            self.transcript.push(format!("? {}", option));
        }
        let choice = self.choices.pop_front().unwrap_or(0);
        let choice = choice.min(options.len().saturating_sub(1));
        self.transcript.push(format!("> {}", options[choice]));
        Ok(choice)
    }

    fn acknowledge(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, EngineError> {
        self.transcript.push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or_default())
    }
}
