//! The Dialogue Interpreter: a fixed linear walk over a dialogue sequence.
//!
//! Choices mutate state only; they never change which line comes next. That
//! keeps dialogues replayable and simple to author.

use log::debug;

use crate::engine::errors::EngineError;
use crate::engine::session::Session;
use crate::engine::Flow;
use crate::save::SaveStore;
use crate::story::types::NARRATOR;
use crate::ui::Presenter;

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Play a dialogue by id. Unknown ids resolve to an empty sequence, not
    /// an error: authored-content gaps degrade gracefully.
    pub fn play_dialogue(&mut self, key: &str) -> Result<Flow, EngineError> {
        let story = self.story;
        let lines = story.dialogue(key);
        if lines.is_empty() {
            debug!("dialogue '{}' is empty or missing", key);
        }

        for line in lines {
            let speaker = self.state.substitute(&line.speaker);
            let text = self.state.substitute(&line.text);

            if line.choices.is_empty() {
                if speaker == NARRATOR {
                    self.presenter.narration(&text)?;
                } else {
                    self.presenter.dialogue(&speaker, &text)?;
                }
                continue;
            }

            self.presenter
                .message(&format!("[{}]\n\"{}\"", speaker, text))?;
            self.presenter.message("How do you respond?")?;
            let options: Vec<String> = line.choices.iter().map(|c| c.text.clone()).collect();
            let idx = self.presenter.choose("Choose an option: ", &options)?;
            if self.apply_effects(&line.choices[idx].effect)? == Flow::SessionOver {
                return Ok(Flow::SessionOver);
            }
        }
        Ok(Flow::Continue)
    }
}
