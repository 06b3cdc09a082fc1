//! The Ending Resolver.
//!
//! Exactly one ending — chapter complete — is resumable and carries a fixed
//! reward; every other key terminates the session after acknowledgment.
//! That asymmetry is deliberate and load-bearing: the chapter reward flows
//! back into the continuing economy, everything else is game over.

use log::{info, warn};

use crate::engine::errors::EngineError;
use crate::engine::session::Session;
use crate::engine::{Flow, FLAG_COMPLETED_HEIST};
use crate::save::SaveStore;
use crate::ui::Presenter;

pub const ENDING_CAUGHT: &str = "caught";
pub const ENDING_CHAPTER_COMPLETE: &str = "chapter1_complete";
pub const ENDING_STARVATION: &str = "starvation";
pub const ENDING_HEALTH: &str = "health";

/// Payout for completing the chapter, applied exactly once per trigger.
pub const CHAPTER_REWARD: i64 = 5000;
pub const CHAPTER_CRIMINALITY_BONUS: i64 = 20;

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Render an ending and resolve its consequences. Unknown keys fall
    /// back to a generic "The End"/"Game Over" pair rather than failing a
    /// playthrough over a content gap.
    pub fn trigger_ending(&mut self, key: &str) -> Result<Flow, EngineError> {
        let story = self.story;
        let (title, text) = match story.endings.get(key) {
            Some(ending) => (ending.title.as_str(), ending.text.as_str()),
            None => {
                warn!("unknown ending key '{}', using generic ending", key);
                ("The End", "Game Over")
            }
        };

        let title = self.state.substitute(title);
        let text = self.state.substitute(text);
        self.presenter.heading(&title.to_uppercase())?;
        self.presenter.message(&text)?;

        if key == ENDING_CHAPTER_COMPLETE {
            self.state.grant_money(CHAPTER_REWARD);
            let _ = self.state.adjust_stat("criminality", CHAPTER_CRIMINALITY_BONUS);
            self.state.set_flag(FLAG_COMPLETED_HEIST);
            info!("chapter complete, ${} awarded", CHAPTER_REWARD);
            self.presenter.message(&format!(
                "You earned ${}! Total: ${}",
                CHAPTER_REWARD,
                self.state.stat("money")
            ))?;
            self.presenter.acknowledge()?;
            return Ok(Flow::Continue);
        }

        self.presenter.acknowledge()?;
        info!("session over: {}", key);
        Ok(Flow::SessionOver)
    }
}
