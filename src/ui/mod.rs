//! Presentation seam.
//!
//! The engine never assumes a rendering medium: it talks to a [`Presenter`]
//! and blocks on each call. The console implementation renders to a
//! terminal; the scripted implementation feeds canned input and records a
//! transcript for automated playthroughs.

pub mod console;
pub mod format;
pub mod scripted;

pub use console::ConsolePresenter;
pub use format::{format_intel, format_inventory, format_status};
pub use scripted::ScriptedPresenter;

use crate::engine::errors::EngineError;
use crate::engine::state::GameState;

/// Synchronous, blocking presentation calls consumed by the engine.
pub trait Presenter {
    /// A banner line set off by dividers.
    fn heading(&mut self, text: &str) -> Result<(), EngineError>;

    /// A plain informational line; does not block.
    fn message(&mut self, text: &str) -> Result<(), EngineError>;

    /// Narrator text; blocks on player acknowledgment.
    fn narration(&mut self, text: &str) -> Result<(), EngineError>;

    /// A spoken line; blocks on player acknowledgment.
    fn dialogue(&mut self, speaker: &str, text: &str) -> Result<(), EngineError>;

    /// Present options and return a validated 0-based selection. Invalid
    /// input is the presenter's problem: reprompt until a choice is in range.
    fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize, EngineError>;

    /// Block until the player signals continue.
    fn acknowledge(&mut self) -> Result<(), EngineError>;

    /// Read a free-form line (character naming).
    fn prompt_line(&mut self, prompt: &str) -> Result<String, EngineError>;

    /// The status header shown above menus.
    fn status(&mut self, state: &GameState) -> Result<(), EngineError> {
        self.message(&format::format_status(state))
    }
}
