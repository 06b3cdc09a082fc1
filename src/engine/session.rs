//! Session wiring: title flow, the main menu, and the state the rest of the
//! engine mutates.

use log::info;

use crate::engine::errors::EngineError;
use crate::engine::location::is_unlocked;
use crate::engine::state::GameState;
use crate::engine::{Flow, DIALOGUE_INTRO};
use crate::save::SaveStore;
use crate::story::types::StoryData;
use crate::ui::{format, Presenter};

/// Engine behavior knobs derived from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Treat unknown effect keys as an error instead of warn-and-ignore.
    pub strict_effects: bool,
}

/// One playthrough: immutable story tables, one mutable state, and the
/// presentation/persistence collaborators, all explicitly threaded.
pub struct Session<'a, P: Presenter, S: SaveStore> {
    pub(crate) story: &'a StoryData,
    pub(crate) opts: EngineOptions,
    pub(crate) state: GameState,
    pub(crate) presenter: &'a mut P,
    saves: &'a S,
}

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Create a session staged on a pristine deep copy of the story's
    /// initial-state template.
    pub fn new(story: &'a StoryData, opts: EngineOptions, presenter: &'a mut P, saves: &'a S) -> Self {
        Self {
            story,
            opts,
            state: story.initial_state.clone(),
            presenter,
            saves,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Read access to the presenter, for transcript inspection.
    pub fn presenter(&self) -> &P {
        &*self.presenter
    }

    /// Title screen: New Game / Continue / Quit, then the main menu until the
    /// session ends.
    pub fn run(&mut self) -> Result<(), EngineError> {
        let story = self.story;
        self.presenter.heading(&format!(
            "{}\n{}",
            story.meta.title.to_uppercase(),
            story.meta.subtitle
        ))?;
        let credits = &story.meta.credits;
        if !credits.game_designer.is_empty() {
            self.presenter.message(&format!(
                "{} (Designer) | {} (Prompter) | {} (Engineer)",
                credits.game_designer, credits.prompter, credits.software_engineer
            ))?;
        }

        let options = [
            "New Game".to_string(),
            "Continue".to_string(),
            "Quit".to_string(),
        ];
        match self.presenter.choose("Choose an option: ", &options)? {
            0 => {
                if self.start_new_game()? == Flow::SessionOver {
                    return Ok(());
                }
                self.main_menu()
            }
            1 => match self.saves.load()? {
                Some(state) => {
                    self.state = state;
                    info!("snapshot restored, day {}", self.state.day);
                    self.presenter.message("Game loaded!")?;
                    self.presenter.acknowledge()?;
                    self.main_menu()
                }
                None => {
                    self.presenter
                        .message("No save file found. Starting new game...")?;
                    self.presenter.acknowledge()?;
                    if self.start_new_game()? == Flow::SessionOver {
                        return Ok(());
                    }
                    self.main_menu()
                }
            },
            _ => {
                self.presenter.message("Goodbye!")?;
                Ok(())
            }
        }
    }

    /// Reset to the pristine template, name the player, play the intro.
    pub fn start_new_game(&mut self) -> Result<Flow, EngineError> {
        self.state = self.story.initial_state.clone();
        let default_name = self.state.player.name.clone();
        let default_alias = self.state.player.thief_name.clone();

        let name = self
            .presenter
            .prompt_line(&format!("\nEnter your name (default: {}): ", default_name))?;
        if !name.trim().is_empty() {
            self.state.player.name = name.trim().to_string();
        }
        let alias = self.presenter.prompt_line(&format!(
            "Enter your thief alias (default: {}): ",
            default_alias
        ))?;
        if !alias.trim().is_empty() {
            self.state.player.thief_name = alias.trim().to_string();
        }
        info!(
            "new game: {} aka {}",
            self.state.player.name, self.state.player.thief_name
        );

        self.play_dialogue(DIALOGUE_INTRO)
    }

    /// The location/menu hub. Returns when the player quits or an ending
    /// terminates the session.
    pub fn main_menu(&mut self) -> Result<(), EngineError> {
        loop {
            self.presenter.status(&self.state)?;
            self.presenter.message("=== LOCATIONS ===")?;

            let available: Vec<(String, String)> = self
                .story
                .locations
                .iter()
                .filter(|loc| is_unlocked(&self.state, loc))
                .map(|loc| {
                    let marker = if self.state.current_location.as_deref() == Some(&loc.id) {
                        " (YOU ARE HERE)"
                    } else {
                        ""
                    };
                    (loc.id.clone(), format!("{} {}{}", loc.icon, loc.name, marker))
                })
                .collect();

            let mut options: Vec<String> =
                available.iter().map(|(_, label)| label.clone()).collect();
            options.push("View Inventory".to_string());
            options.push("View Intel Notes".to_string());
            options.push("Save Game".to_string());
            options.push("Quit".to_string());

            let choice = self
                .presenter
                .choose("Where do you want to go? ", &options)?;

            if choice < available.len() {
                let id = available[choice].0.clone();
                if self.visit(&id)? == Flow::SessionOver {
                    return Ok(());
                }
                continue;
            }
            match choice - available.len() {
                0 => {
                    let view = format::format_inventory(&self.state);
                    self.presenter.message(&view)?;
                    self.presenter.acknowledge()?;
                }
                1 => {
                    let view = format::format_intel(&self.state);
                    self.presenter.message(&view)?;
                    self.presenter.acknowledge()?;
                }
                2 => {
                    self.saves.save(&self.state)?;
                    self.presenter.message("Game saved!")?;
                    self.presenter.acknowledge()?;
                }
                _ => {
                    // Quit persists the snapshot before ending the session.
                    self.saves.save(&self.state)?;
                    self.presenter.message("Thanks for playing!")?;
                    return Ok(());
                }
            }
        }
    }
}

/// Capitalize the first character, for stat names in player-facing text.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_handles_empty_and_word() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("charisma"), "Charisma");
    }
}
