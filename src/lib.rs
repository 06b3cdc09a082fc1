//! PhantomThrill is a branching crime-story adventure played in the
//! terminal. The player drifts into the life of a cat burglar: explore the
//! city, build up stats, gather intel, and pull off a museum heist.
//!
//! The crate splits into a few layers:
//!
//! - [`story`] holds the data model for story content (dialogues,
//!   locations, actions, heists, endings) plus a JSON loader and the
//!   built-in story seed.
//! - [`engine`] runs a game session against story data: menus, dialogue
//!   playback, effect application, the day/night clock, and the heist
//!   sequence itself.
//! - [`save`] persists game state as schema-versioned JSON.
//! - [`ui`] abstracts presentation behind the [`ui::Presenter`] trait,
//!   with a console implementation and a scripted one for tests.
//! - [`config`] reads the TOML settings file.

pub mod config;
pub mod engine;
pub mod save;
pub mod story;
pub mod ui;

pub use config::Config;
pub use engine::{EngineOptions, Session};
pub use story::{load_story, StoryData};
