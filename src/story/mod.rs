//! Story data model and loading.
//!
//! `types` defines the immutable store, `loader` parses authored JSON
//! documents into it, and `seed` ships the built-in PhantomThrill chapter so
//! the game runs with no story file at all.

pub mod loader;
pub mod seed;
pub mod types;

pub use loader::{load_story, RawStory};
pub use types::StoryData;
