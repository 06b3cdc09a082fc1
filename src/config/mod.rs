//! Configuration management for the game runtime.
//!
//! Settings live in a TOML file (by default `config.toml` next to the
//! binary). Every field has a sensible default, so a missing file or a
//! partial file both work: `[game]` controls where story data and saves
//! live plus a couple of presentation knobs, and `[logging]` sets the
//! default log level used when `RUST_LOG` is not set.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

/// Gameplay and storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Path to a story JSON file. When unset the built-in story is used.
    pub story_path: Option<PathBuf>,
    /// Where the save file is written.
    pub save_path: PathBuf,
    /// Treat unrecognized effect keys in story data as errors instead of
    /// logging a warning and skipping them.
    pub strict_effects: bool,
    /// Per-character delay for the typewriter text effect, in milliseconds.
    /// Zero disables the effect.
    pub text_delay_ms: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug or trace.
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            game: GameConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            story_path: None,
            save_path: PathBuf::from("phantomthrill_save.json"),
            strict_effects: false,
            text_delay_ms: 15,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// The configured level as a filter. `validate` rejects unparseable
    /// levels, so the fallback only covers unvalidated configs.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Write a default configuration file. Refuses to overwrite.
    pub fn create_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow!("Config file already exists: {}", path.display()));
        }
        let config = Config::default();
        let content =
            toml::to_string_pretty(&config).context("Failed to serialize default config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Check settings for obvious mistakes.
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => return Err(anyhow!("Invalid log level: {}", other)),
        }
        if self.game.text_delay_ms > 500 {
            return Err(anyhow!(
                "text_delay_ms of {} is unreasonably slow",
                self.game.text_delay_ms
            ));
        }
        Ok(())
    }
}
