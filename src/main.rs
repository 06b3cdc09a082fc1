use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use phantomthrill::config::Config;
use phantomthrill::engine::{EngineOptions, Session};
use phantomthrill::save::JsonSaveStore;
use phantomthrill::story;
use phantomthrill::ui::ConsolePresenter;

#[derive(Parser)]
#[command(name = "phantomthrill")]
#[command(about = "A branching crime-story adventure for the terminal")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game (the default when no subcommand is given)
    Play {
        /// Story JSON file to load instead of the built-in story
        #[arg(long)]
        story: Option<PathBuf>,
        /// Save file location, overriding the configured path
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Write a default config.toml and export the built-in story JSON
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Some(Commands::Init) => init(&cli.config),
        Some(Commands::Play { story, save }) => play(&config, story, save),
        None => play(&config, None, None),
    }
}

/// The configured level is the base; `-v` raises it from the command line.
/// RUST_LOG still wins over both when set.
fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();
}

fn play(config: &Config, story_path: Option<PathBuf>, save_path: Option<PathBuf>) -> Result<()> {
    let story_path = story_path.or_else(|| config.game.story_path.clone());
    let story = match &story_path {
        Some(path) => {
            info!("Loading story from {}", path.display());
            story::load_story(path)
                .with_context(|| format!("Failed to load story from {}", path.display()))?
        }
        None => {
            info!("Using the built-in story");
            story::seed::builtin_story()
        }
    };

    let save_path = save_path.unwrap_or_else(|| config.game.save_path.clone());
    let saves = JsonSaveStore::new(save_path);
    let mut presenter = ConsolePresenter::new(config.game.text_delay_ms);
    let options = EngineOptions {
        strict_effects: config.game.strict_effects,
    };

    let mut session = Session::new(&story, options, &mut presenter, &saves);
    session.run().context("Game session failed")?;
    Ok(())
}

fn init(config_path: &PathBuf) -> Result<()> {
    Config::create_default(config_path)?;
    println!("Wrote {}", config_path.display());

    let raw = story::seed::builtin_raw();
    let story_dir = PathBuf::from("data");
    std::fs::create_dir_all(&story_dir).context("Failed to create data directory")?;
    let story_file = story_dir.join("story.json");
    let json = serde_json::to_string_pretty(&raw).context("Failed to serialize story")?;
    std::fs::write(&story_file, json)
        .with_context(|| format!("Failed to write {}", story_file.display()))?;
    println!("Wrote {}", story_file.display());
    println!("Point [game] story_path at it in the config to play an edited copy.");
    Ok(())
}
