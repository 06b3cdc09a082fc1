//! Snapshot persistence.
//!
//! Saving is an explicit player action writing one flat JSON snapshot; load
//! restores it structurally as-is. The snapshot carries a schema version so
//! an incompatible file is refused instead of half-read (no migration policy
//! exists; see DESIGN.md).

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::errors::EngineError;
use crate::engine::state::GameState;

pub const SAVE_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    schema_version: u8,
    saved_at: DateTime<Utc>,
    state: GameState,
}

/// Persistence seam the session talks to. Save overwrites the single slot,
/// last write wins; load yields `None` when no snapshot exists.
pub trait SaveStore {
    fn save(&self, state: &GameState) -> Result<(), EngineError>;
    fn load(&self) -> Result<Option<GameState>, EngineError>;
}

/// Flat-file JSON snapshot store.
pub struct JsonSaveStore {
    path: PathBuf,
}

impl JsonSaveStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&self, state: &GameState) -> Result<(), EngineError> {
        let file = SaveFile {
            schema_version: SAVE_SCHEMA_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        info!("saved snapshot to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, EngineError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SaveFile = serde_json::from_str(&contents)?;
        if file.schema_version != SAVE_SCHEMA_VERSION {
            return Err(EngineError::SchemaMismatch {
                expected: SAVE_SCHEMA_VERSION,
                found: file.schema_version,
            });
        }
        Ok(Some(file.state))
    }
}

/// In-memory single-slot store backing tests.
#[derive(Default)]
pub struct MemorySaveStore {
    slot: RefCell<Option<GameState>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&self, state: &GameState) -> Result<(), EngineError> {
        *self.slot.borrow_mut() = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, EngineError> {
        Ok(self.slot.borrow().clone())
    }
}
