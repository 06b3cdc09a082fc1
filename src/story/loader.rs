//! Authoring-format loader.
//!
//! Story documents are JSON. Raw seed structs mirror the authored shape and
//! are converted into resolved records: location action names become tagged
//! `ActionRef` variants and special location roles become `LocationKind`, so
//! dangling names are spotted (and warn-logged) once at load instead of
//! falling through silently mid-playthrough. Beyond that resolution the
//! document is trusted as authored; referential gaps degrade at runtime.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::errors::EngineError;
use crate::engine::state::GameState;
use crate::story::types::{
    ActionRecord, ActionRef, DialogueLine, EndingRecord, FirstVisit, HeistSequence,
    LocationKind, LocationRecord, MetaRecord, SpecialAction, StoryData,
};

/// The authored story document, pre-resolution. Also used by `init` to
/// export the built-in seed for customization.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawStory {
    pub meta: MetaRecord,
    pub initial_state: GameState,
    #[serde(default)]
    pub dialogues: HashMap<String, Vec<DialogueLine>>,
    #[serde(default)]
    pub locations: Vec<RawLocation>,
    #[serde(default)]
    pub actions: HashMap<String, ActionRecord>,
    #[serde(default)]
    pub heist_sequences: HashMap<String, HeistSequence>,
    #[serde(default)]
    pub endings: HashMap<String, EndingRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawLocation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_visit: Option<FirstVisit>,
}

/// Load and resolve a story document from disk.
pub fn load_story<P: AsRef<Path>>(path: P) -> Result<StoryData, EngineError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let raw: RawStory =
        serde_json::from_str(&contents).map_err(|e| EngineError::InvalidStory {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(resolve(raw))
}

/// Resolve a raw story into the immutable store. Shared by the file loader
/// and the built-in seed.
pub fn resolve(raw: RawStory) -> StoryData {
    let locations = raw
        .locations
        .into_iter()
        .map(|loc| resolve_location(loc, &raw.actions))
        .collect();

    StoryData {
        meta: raw.meta,
        initial_state: raw.initial_state,
        dialogues: raw.dialogues,
        locations,
        actions: raw.actions,
        heists: raw.heist_sequences,
        endings: raw.endings,
    }
}

fn resolve_location(raw: RawLocation, actions: &HashMap<String, ActionRecord>) -> LocationRecord {
    let resolved = raw
        .actions
        .into_iter()
        .map(|name| {
            if actions.contains_key(&name) {
                ActionRef::Scripted(name)
            } else if let Some(action) = SpecialAction::from_name(&name) {
                ActionRef::Special { name, action }
            } else {
                warn!(
                    "location '{}' lists action '{}' that matches neither tier; it will be a no-op",
                    raw.id, name
                );
                ActionRef::Unknown(name)
            }
        })
        .collect();

    LocationRecord {
        kind: LocationKind::from_id(&raw.id),
        id: raw.id,
        name: raw.name,
        icon: raw.icon,
        description: raw.description,
        actions: resolved,
        locked: raw.locked,
        unlock_flag: raw.unlock_flag,
        first_visit: raw.first_visit,
    }
}
