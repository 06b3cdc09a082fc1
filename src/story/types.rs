//! Story Data Store schema.
//!
//! These tables are loaded once (from a JSON story document or the built-in
//! seed) and are immutable for the life of the process. Action names and
//! special location roles are resolved into tagged variants at load time so
//! unknown references surface early, while still degrading gracefully at
//! runtime through explicit `Unknown` fallbacks.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::engine::state::GameState;

/// Reserved speaker name routed to the narration renderer.
pub const NARRATOR: &str = "Narrator";

// ============================================================================
// Effects
// ============================================================================

/// A single data-described state mutation attached to a choice.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add `delta` to a named stat, clamped to [0,100].
    StatDelta { stat: String, delta: i64 },
    /// Set a story flag.
    SetFlag(String),
    /// Add to the unclamped suspicion counter.
    AddSuspicion(i64),
    /// Invoke the ending resolver. Effects listed after this one still apply.
    TriggerEnding(String),
    /// Unrecognized key, carried through for diagnostics and round-tripping.
    Unknown { key: String, value: serde_json::Value },
}

/// An ordered list of effects. Authored as a JSON object whose key order is
/// significant, so (de)serialization goes through a map visitor rather than a
/// HashMap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectList(pub Vec<Effect>);

impl EffectList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for EffectList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EffectListVisitor;

        impl<'de> Visitor<'de> for EffectListVisitor {
            type Value = EffectList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of effect keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut effects = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    effects.push(classify_effect(key, value));
                }
                Ok(EffectList(effects))
            }
        }

        deserializer.deserialize_map(EffectListVisitor)
    }
}

impl Serialize for EffectList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for effect in &self.0 {
            match effect {
                Effect::StatDelta { stat, delta } => map.serialize_entry(stat, delta)?,
                Effect::SetFlag(name) => map.serialize_entry("flag", name)?,
                Effect::AddSuspicion(amount) => map.serialize_entry("suspicion", amount)?,
                Effect::TriggerEnding(key) => map.serialize_entry("ending", key)?,
                Effect::Unknown { key, value } => map.serialize_entry(key, value)?,
            }
        }
        map.end()
    }
}

fn classify_effect(key: String, value: serde_json::Value) -> Effect {
    match key.as_str() {
        "flag" => match value.as_str() {
            Some(name) => Effect::SetFlag(name.to_string()),
            None => Effect::Unknown { key, value },
        },
        "suspicion" => match value.as_i64() {
            Some(amount) => Effect::AddSuspicion(amount),
            None => Effect::Unknown { key, value },
        },
        "ending" => match value.as_str() {
            Some(ending) => Effect::TriggerEnding(ending.to_string()),
            None => Effect::Unknown { key, value },
        },
        _ => match value.as_i64() {
            Some(delta) => Effect::StatDelta { stat: key, delta },
            None => Effect::Unknown { key, value },
        },
    }
}

// ============================================================================
// Dialogues
// ============================================================================

/// One line of a dialogue sequence. A line with choices is a branch point;
/// choices mutate state only and never change which line comes next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<DialogueChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueChoice {
    pub text: String,
    #[serde(default, skip_serializing_if = "EffectList::is_empty")]
    pub effect: EffectList,
}

impl DialogueLine {
    pub fn new(speaker: &str, text: &str) -> Self {
        Self {
            speaker: speaker.to_string(),
            text: text.to_string(),
            choices: Vec::new(),
        }
    }

    pub fn with_choice(mut self, text: &str, effect: EffectList) -> Self {
        self.choices.push(DialogueChoice {
            text: text.to_string(),
            effect,
        });
        self
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Stat adjustment carried by a scripted action: a clamped delta, or the
/// reserved "full" value meaning "set to 100".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatAdjust {
    Delta(i64),
    Full,
}

impl Serialize for StatAdjust {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatAdjust::Delta(delta) => serializer.serialize_i64(*delta),
            StatAdjust::Full => serializer.serialize_str("full"),
        }
    }
}

impl<'de> Deserialize<'de> for StatAdjust {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let Some(delta) = value.as_i64() {
            return Ok(StatAdjust::Delta(delta));
        }
        if value.as_str() == Some("full") {
            return Ok(StatAdjust::Full);
        }
        Err(serde::de::Error::custom(format!(
            "expected an integer delta or \"full\", got {}",
            value
        )))
    }
}

/// A data-driven action available at a location: a cost gate, stat
/// adjustments, optional intel and time advancement, and a message (with an
/// optional post-heist variant).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionRecord {
    #[serde(default)]
    pub cost: i64,
    /// Stat name -> adjustment, applied in authored order.
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "stat_adjust_map")]
    pub effects: Vec<(String, StatAdjust)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_intel: Option<String>,
    #[serde(default)]
    pub advance_time: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_after_heist: Option<String>,
}

/// Ordered map (de)serialization for action stat adjustments, mirroring the
/// EffectList treatment: authored as a JSON object, order preserved.
mod stat_adjust_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        entries: &[(String, StatAdjust)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (stat, adjust) in entries {
            map.serialize_entry(stat, adjust)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, StatAdjust)>, D::Error> {
        struct AdjustVisitor;

        impl<'de> Visitor<'de> for AdjustVisitor {
            type Value = Vec<(String, StatAdjust)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of stat names to adjustments")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, StatAdjust>()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(AdjustVisitor)
    }
}

// ============================================================================
// Locations
// ============================================================================

/// Fixed hard-coded narrative actions, resolved from their authored names at
/// load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAction {
    /// Clinic receptionist: first conversation introduces Cal.
    MeetReceptionist,
    /// Underground dealer: heist offer, readiness check, heist start.
    MeetDealer,
}

impl SpecialAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Talk to receptionist" => Some(SpecialAction::MeetReceptionist),
            "Talk to dealer" => Some(SpecialAction::MeetDealer),
            _ => None,
        }
    }
}

/// A location menu entry, resolved once at load time. `Unknown` is the
/// explicit graceful-degradation fallback for dangling action names.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRef {
    /// Present in the action table.
    Scripted(String),
    /// A fixed hard-coded narrative action.
    Special { name: String, action: SpecialAction },
    /// Matches neither tier; a no-op at runtime.
    Unknown(String),
}

impl ActionRef {
    /// The text shown in the location menu.
    pub fn label(&self) -> &str {
        match self {
            ActionRef::Scripted(name) => name,
            ActionRef::Special { name, .. } => name,
            ActionRef::Unknown(name) => name,
        }
    }
}

/// Locations with bespoke entry triggers, resolved from location ids at load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocationKind {
    Clinic,
    Underground,
    Museum,
    #[default]
    Generic,
}

impl LocationKind {
    pub fn from_id(id: &str) -> Self {
        match id {
            "clinic" => LocationKind::Clinic,
            "underground" => LocationKind::Underground,
            "museum" => LocationKind::Museum,
            _ => LocationKind::Generic,
        }
    }
}

/// Data-driven first-visit trigger: set the guard flag, play the dialogue.
/// Skipped entirely when the dialogue id is absent from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FirstVisit {
    pub flag: String,
    pub dialogue: String,
}

/// A visitable location: menu metadata, authored actions, and the lock rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub actions: Vec<ActionRef>,
    /// A locked location is enterable only once `unlock_flag` is set; locked
    /// with no flag means permanently locked.
    pub locked: bool,
    pub unlock_flag: Option<String>,
    pub first_visit: Option<FirstVisit>,
    pub kind: LocationKind,
}

// ============================================================================
// Heists
// ============================================================================

/// The three heist phases, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeistPhase {
    Infiltration,
    CallingCard,
    Escape,
}

impl HeistPhase {
    pub fn title(self) -> &'static str {
        match self {
            HeistPhase::Infiltration => "INFILTRATION",
            HeistPhase::CallingCard => "CALLING CARD",
            HeistPhase::Escape => "ESCAPE",
        }
    }
}

/// One selectable approach in a heist scene: succeeds iff the tagged stat
/// meets the threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeistOption {
    pub text: String,
    pub stat: String,
    pub req: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeistScene {
    #[serde(default)]
    pub icon: String,
    pub description: String,
    pub options: Vec<HeistOption>,
}

/// A scripted three-phase heist: ordered scenes per phase, strictly
/// sequential, failure fatal to the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeistSequence {
    pub infiltration: Vec<HeistScene>,
    pub calling_card: Vec<HeistScene>,
    pub escape: Vec<HeistScene>,
}

impl HeistSequence {
    /// Phases in play order with their scene lists.
    pub fn phases(&self) -> [(HeistPhase, &[HeistScene]); 3] {
        [
            (HeistPhase::Infiltration, self.infiltration.as_slice()),
            (HeistPhase::CallingCard, self.calling_card.as_slice()),
            (HeistPhase::Escape, self.escape.as_slice()),
        ]
    }
}

// ============================================================================
// Endings and metadata
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndingRecord {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub game_designer: String,
    #[serde(default)]
    pub prompter: String,
    #[serde(default)]
    pub software_engineer: String,
}

/// Presentation-only metadata for the title screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaRecord {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub credits: Credits,
}

// ============================================================================
// The assembled store
// ============================================================================

/// The immutable story data store: loaded once, keyed lookups thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryData {
    pub meta: MetaRecord,
    /// Pristine template deep-copied by "New Game".
    pub initial_state: GameState,
    pub dialogues: HashMap<String, Vec<DialogueLine>>,
    /// Authored order drives the main-menu listing.
    pub locations: Vec<LocationRecord>,
    pub actions: HashMap<String, ActionRecord>,
    pub heists: HashMap<String, HeistSequence>,
    pub endings: HashMap<String, EndingRecord>,
}

impl StoryData {
    pub fn location(&self, id: &str) -> Option<&LocationRecord> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// Lines for a dialogue id; unknown ids resolve to an empty sequence.
    pub fn dialogue(&self, key: &str) -> &[DialogueLine] {
        self.dialogues.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}
