//! Mutable per-session player state.
//!
//! A `GameState` is always fully defined: "New Game" deep-copies the story's
//! `initial_state` template (never borrows it), "Continue" deserializes a
//! prior snapshot. All stat mutation outside a raw money spend clamps to
//! [0,100].

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

/// Reserved stat name the action cost gate spends from.
pub const STAT_MONEY: &str = "money";

/// Lower/upper clamp bounds for every clamped stat mutation.
pub const STAT_MIN: i64 = 0;
pub const STAT_MAX: i64 = 100;

/// Placeholder tokens substituted into displayed speaker names and text.
pub const TOKEN_PLAYER_NAME: &str = "{player_name}";
pub const TOKEN_THIEF_NAME: &str = "{thief_name}";

/// The four-step day cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// The next step in the cycle; wraps from Night back to Morning.
    pub fn next(self) -> Self {
        match self {
            TimeOfDay::Morning => TimeOfDay::Afternoon,
            TimeOfDay::Afternoon => TimeOfDay::Evening,
            TimeOfDay::Evening => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Morning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// The player's chosen identity, substituted into displayed text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerInfo {
    pub name: String,
    pub thief_name: String,
}

/// Heist preparation progress: collected intel notes and accumulated suspicion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeistProgress {
    /// Distinct intel notes in collection order. Insertion is idempotent.
    #[serde(default)]
    pub intel: Vec<String>,
    /// Unclamped suspicion counter accumulated by effects.
    #[serde(default)]
    pub suspicion: i64,
}

/// The single mutable session snapshot: stats, story flags, inventory, heist
/// progress, clock, and current location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub player: PlayerInfo,
    /// Named numeric attributes. BTreeMap keeps snapshots deterministic.
    pub stats: BTreeMap<String, i64>,
    /// Boolean story-progress markers: present means set, once set never unset.
    #[serde(default)]
    pub flags: BTreeSet<String>,
    /// Item names in acquisition order; duplicates permitted.
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub heist: HeistProgress,
    pub day: u32,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub current_location: Option<String>,
}

impl GameState {
    /// Read a stat, defaulting to 0 when the name is not in the table.
    pub fn stat(&self, name: &str) -> i64 {
        match self.stats.get(name) {
            Some(value) => *value,
            None => {
                debug!("stat '{}' not in table, reading as 0", name);
                0
            }
        }
    }

    /// Whether `name` exists in the stat table at all.
    pub fn has_stat(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    /// Add `delta` to an existing stat, clamped to [0,100]. Returns the new
    /// value, or `None` when the stat is absent from the table (unknown stat
    /// names are an authoring gap, handled by the caller's policy).
    pub fn adjust_stat(&mut self, name: &str, delta: i64) -> Option<i64> {
        let value = self.stats.get_mut(name)?;
        *value = (*value + delta).clamp(STAT_MIN, STAT_MAX);
        Some(*value)
    }

    /// Set an existing stat to the maximum (the reserved "full" adjustment).
    pub fn set_stat_full(&mut self, name: &str) -> Option<i64> {
        let value = self.stats.get_mut(name)?;
        *value = STAT_MAX;
        Some(*value)
    }

    /// Spend money through the cost gate: deduct only when funds suffice.
    /// This is the one unclamped stat mutation; it can never go negative
    /// because the gate refuses short funds.
    pub fn spend(&mut self, cost: i64) -> bool {
        if cost <= 0 {
            return true;
        }
        let money = self.stats.entry(STAT_MONEY.to_string()).or_insert(0);
        if *money >= cost {
            *money -= cost;
            debug!("spent ${}, ${} remaining", cost, *money);
            true
        } else {
            false
        }
    }

    /// Raw money grant used by the chapter-complete reward. No upper clamp.
    pub fn grant_money(&mut self, amount: i64) {
        *self.stats.entry(STAT_MONEY.to_string()).or_insert(0) += amount;
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Set a story flag. Flags are monotonic: there is no way to unset one.
    pub fn set_flag(&mut self, name: &str) {
        if self.flags.insert(name.to_string()) {
            debug!("flag set: {}", name);
        }
    }

    pub fn add_item(&mut self, name: &str) {
        self.inventory.push(name.to_string());
    }

    /// Idempotent intel insertion; returns whether the note was new.
    pub fn add_intel(&mut self, note: &str) -> bool {
        if self.heist.intel.iter().any(|n| n == note) {
            return false;
        }
        self.heist.intel.push(note.to_string());
        debug!("intel gathered: {}", note);
        true
    }

    /// Replace name placeholder tokens with the player's chosen identity.
    pub fn substitute(&self, text: &str) -> String {
        text.replace(TOKEN_PLAYER_NAME, &self.player.name)
            .replace(TOKEN_THIEF_NAME, &self.player.thief_name)
    }
}
