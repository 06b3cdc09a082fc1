//! Time advancement and daily decay.

use log::debug;

use crate::engine::ending::{ENDING_HEALTH, ENDING_STARVATION};
use crate::engine::state::{GameState, TimeOfDay};

/// Hunger lost per time step.
pub const HUNGER_DECAY: i64 = 5;
/// Hygiene lost per time step.
pub const HYGIENE_DECAY: i64 = 3;

/// Advance the four-step day cycle, incrementing the day counter on the
/// Night → Morning wrap, then decay hunger and hygiene (floor 0).
///
/// Fatal thresholds are checked in fixed order: hunger first, then health.
/// Returns the ending key the caller must trigger, or `None`. When both are
/// simultaneously exhausted, starvation governs.
pub fn advance_time(state: &mut GameState) -> Option<&'static str> {
    if state.time_of_day == TimeOfDay::Night {
        state.day += 1;
    }
    state.time_of_day = state.time_of_day.next();
    debug!("time advanced: day {} {}", state.day, state.time_of_day.label());

    decay_stat(state, "hunger", HUNGER_DECAY);
    decay_stat(state, "hygiene", HYGIENE_DECAY);

    if state.stat("hunger") <= 0 {
        return Some(ENDING_STARVATION);
    }
    if state.stat("health") <= 0 {
        return Some(ENDING_HEALTH);
    }
    None
}

fn decay_stat(state: &mut GameState, name: &str, amount: i64) {
    if let Some(value) = state.stats.get_mut(name) {
        *value = (*value - amount).max(0);
    }
}
