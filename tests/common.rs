//! Shared helpers for the integration tests.

use phantomthrill::engine::{GameState, Session};
use phantomthrill::save::SaveStore;
use phantomthrill::story::seed::builtin_story;
use phantomthrill::story::StoryData;
use phantomthrill::ui::{Presenter, ScriptedPresenter};

pub fn story() -> StoryData {
    builtin_story()
}

/// Menu index of "Leave" at a location: the heist entry (when offered) and
/// the location's actions come first.
pub fn leave_index(story: &StoryData, location_id: &str, heist_offered: bool) -> usize {
    let actions = story.location(location_id).unwrap().actions.len();
    if heist_offered {
        actions + 1
    } else {
        actions
    }
}

/// Raise a stat to an exact value through the engine's own clamp path.
pub fn set_stat(state: &mut GameState, name: &str, target: i64) {
    let delta = target - state.stat(name);
    state.adjust_stat(name, delta).unwrap();
}

/// Flags and stats for a crew member who could clear every heist scene.
pub fn prep_for_perfect_heist<P: Presenter, S: SaveStore>(session: &mut Session<P, S>) {
    let state = session.state_mut();
    state.set_flag("accepted_heist");
    state.set_flag("found_underground");
    state.set_flag("got_jade_whip_info");
    set_stat(state, "fitness", 40);
    set_stat(state, "charisma", 40);
    set_stat(state, "knowledge", 40);
    set_stat(state, "criminality", 25);
}

/// Count transcript lines matching a predicate.
pub fn count_lines(ui: &ScriptedPresenter, needle: &str) -> usize {
    ui.transcript
        .iter()
        .filter(|line| line.contains(needle))
        .count()
}
