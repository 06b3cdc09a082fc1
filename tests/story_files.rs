//! The authoring workflow: export the built-in story, load it back from
//! disk, and play against the loaded copy.

mod common;

use common::leave_index;
use phantomthrill::engine::{EngineOptions, Flow, Session};
use phantomthrill::save::MemorySaveStore;
use phantomthrill::story::seed::{builtin_raw, builtin_story};
use phantomthrill::story::load_story;
use phantomthrill::ui::ScriptedPresenter;

#[test]
fn exported_story_loads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.json");
    let json = serde_json::to_string_pretty(&builtin_raw()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = load_story(&path).unwrap();
    assert_eq!(loaded, builtin_story());
}

#[test]
fn edited_story_plays_with_its_changes() {
    let mut raw = builtin_raw();
    raw.meta.title = "Phantom Redux".to_string();
    // price the drink beyond the $150 starting money
    let record = raw.actions.get_mut("Order a drink").unwrap();
    record.cost = 999;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.json");
    std::fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();
    let story = load_story(&path).unwrap();

    let saves = MemorySaveStore::new();
    let leave = leave_index(&story, "bar", false);
    let mut ui = ScriptedPresenter::new().with_choices([0, leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    assert_eq!(session.visit("bar").unwrap(), Flow::Leave);
    // the edited price puts the drink out of reach
    assert!(session.presenter().transcript_contains("Not enough money!"));
    assert_eq!(session.state().stat("money"), 150);
    assert_eq!(session.state().stat("charisma"), 20);
}
