//! The chapter-one critical path: clinic, underground pitch, museum scout,
//! and the heist unlock, driven through scripted visits.

mod common;

use common::{count_lines, leave_index, story};
use phantomthrill::engine::{EngineOptions, Flow, Session};
use phantomthrill::save::MemorySaveStore;
use phantomthrill::ui::ScriptedPresenter;

#[test]
fn critical_path_unlocks_the_heist() {
    let story = story();
    let saves = MemorySaveStore::new();
    // accept the pitch, brush off the inspector, then leave the market
    let leave = leave_index(&story, "underground", true);
    let mut ui = ScriptedPresenter::new().with_choices([0, 0, leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    assert_eq!(session.visit("clinic").unwrap(), Flow::Continue);
    assert!(session.state().flag("found_underground"));

    assert_eq!(session.visit("underground").unwrap(), Flow::Continue);
    assert!(session.state().flag("accepted_heist"));
    assert_eq!(session.state().stat("criminality"), 15);
    assert!(session.state().inventory.contains(&"Burner Phone".to_string()));
    assert!(session.state().inventory.contains(&"Disguise Kit".to_string()));

    assert_eq!(session.visit("museum").unwrap(), Flow::Continue);
    assert!(session.state().flag("got_jade_whip_info"));
    assert!(session.state().flag("met_inspector"));
    assert_eq!(session.state().heist.suspicion, 1);
    assert!(session
        .state()
        .heist
        .intel
        .contains(&"Jade Whip location: East Wing".to_string()));

    // with both flags set, the market now offers the heist entry
    assert_eq!(session.visit("underground").unwrap(), Flow::Leave);
    assert!(session
        .presenter()
        .transcript_contains("*** BEGIN MUSEUM HEIST ***"));
}

#[test]
fn declining_the_pitch_keeps_it_on_the_table() {
    let story = story();
    let saves = MemorySaveStore::new();
    let mut ui = ScriptedPresenter::new().with_choices([1, 1]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
    session.state_mut().set_flag("found_underground");

    session.visit("underground").unwrap();
    assert!(!session.state().flag("accepted_heist"));
    assert_eq!(session.state().stat("charisma"), 21);
    // no kit for a tourist
    assert!(session.state().inventory.is_empty());

    session.visit("underground").unwrap();
    // the pitch replays until accepted
    assert_eq!(count_lines(session.presenter(), "[Dealer]"), 2);
}

#[test]
fn inspector_appears_only_on_the_first_scout() {
    let story = story();
    let saves = MemorySaveStore::new();
    let museum_leave = leave_index(&story, "museum", false);
    let mut ui = ScriptedPresenter::new().with_choices([1, museum_leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
    session.state_mut().set_flag("accepted_heist");

    session.visit("museum").unwrap();
    assert_eq!(session.state().heist.suspicion, 2);
    let mori_lines = count_lines(session.presenter(), "[Inspector Mori]");
    assert!(mori_lines > 0);

    // second visit goes to the plain menu; Mori does not reappear
    session.visit("museum").unwrap();
    assert_eq!(count_lines(session.presenter(), "[Inspector Mori]"), mori_lines);
}

#[test]
fn intel_notes_do_not_duplicate() {
    let story = story();
    let saves = MemorySaveStore::new();
    let museum_leave = leave_index(&story, "museum", false);
    // case the exhibits twice, then leave
    let mut ui = ScriptedPresenter::new().with_choices([0, 0, museum_leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    session.visit("museum").unwrap();
    let cameras: Vec<_> = session
        .state()
        .heist
        .intel
        .iter()
        .filter(|note| note.contains("40-second"))
        .collect();
    assert_eq!(cameras.len(), 1);
    // the stat gain still applies on the repeat
    assert_eq!(session.state().stat("knowledge"), 24);
}
