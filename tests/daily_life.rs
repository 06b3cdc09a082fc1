//! Scripted actions, the cost gate, and the day/night clock as exercised
//! through ordinary location visits.

mod common;

use common::{leave_index, set_stat, story};
use phantomthrill::engine::{EngineOptions, Flow, Session, TimeOfDay};
use phantomthrill::save::MemorySaveStore;
use phantomthrill::ui::ScriptedPresenter;

#[test]
fn working_out_charges_money_and_burns_the_afternoon() {
    let story = story();
    let saves = MemorySaveStore::new();
    let leave = leave_index(&story, "gym", false);
    let mut ui = ScriptedPresenter::new().with_choices([0, leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    assert_eq!(session.visit("gym").unwrap(), Flow::Leave);

    let state = session.state();
    assert_eq!(state.stat("money"), 140);
    assert_eq!(state.stat("fitness"), 25);
    // the workout itself costs 10 hunger, then the clock tick costs 5 more
    assert_eq!(state.stat("hunger"), 65);
    assert_eq!(state.stat("hygiene"), 67);
    assert_eq!(state.time_of_day, TimeOfDay::Afternoon);
    assert_eq!(state.day, 1);
}

#[test]
fn unaffordable_action_changes_nothing() {
    let story = story();
    let saves = MemorySaveStore::new();
    let leave = leave_index(&story, "restaurant", false);
    let mut ui = ScriptedPresenter::new().with_choices([0, leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
    set_stat(session.state_mut(), "money", 5);

    session.visit("restaurant").unwrap();

    assert!(session.presenter().transcript_contains("Not enough money!"));
    let state = session.state();
    assert_eq!(state.stat("money"), 5);
    assert_eq!(state.stat("hunger"), 80);
    assert_eq!(state.time_of_day, TimeOfDay::Morning);
}

#[test]
fn night_wraps_into_the_next_morning() {
    let story = story();
    let saves = MemorySaveStore::new();
    let leave = leave_index(&story, "motel", false);
    // four naps: Morning -> Afternoon -> Evening -> Night -> Morning (day 2)
    let mut ui = ScriptedPresenter::new().with_choices([0, 0, 0, 0, leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    session.visit("motel").unwrap();

    let state = session.state();
    assert_eq!(state.day, 2);
    assert_eq!(state.time_of_day, TimeOfDay::Morning);
    assert_eq!(state.stat("hunger"), 60);
    assert_eq!(state.stat("hygiene"), 58);
    // sleep heals 10 per use but health was near full
    assert_eq!(state.stat("health"), 100);
}

#[test]
fn starving_out_ends_the_session() {
    let story = story();
    let saves = MemorySaveStore::new();
    // sleep forever; hunger 80 reaches zero on the sixteenth clock tick
    let mut ui = ScriptedPresenter::new().with_choices(vec![0; 16]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    let flow = session.visit("motel").unwrap();

    assert_eq!(flow, Flow::SessionOver);
    assert_eq!(session.state().stat("hunger"), 0);
    assert!(session.presenter().transcript_contains("HUNGER'S TOLL"));
}

#[test]
fn wanted_posters_change_after_the_heist() {
    let story = story();
    let saves = MemorySaveStore::new();
    let leave = leave_index(&story, "police", false);
    let mut ui = ScriptedPresenter::new().with_choices([0, leave, 0, leave]);
    let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

    session.visit("police").unwrap();
    let before = session.presenter().transcript.len();

    session.state_mut().set_flag("completed_museum_heist");
    session.visit("police").unwrap();

    let transcript = &session.presenter().transcript;
    assert!(transcript[before..]
        .iter()
        .any(|line| line.contains("A fresh poster")));
    assert!(!transcript[..before]
        .iter()
        .any(|line| line.contains("A fresh poster")));
}
