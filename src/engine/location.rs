//! The Location/Unlock Resolver: visibility, one-time entry triggers, and
//! the per-location action menu loop.

use log::{debug, info, warn};

use crate::engine::errors::EngineError;
use crate::engine::session::Session;
use crate::engine::state::GameState;
use crate::engine::{
    Flow, DIALOGUE_ACCEPT_HEIST, DIALOGUE_CLINIC_MEET_CAL, DIALOGUE_INSPECTOR_MEET,
    DIALOGUE_MUSEUM_SCOUT, DIALOGUE_UNDERGROUND_FIRST, FLAG_ACCEPTED_HEIST, FLAG_FOUND_UNDERGROUND,
    FLAG_GOT_JADE_WHIP_INFO, FLAG_MET_CAL, FLAG_MET_INSPECTOR, HEIST_MUSEUM, INTEL_JADE_WHIP,
    ITEM_BURNER_PHONE, ITEM_DISGUISE_KIT, MENU_BEGIN_HEIST,
};
use crate::save::SaveStore;
use crate::story::types::{ActionRef, LocationKind, LocationRecord};
use crate::ui::Presenter;

/// A location with `locked=false` is always open; `locked=true` requires its
/// unlock flag; `locked=true` with no flag is permanently locked. Flags are
/// monotonic, so unlocking never reverses.
pub fn is_unlocked(state: &GameState, location: &LocationRecord) -> bool {
    if !location.locked {
        return true;
    }
    match &location.unlock_flag {
        Some(flag) => state.flag(flag),
        None => false,
    }
}

enum MenuEntry<'s> {
    BeginHeist,
    Action(&'s ActionRef),
    Leave,
}

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Visit a location: lock check, one-time triggers (hard-coded narrative
    /// tier first, then the data-driven first-visit tier), then the menu
    /// loop. At most one trigger fires per visit.
    pub fn visit(&mut self, location_id: &str) -> Result<Flow, EngineError> {
        let story = self.story;
        let Some(loc) = story.location(location_id) else {
            warn!("visit to unknown location '{}'", location_id);
            return Ok(Flow::Continue);
        };

        if !is_unlocked(&self.state, loc) {
            self.presenter
                .message("This location is not accessible yet.")?;
            self.presenter.acknowledge()?;
            return Ok(Flow::Continue);
        }

        self.state.current_location = Some(loc.id.clone());
        debug!("entered '{}'", loc.id);

        match loc.kind {
            LocationKind::Clinic if !self.state.flag(FLAG_MET_CAL) => {
                return self.clinic_meet_cal();
            }
            LocationKind::Underground if !self.state.flag(FLAG_ACCEPTED_HEIST) => {
                return self.underground_first();
            }
            LocationKind::Museum
                if self.state.flag(FLAG_ACCEPTED_HEIST)
                    && !self.state.flag(FLAG_GOT_JADE_WHIP_INFO) =>
            {
                return self.museum_scout();
            }
            _ => {}
        }

        if let Some(first) = &loc.first_visit {
            if !self.state.flag(&first.flag) && story.dialogues.contains_key(&first.dialogue) {
                self.state.set_flag(&first.flag);
                self.presenter.status(&self.state)?;
                self.presenter
                    .heading(&format!("{} === {} ===", loc.icon, loc.name))?;
                if self.play_dialogue(&first.dialogue)? == Flow::SessionOver {
                    return Ok(Flow::SessionOver);
                }
            }
        }

        self.location_menu(loc)
    }

    fn location_menu(&mut self, loc: &LocationRecord) -> Result<Flow, EngineError> {
        loop {
            self.presenter.status(&self.state)?;
            self.presenter
                .heading(&format!("{} === {} ===", loc.icon, loc.name))?;
            self.presenter.message(&loc.description)?;

            let mut entries = Vec::with_capacity(loc.actions.len() + 2);
            if loc.kind == LocationKind::Underground && self.heist_ready() {
                entries.push(MenuEntry::BeginHeist);
            }
            entries.extend(loc.actions.iter().map(MenuEntry::Action));
            entries.push(MenuEntry::Leave);

            let labels: Vec<String> = entries
                .iter()
                .map(|entry| match entry {
                    MenuEntry::BeginHeist => MENU_BEGIN_HEIST.to_string(),
                    MenuEntry::Action(action) => action.label().to_string(),
                    MenuEntry::Leave => "Leave".to_string(),
                })
                .collect();

            self.presenter.message("What do you do?")?;
            let choice = self.presenter.choose("Choose an option: ", &labels)?;

            match &entries[choice] {
                MenuEntry::Leave => return Ok(Flow::Leave),
                MenuEntry::BeginHeist => {
                    let flow = self.run_heist(HEIST_MUSEUM)?;
                    return Ok(if flow == Flow::SessionOver {
                        flow
                    } else {
                        Flow::Leave
                    });
                }
                MenuEntry::Action(action) => match self.resolve_action(action)? {
                    Flow::Continue => {}
                    flow => return Ok(flow),
                },
            }
        }
    }

    /// Heist preconditions: offer accepted and the museum scouted.
    pub(crate) fn heist_ready(&self) -> bool {
        self.state.flag(FLAG_ACCEPTED_HEIST) && self.state.flag(FLAG_GOT_JADE_WHIP_INFO)
    }

    /// The clinic's one-time scene: meeting Cal opens the underground market.
    pub(crate) fn clinic_meet_cal(&mut self) -> Result<Flow, EngineError> {
        if self.play_dialogue(DIALOGUE_CLINIC_MEET_CAL)? == Flow::SessionOver {
            return Ok(Flow::SessionOver);
        }
        self.state.set_flag(FLAG_MET_CAL);
        self.state.set_flag(FLAG_FOUND_UNDERGROUND);
        info!("underground market unlocked");
        self.presenter
            .message("*** The Underground Market is now accessible! ***")?;
        self.presenter.acknowledge()?;
        Ok(Flow::Continue)
    }

    /// First underground visit: the dealer's pitch. If the player accepted
    /// the job during the dialogue, hand over the kit and the objective.
    pub(crate) fn underground_first(&mut self) -> Result<Flow, EngineError> {
        if self.play_dialogue(DIALOGUE_UNDERGROUND_FIRST)? == Flow::SessionOver {
            return Ok(Flow::SessionOver);
        }
        if self.state.flag(FLAG_ACCEPTED_HEIST) {
            if self.play_dialogue(DIALOGUE_ACCEPT_HEIST)? == Flow::SessionOver {
                return Ok(Flow::SessionOver);
            }
            self.state.add_item(ITEM_BURNER_PHONE);
            self.state.add_item(ITEM_DISGUISE_KIT);
            self.presenter.message(&format!(
                "*** Received: {}, {} ***",
                ITEM_BURNER_PHONE, ITEM_DISGUISE_KIT
            ))?;
            self.presenter
                .message("*** Objective: Scout the City Museum ***")?;
            self.presenter.acknowledge()?;
        }
        Ok(Flow::Continue)
    }

    /// Scouting the museum yields the Jade Whip intel, then Inspector Mori
    /// makes an entrance.
    pub(crate) fn museum_scout(&mut self) -> Result<Flow, EngineError> {
        if self.play_dialogue(DIALOGUE_MUSEUM_SCOUT)? == Flow::SessionOver {
            return Ok(Flow::SessionOver);
        }
        self.state.set_flag(FLAG_GOT_JADE_WHIP_INFO);
        self.state.add_intel(INTEL_JADE_WHIP);
        self.presenter
            .message("*** Intel gathered: Jade Whip location ***")?;
        self.presenter.acknowledge()?;

        if !self.state.flag(FLAG_MET_INSPECTOR) {
            if self.play_dialogue(DIALOGUE_INSPECTOR_MEET)? == Flow::SessionOver {
                return Ok(Flow::SessionOver);
            }
            self.state.set_flag(FLAG_MET_INSPECTOR);
            self.presenter.message(
                "*** Objective: Return to the underground market when ready for the heist ***",
            )?;
            self.presenter.acknowledge()?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::EngineOptions;
    use crate::save::MemorySaveStore;
    use crate::story::seed::builtin_story;
    use crate::ui::ScriptedPresenter;

    #[test]
    fn locked_location_without_flag_is_closed() {
        let story = builtin_story();
        let underground = story.location("underground").unwrap();
        let state = story.initial_state.clone();
        assert!(!is_unlocked(&state, underground));
    }

    #[test]
    fn unlock_is_monotonic() {
        let story = builtin_story();
        let underground = story.location("underground").unwrap();
        let mut state = story.initial_state.clone();
        state.set_flag(FLAG_FOUND_UNDERGROUND);
        assert!(is_unlocked(&state, underground));
        // nothing in the engine can unset a flag, so this cannot re-lock
        assert!(is_unlocked(&state, underground));
    }

    #[test]
    fn permanently_locked_without_unlock_flag() {
        let story = builtin_story();
        let mut loc = story.location("motel").unwrap().clone();
        loc.locked = true;
        loc.unlock_flag = None;
        let mut state = story.initial_state.clone();
        for flag in ["met_cal", "found_underground", "accepted_heist"] {
            state.set_flag(flag);
        }
        assert!(!is_unlocked(&state, &loc));
    }

    #[test]
    fn visiting_locked_location_leaves_state_untouched() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        let flow = session.visit("underground").unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.state().current_location, None);
    }

    #[test]
    fn clinic_first_visit_opens_the_underground() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        let flow = session.visit("clinic").unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(session.state().flag(FLAG_MET_CAL));
        assert!(session.state().flag(FLAG_FOUND_UNDERGROUND));
        assert!(ui.transcript_contains("Underground Market is now accessible"));
    }

    #[test]
    fn side_trigger_fires_once_and_sets_guard_flag() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        // first menu selection leaves the location both times
        let last = |s: &Session<ScriptedPresenter, MemorySaveStore>, id: &str| {
            s.story.location(id).unwrap().actions.len()
        };
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
        let leave = last(&session, "gym");
        session.presenter.push_choice(leave);
        session.presenter.push_choice(leave);

        session.visit("gym").unwrap();
        assert!(session.state().flag("visited_gym"));
        let first_len = session.presenter.transcript.len();

        session.visit("gym").unwrap();
        // second visit goes straight to the menu: no dialogue lines replayed
        let second: Vec<_> = session.presenter.transcript[first_len..]
            .iter()
            .filter(|line| line.starts_with('['))
            .collect();
        assert!(second.is_empty());
    }

    #[test]
    fn side_trigger_skipped_when_dialogue_missing() {
        let mut story = builtin_story();
        story.dialogues.remove("gym_visit");
        let saves = MemorySaveStore::new();
        let leave = story.location("gym").unwrap().actions.len();
        let mut ui = ScriptedPresenter::new().with_choices([leave]);
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        session.visit("gym").unwrap();
        // trigger skipped entirely: guard flag untouched
        assert!(!session.state().flag("visited_gym"));
    }
}
