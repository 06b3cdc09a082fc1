//! The Action Resolver: two-tier dispatch over a location's menu entries.

use log::{debug, warn};

use crate::engine::clock;
use crate::engine::errors::EngineError;
use crate::engine::session::Session;
use crate::engine::{
    Flow, FLAG_ACCEPTED_HEIST, FLAG_COMPLETED_HEIST, FLAG_MET_CAL, HEIST_MUSEUM,
};
use crate::save::SaveStore;
use crate::story::types::{ActionRef, SpecialAction, StatAdjust};
use crate::ui::Presenter;

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Resolve one menu action. `Flow::Leave` means the location loop should
    /// exit; data-driven actions always stay at the location.
    pub fn resolve_action(&mut self, action: &ActionRef) -> Result<Flow, EngineError> {
        match action {
            ActionRef::Scripted(name) => self.run_scripted_action(name),
            ActionRef::Special { action, .. } => match action {
                SpecialAction::MeetReceptionist => self.talk_to_receptionist(),
                SpecialAction::MeetDealer => self.talk_to_dealer(),
            },
            ActionRef::Unknown(name) => {
                debug!("ignoring unresolvable action '{}'", name);
                Ok(Flow::Continue)
            }
        }
    }

    /// Tier one: a data-driven action from the Action table. Cost gate first
    /// (all-or-nothing), then stat adjustments, intel, optional time
    /// advancement, and the message.
    fn run_scripted_action(&mut self, name: &str) -> Result<Flow, EngineError> {
        let story = self.story;
        let Some(record) = story.actions.get(name) else {
            warn!("scripted action '{}' vanished from the table", name);
            return Ok(Flow::Continue);
        };

        if record.cost > 0 && !self.state.spend(record.cost) {
            self.presenter.message("Not enough money!")?;
            self.presenter.acknowledge()?;
            return Ok(Flow::Continue);
        }

        for (stat, adjust) in &record.effects {
            let applied = match adjust {
                StatAdjust::Full => self.state.set_stat_full(stat),
                StatAdjust::Delta(delta) => self.state.adjust_stat(stat, *delta),
            };
            if applied.is_none() {
                warn!("action '{}' adjusts unknown stat '{}'", name, stat);
            }
        }

        if let Some(note) = &record.add_intel {
            self.state.add_intel(note);
        }

        if record.advance_time {
            if let Some(ending) = clock::advance_time(&mut self.state) {
                if self.trigger_ending(ending)? == Flow::SessionOver {
                    return Ok(Flow::SessionOver);
                }
            }
        }

        let message = if self.state.flag(FLAG_COMPLETED_HEIST) {
            record.message_after_heist.as_deref().unwrap_or(&record.message)
        } else {
            &record.message
        };
        self.presenter.message(message)?;
        self.presenter.acknowledge()?;
        Ok(Flow::Continue)
    }

    /// Tier two: the clinic receptionist. Plays the Cal meeting once; after
    /// that the receptionist has nothing new to say.
    fn talk_to_receptionist(&mut self) -> Result<Flow, EngineError> {
        if !self.state.flag(FLAG_MET_CAL) {
            let flow = self.clinic_meet_cal()?;
            return Ok(if flow == Flow::SessionOver {
                flow
            } else {
                Flow::Leave
            });
        }
        Ok(Flow::Continue)
    }

    /// Tier two: the underground dealer. Readiness check gates the heist
    /// hand-off; before acceptance it replays the pitch routine.
    fn talk_to_dealer(&mut self) -> Result<Flow, EngineError> {
        if self.heist_ready() {
            self.presenter.message("Ready to start the heist?")?;
            let options = [
                "Yes, let's do this!".to_string(),
                "Not yet, I need to prepare more.".to_string(),
            ];
            if self.presenter.choose("Choose an option: ", &options)? == 0 {
                let flow = self.run_heist(HEIST_MUSEUM)?;
                return Ok(if flow == Flow::SessionOver {
                    flow
                } else {
                    Flow::Leave
                });
            }
            return Ok(Flow::Continue);
        }

        if !self.state.flag(FLAG_ACCEPTED_HEIST) {
            let flow = self.underground_first()?;
            return Ok(if flow == Flow::SessionOver {
                flow
            } else {
                Flow::Leave
            });
        }

        self.presenter
            .message("\"Scout the museum first, then come back.\"")?;
        self.presenter.acknowledge()?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::EngineOptions;
    use crate::engine::state::TimeOfDay;
    use crate::save::MemorySaveStore;
    use crate::story::seed::builtin_story;
    use crate::ui::ScriptedPresenter;

    fn scripted(name: &str) -> ActionRef {
        ActionRef::Scripted(name.to_string())
    }

    #[test]
    fn insufficient_funds_abort_without_mutation() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
        session.state_mut().stats.insert("money".into(), 3);
        let before = session.state().clone();

        let flow = session.resolve_action(&scripted("Eat at the diner")).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.state(), &before);
        assert!(ui.transcript_contains("Not enough money!"));
    }

    #[test]
    fn full_adjustment_sets_stat_to_maximum() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
        session.state_mut().stats.insert("hunger".into(), 12);

        session.resolve_action(&scripted("Eat at the diner")).unwrap();
        assert_eq!(session.state().stat("hunger"), 100);
    }

    #[test]
    fn advance_time_action_steps_the_clock() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
        assert_eq!(session.state().time_of_day, TimeOfDay::Morning);

        session.resolve_action(&scripted("Sleep")).unwrap();
        assert_ne!(session.state().time_of_day, TimeOfDay::Morning);
    }

    #[test]
    fn intel_action_is_idempotent_across_repeats() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        session.resolve_action(&scripted("Case the exhibits")).unwrap();
        session.resolve_action(&scripted("Case the exhibits")).unwrap();
        assert_eq!(
            session
                .state()
                .heist
                .intel
                .iter()
                .filter(|n| n.contains("East Wing cameras"))
                .count(),
            1
        );
    }

    #[test]
    fn wanted_posters_message_changes_after_heist() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        session
            .resolve_action(&scripted("Check wanted posters"))
            .unwrap();
        session.state_mut().set_flag(FLAG_COMPLETED_HEIST);
        session
            .resolve_action(&scripted("Check wanted posters"))
            .unwrap();

        let record = story.actions.get("Check wanted posters").unwrap();
        assert!(ui.transcript_contains(&record.message));
        assert!(ui.transcript_contains(record.message_after_heist.as_deref().unwrap()));
    }

    #[test]
    fn unknown_action_is_a_no_op() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
        let before = session.state().clone();

        let flow = session
            .resolve_action(&ActionRef::Unknown("Juggle crates".into()))
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn dealer_nudges_until_museum_scouted() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);
        session.state_mut().set_flag(FLAG_ACCEPTED_HEIST);

        let action = ActionRef::Special {
            name: "Talk to dealer".into(),
            action: SpecialAction::MeetDealer,
        };
        let flow = session.resolve_action(&action).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(ui.transcript_contains("Scout the museum first"));
    }
}
