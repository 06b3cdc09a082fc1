//! The Effect Applier: interprets a choice's effect list against the
//! session's state, in authored order.

use log::{debug, warn};

use crate::engine::errors::EngineError;
use crate::engine::session::{capitalize, Session};
use crate::engine::Flow;
use crate::save::SaveStore;
use crate::story::types::{Effect, EffectList};
use crate::ui::Presenter;

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Apply every effect in order. A `TriggerEnding` mid-list does not stop
    /// the effects after it (authors put ending triggers last by convention,
    /// but the contract is "apply them all"); the terminal state is carried
    /// in the returned flow.
    pub fn apply_effects(&mut self, effects: &EffectList) -> Result<Flow, EngineError> {
        let mut flow = Flow::Continue;
        for effect in effects.iter() {
            match effect {
                Effect::StatDelta { stat, delta } => {
                    // A delta naming a stat absent from the table is the same
                    // authoring gap as any other unknown key.
                    if self.state.has_stat(stat) {
                        let _ = self.state.adjust_stat(stat, *delta);
                        self.presenter
                            .message(&format!("({:+} {})", delta, capitalize(stat)))?;
                    } else {
                        self.unknown_effect(stat)?;
                    }
                }
                Effect::SetFlag(name) => self.state.set_flag(name),
                Effect::AddSuspicion(amount) => {
                    self.state.heist.suspicion += amount;
                    debug!("suspicion now {}", self.state.heist.suspicion);
                }
                Effect::TriggerEnding(key) => {
                    if self.trigger_ending(key)? == Flow::SessionOver {
                        flow = Flow::SessionOver;
                    }
                }
                Effect::Unknown { key, .. } => self.unknown_effect(key)?,
            }
        }
        Ok(flow)
    }

    fn unknown_effect(&mut self, key: &str) -> Result<(), EngineError> {
        if self.opts.strict_effects {
            return Err(EngineError::UnknownEffect(key.to_string()));
        }
        warn!("ignoring unknown effect key '{}'", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::EngineOptions;
    use crate::save::MemorySaveStore;
    use crate::story::seed::builtin_story;
    use crate::ui::ScriptedPresenter;

    fn effects(json: &str) -> EffectList {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn stat_deltas_clamp_to_bounds() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        session.apply_effects(&effects(r#"{"charisma": 100000}"#)).unwrap();
        assert_eq!(session.state().stat("charisma"), 100);
        session.apply_effects(&effects(r#"{"charisma": -100000}"#)).unwrap();
        assert_eq!(session.state().stat("charisma"), 0);
    }

    #[test]
    fn flags_and_suspicion_apply() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        let flow = session
            .apply_effects(&effects(r#"{"flag": "met_cal", "suspicion": 150}"#))
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(session.state().flag("met_cal"));
        // suspicion is deliberately unclamped
        session.apply_effects(&effects(r#"{"suspicion": 150}"#)).unwrap();
        assert_eq!(session.state().heist.suspicion, 300);
    }

    #[test]
    fn effects_after_an_ending_still_apply() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        let flow = session
            .apply_effects(&effects(r#"{"ending": "caught", "flag": "late_flag"}"#))
            .unwrap();
        assert_eq!(flow, Flow::SessionOver);
        assert!(session.state().flag("late_flag"));
    }

    #[test]
    fn unknown_keys_ignored_by_default() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        let flow = session
            .apply_effects(&effects(r#"{"mystery": 5, "charisma": 3}"#))
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(!session.state().has_stat("mystery"));
        assert_eq!(session.state().stat("charisma"), story.initial_state.stat("charisma") + 3);
    }

    #[test]
    fn unknown_keys_error_in_strict_mode() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let opts = EngineOptions {
            strict_effects: true,
        };
        let mut session = Session::new(&story, opts, &mut ui, &saves);

        let result = session.apply_effects(&effects(r#"{"mystery": 5}"#));
        assert!(matches!(result, Err(EngineError::UnknownEffect(key)) if key == "mystery"));
    }
}
