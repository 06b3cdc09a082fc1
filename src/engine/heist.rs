//! The Heist Sequence Engine: a linear, stat-gated state machine over the
//! three scripted phases. It mutates nothing itself; the two terminal
//! transitions hand off to the Ending Resolver.

use log::{info, warn};

use crate::engine::ending::{ENDING_CAUGHT, ENDING_CHAPTER_COMPLETE};
use crate::engine::errors::EngineError;
use crate::engine::session::{capitalize, Session};
use crate::engine::Flow;
use crate::save::SaveStore;
use crate::ui::Presenter;

impl<'a, P: Presenter, S: SaveStore> Session<'a, P, S> {
    /// Run a heist by id: Infiltration, then Calling Card, then Escape, no
    /// skipping and no retries. A failed skill check anywhere routes
    /// straight to the "caught" ending; clearing every scene reaches the
    /// chapter-complete ending.
    pub fn run_heist(&mut self, heist_id: &str) -> Result<Flow, EngineError> {
        let story = self.story;
        let Some(sequence) = story.heists.get(heist_id) else {
            warn!("heist '{}' is not in the story data", heist_id);
            return Ok(Flow::Continue);
        };
        info!("heist '{}' started", heist_id);

        self.presenter
            .heading(&format!("THE {} HEIST BEGINS", heist_id.to_uppercase()))?;
        self.presenter.status(&self.state)?;
        self.presenter.acknowledge()?;

        for (number, (phase, scenes)) in sequence.phases().into_iter().enumerate() {
            self.presenter
                .heading(&format!("PHASE {}: {}", number + 1, phase.title()))?;

            for scene in scenes {
                self.presenter
                    .message(&format!("{} {}", scene.icon, scene.description))?;

                let labels: Vec<String> = scene
                    .options
                    .iter()
                    .map(|opt| {
                        let value = self.state.stat(&opt.stat);
                        let verdict = if value >= opt.req { "OK" } else { "FAIL" };
                        format!(
                            "{} ({} {}+) [{}: {}]",
                            opt.text,
                            capitalize(&opt.stat),
                            opt.req,
                            verdict,
                            value
                        )
                    })
                    .collect();

                let choice = self.presenter.choose("Choose your approach: ", &labels)?;
                let option = &scene.options[choice];
                let value = self.state.stat(&option.stat);

                if value >= option.req {
                    self.presenter.message(&format!(
                        "*** SUCCESS! Your {} ({}) met the requirement ({})! ***",
                        option.stat, value, option.req
                    ))?;
                    self.presenter.acknowledge()?;
                } else {
                    self.presenter.message(&format!(
                        "*** FAILED! Your {} ({}) didn't meet the requirement ({})! ***",
                        option.stat, value, option.req
                    ))?;
                    info!("heist failed in {:?}", phase);
                    return self.trigger_ending(ENDING_CAUGHT);
                }
            }
        }

        self.trigger_ending(ENDING_CHAPTER_COMPLETE)
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
    fn unknown_heist_id_degrades_to_no_op() {
        let story = builtin_story();
        let saves = MemorySaveStore::new();
        let mut ui = ScriptedPresenter::new();
        let mut session = Session::new(&story, EngineOptions::default(), &mut ui, &saves);

        let flow = session.run_heist("opera_house").unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(ui.transcript.is_empty());
    }
}
