//! Shared application context handed to every state.
//!
//! Holds the collaborators (input, display, indicator, network), the task
//! catalog, the persisted settings, and the explicit staging slots that move
//! session/task context between states at transition time. There are no
//! process-wide globals; everything a state may touch flows through here.

use crate::display::DisplaySink;
use crate::domain::{PromptContext, SessionContext, Task, TaskCatalog};
use crate::events::OutboundEvent;
use crate::indicator::IndicatorSink;
use crate::input::InputSource;
use crate::network::NetLink;
use crate::prefs::{self, Settings};
use crate::states::StateId;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};

pub struct Ctx {
    /// Wall time of the current tick, set by the driver before `update`.
    pub now: Instant,
    pub input: InputSource,
    pub display: Box<dyn DisplaySink + Send>,
    pub indicator: Box<dyn IndicatorSink + Send>,
    pub net: NetLink,
    pub settings: Settings,
    /// Where settings persist; `None` keeps them in memory only (tests).
    pub settings_path: Option<PathBuf>,
    pub catalog: TaskCatalog,

    // --- Staging slots: written by the outgoing state, consumed exactly
    // --- once by the incoming state's enter().
    staged_session: Option<SessionContext>,
    staged_prompt: Option<PromptContext>,
    staged_task: Option<(Task, String)>,
    staged_adjust: Option<u32>,

    // Single-slot transition request (defer-and-apply-after; last wins).
    pending_transition: Option<StateId>,
}

impl Ctx {
    pub fn new(
        display: Box<dyn DisplaySink + Send>,
        indicator: Box<dyn IndicatorSink + Send>,
        net: NetLink,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            now: Instant::now(),
            input: InputSource::new(),
            display,
            indicator,
            net,
            settings,
            settings_path,
            catalog: TaskCatalog::default(),
            staged_session: None,
            staged_prompt: None,
            staged_task: None,
            staged_adjust: None,
            pending_transition: None,
        }
    }

    /// Ask the engine to move to `target` once the current handler returns.
    /// A later request in the same handler wins.
    pub fn request_transition(&mut self, target: StateId) {
        if let Some(previous) = self.pending_transition.replace(target) {
            debug!(?previous, ?target, "pending transition replaced");
        }
    }

    pub(crate) fn take_pending_transition(&mut self) -> Option<StateId> {
        self.pending_transition.take()
    }

    /// Whether a transition request is already waiting. States use this to
    /// keep a timeout check from stomping on a decision made earlier in the
    /// same tick.
    pub fn transition_pending(&self) -> bool {
        self.pending_transition.is_some()
    }

    /// Fire-and-forget outbound event submission.
    pub fn send_event(&self, event: OutboundEvent) {
        self.net.send_event(event);
    }

    /// Persist the current settings; failures are logged and absorbed.
    pub fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = prefs::save_settings(path, &self.settings) {
            warn!("failed to persist settings: {e}");
        }
    }

    // --- Session staging (TaskList/DurationSelect/Idle -> Timer,
    // --- Timer <-> Paused, Timer <-> TaskListView) ---

    pub fn stage_session(&mut self, session: SessionContext) {
        self.staged_session = Some(session);
    }

    pub fn take_staged_session(&mut self) -> Option<SessionContext> {
        self.staged_session.take()
    }

    // --- Prompt staging (Timer/Paused -> TaskCompletePrompt) ---

    pub fn stage_prompt(&mut self, prompt: PromptContext) {
        self.staged_prompt = Some(prompt);
    }

    pub fn take_staged_prompt(&mut self) -> Option<PromptContext> {
        self.staged_prompt.take()
    }

    // --- Task staging (TaskList -> DurationSelect -> TaskDetail). The task
    // --- travels by value, decoupling those states from catalog refreshes.

    pub fn stage_task(&mut self, task: Task, project_name: String) {
        self.staged_task = Some((task, project_name));
    }

    pub fn take_staged_task(&mut self) -> Option<(Task, String)> {
        self.staged_task.take()
    }

    // --- Adjust seeding (Idle -> Adjust) ---

    pub fn stage_adjust(&mut self, duration_min: u32) {
        self.staged_adjust = Some(duration_min);
    }

    pub fn take_staged_adjust(&mut self) -> Option<u32> {
        self.staged_adjust.take()
    }
}

#[cfg(test)]
pub mod testing {
    //! Context wired to recording sinks and an in-memory event queue.

    use super::*;
    use crate::display::RecordingDisplay;
    use crate::events::{event_channel, OutboundEvent};
    use crate::indicator::RecordingIndicator;
    use crossbeam_channel::Receiver;
    use std::sync::{Arc, Mutex};

    pub struct TestHarness {
        pub ctx: Ctx,
        pub display: Arc<Mutex<RecordingDisplay>>,
        pub indicator: Arc<Mutex<RecordingIndicator>>,
        pub events: Receiver<OutboundEvent>,
    }

    pub fn harness() -> TestHarness {
        let display = Arc::new(Mutex::new(RecordingDisplay::default()));
        let indicator = Arc::new(Mutex::new(RecordingIndicator::default()));
        let (sender, events) = event_channel(64);
        let net = NetLink::new(true, sender);
        let ctx = Ctx::new(
            Box::new(Arc::clone(&display)),
            Box::new(Arc::clone(&indicator)),
            net,
            Settings::default(),
            None,
        );
        TestHarness {
            ctx,
            display,
            indicator,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::harness;
    use super::*;

    #[test]
    fn test_pending_transition_last_wins() {
        let mut h = harness();
        h.ctx.request_transition(StateId::Idle);
        h.ctx.request_transition(StateId::Sleep);
        assert_eq!(h.ctx.take_pending_transition(), Some(StateId::Sleep));
        assert_eq!(h.ctx.take_pending_transition(), None);
    }

    #[test]
    fn test_staging_slots_consume_once() {
        let mut h = harness();
        let session = SessionContext::begin(25, None);
        h.ctx.stage_session(session.clone());
        assert_eq!(h.ctx.take_staged_session(), Some(session));
        assert_eq!(h.ctx.take_staged_session(), None);
    }
}
