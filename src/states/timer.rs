//! Timer: the running focus session.
//!
//! The start timestamp is back-dated by the already-elapsed seconds, so a
//! resume picks up exactly where the pause left off with no drift. Every
//! terminal path out of this state emits exactly one event before leaving.

use crate::config::RED;
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::domain::{PromptContext, SessionContext};
use crate::events::{CancelReason, OutboundEvent};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct TimerState {
    session: SessionContext,
    started_at: Instant,
}

impl TimerState {
    pub fn new() -> Self {
        Self {
            session: SessionContext::begin(crate::config::DEFAULT_TIMER_MIN, None),
            started_at: Instant::now(),
        }
    }

    /// Route a finished-or-canceled session: prompt when a task is attached,
    /// otherwise straight to the fallback state.
    fn leave_session(&self, ctx: &mut Ctx, canceled: bool, fallback: StateId) {
        match &self.session.task {
            Some(task) => {
                ctx.stage_prompt(PromptContext::from_session(
                    &self.session,
                    task.clone(),
                    canceled,
                ));
                ctx.request_transition(StateId::TaskCompletePrompt);
            }
            None => ctx.request_transition(fallback),
        }
    }
}

impl State for TimerState {
    fn enter(&mut self, ctx: &mut Ctx) {
        if let Some(session) = ctx.take_staged_session() {
            self.session = session;
        }
        info!(
            session_id = %self.session.session_id,
            duration = self.session.duration_min,
            elapsed = self.session.elapsed_secs,
            "entering timer state"
        );

        // Back-date the start so elapsed time survives pause/resume intact.
        self.started_at = ctx.now - Duration::from_secs(self.session.elapsed_secs);

        ctx.indicator.set_effect(IndicatorEffect::FillDecay {
            color: RED,
            total: Duration::from_secs(self.session.remaining_secs()),
        });
        ctx.input.register_all(&[
            InputKind::Click,
            InputKind::DoubleClick,
            InputKind::Rotate,
        ]);

        let event = if self.session.elapsed_secs == 0 {
            OutboundEvent::focus_started(&self.session)
        } else {
            OutboundEvent::focus_resumed(&self.session)
        };
        ctx.send_event(event);

        ctx.display.show(Screen::Timer {
            remaining_secs: self.session.remaining_secs(),
            task_name: self.session.task_screen_name(),
        });
    }

    fn update(&mut self, ctx: &mut Ctx) {
        self.session.elapsed_secs = ctx.now.duration_since(self.started_at).as_secs();

        for event in ctx.input.drain_registered() {
            match event {
                InputEvent::Click => {
                    info!("pausing session");
                    ctx.send_event(OutboundEvent::focus_paused(&self.session));
                    ctx.display.flash(Flash::TimerPause);
                    ctx.stage_session(self.session.clone());
                    ctx.request_transition(StateId::Paused);
                }
                InputEvent::DoubleClick => {
                    info!("canceling session");
                    ctx.send_event(OutboundEvent::focus_canceled(
                        &self.session,
                        CancelReason::User,
                    ));
                    ctx.display.flash(Flash::Cancel);
                    self.leave_session(ctx, true, StateId::Idle);
                }
                InputEvent::Rotate(_) => {
                    // Read-only browse; the session context travels along and
                    // comes back untouched. No event is emitted.
                    ctx.stage_session(self.session.clone());
                    ctx.request_transition(StateId::TaskListView);
                }
                InputEvent::LongPress => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        let remaining = self.session.remaining_secs();
        ctx.display.show(Screen::Timer {
            remaining_secs: remaining,
            task_name: self.session.task_screen_name(),
        });

        if remaining == 0 {
            info!(session_id = %self.session.session_id, "session complete");
            // The authoritative elapsed figure for a natural completion is
            // the full duration.
            self.session.elapsed_secs = self.session.total_secs();
            ctx.send_event(OutboundEvent::focus_completed(&self.session));
            ctx.display.flash(Flash::TimerDone);
            self.leave_session(ctx, false, StateId::Done);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting timer state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
