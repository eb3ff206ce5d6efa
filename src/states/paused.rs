//! Paused: the session frozen mid-flight.
//!
//! Elapsed seconds are frozen on entry; resuming hands the same context back
//! to the timer, which back-dates its start so no pause time leaks into the
//! session. Staying paused past the timeout cancels the session.

use crate::config::{PAUSE_TIMEOUT, YELLOW};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::domain::{PromptContext, SessionContext};
use crate::events::{CancelReason, OutboundEvent};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct PausedState {
    session: SessionContext,
    pause_entered: Instant,
}

impl PausedState {
    pub fn new() -> Self {
        Self {
            session: SessionContext::begin(crate::config::DEFAULT_TIMER_MIN, None),
            pause_entered: Instant::now(),
        }
    }

    fn cancel(&self, ctx: &mut Ctx, reason: CancelReason) {
        ctx.send_event(OutboundEvent::focus_canceled(&self.session, reason));
        ctx.display.flash(Flash::Cancel);
        match &self.session.task {
            Some(task) => {
                ctx.stage_prompt(PromptContext::from_session(
                    &self.session,
                    task.clone(),
                    true,
                ));
                ctx.request_transition(StateId::TaskCompletePrompt);
            }
            None => ctx.request_transition(StateId::Idle),
        }
    }
}

impl State for PausedState {
    fn enter(&mut self, ctx: &mut Ctx) {
        if let Some(session) = ctx.take_staged_session() {
            self.session = session;
        }
        info!(
            session_id = %self.session.session_id,
            elapsed = self.session.elapsed_secs,
            "entering paused state"
        );
        self.pause_entered = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: YELLOW,
            period: Duration::from_secs(3),
        });
        ctx.input
            .register_all(&[InputKind::Click, InputKind::DoubleClick]);
        ctx.display.show(Screen::Paused {
            remaining_secs: self.session.remaining_secs(),
            task_name: self.session.task_screen_name(),
        });
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            match event {
                InputEvent::Click => {
                    info!("resuming session");
                    ctx.display.flash(Flash::TimerResume);
                    ctx.stage_session(self.session.clone());
                    ctx.request_transition(StateId::Timer);
                }
                InputEvent::DoubleClick => {
                    info!("canceling paused session");
                    self.cancel(ctx, CancelReason::User);
                }
                InputEvent::LongPress | InputEvent::Rotate(_) => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        ctx.display.show(Screen::Paused {
            remaining_secs: self.session.remaining_secs(),
            task_name: self.session.task_screen_name(),
        });

        if ctx.now.duration_since(self.pause_entered) >= PAUSE_TIMEOUT {
            info!("pause timeout, canceling session");
            self.cancel(ctx, CancelReason::Timeout);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting paused state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
