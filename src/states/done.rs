//! Done: celebration screen after a taskless session completes.

use crate::config::{CHANGE_TIMEOUT, GREEN};
use crate::context::Ctx;
use crate::display::{DisplaySink, Screen};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct DoneState {
    entered_at: Instant,
}

impl DoneState {
    pub fn new() -> Self {
        Self {
            entered_at: Instant::now(),
        }
    }
}

impl State for DoneState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering done state");
        self.entered_at = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: GREEN,
            period: Duration::from_secs(1),
        });
        ctx.input.register(InputKind::Click);
        ctx.display.show(Screen::Done);
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            if let InputEvent::Click = event {
                ctx.request_transition(StateId::Idle);
            }
        }
        if ctx.transition_pending() {
            return;
        }

        ctx.display.show(Screen::Done);

        if ctx.now.duration_since(self.entered_at) >= CHANGE_TIMEOUT {
            ctx.request_transition(StateId::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting done state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
