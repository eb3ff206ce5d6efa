//! Transient splash shown while the device boots.

use crate::config::{BLUE, SPLASH_DURATION};
use crate::context::Ctx;
use crate::display::{DisplaySink, Screen};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::states::{State, StateId};
use std::time::Instant;
use tracing::info;

pub struct StartupState {
    entered_at: Instant,
}

impl StartupState {
    pub fn new() -> Self {
        Self {
            entered_at: Instant::now(),
        }
    }
}

impl State for StartupState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering startup state");
        self.entered_at = ctx.now;
        ctx.display.show(Screen::Splash);
        ctx.indicator.set_effect(IndicatorEffect::Spinner(BLUE));
    }

    fn update(&mut self, ctx: &mut Ctx) {
        if ctx.now.duration_since(self.entered_at) >= SPLASH_DURATION {
            if ctx.net.is_provisioned() {
                ctx.request_transition(StateId::Idle);
            } else {
                ctx.request_transition(StateId::Provision);
            }
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting startup state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
