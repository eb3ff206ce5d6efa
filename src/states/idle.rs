//! Idle: the resting face of the dial.
//!
//! Shows the persisted default duration and connectivity. Click starts a
//! timer with that duration, rotation opens the adjuster, long press opens
//! the reset prompt, and prolonged inactivity falls into sleep.

use crate::config::{BLUE, SLEEP_TIMEOUT};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::domain::SessionContext;
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct IdleState {
    last_activity: Instant,
}

impl IdleState {
    pub fn new() -> Self {
        Self {
            last_activity: Instant::now(),
        }
    }
}

impl State for IdleState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering idle state");
        self.last_activity = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: BLUE,
            period: Duration::from_secs(5),
        });
        ctx.input.register_all(&[
            InputKind::Click,
            InputKind::LongPress,
            InputKind::Rotate,
        ]);
        ctx.display.show(Screen::Idle {
            duration_min: ctx.settings.clamped_duration(),
            wifi_connected: ctx.net.is_wifi_connected(),
        });
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            self.last_activity = ctx.now;
            match event {
                InputEvent::Click => {
                    let session =
                        SessionContext::begin(ctx.settings.clamped_duration(), None);
                    ctx.stage_session(session);
                    ctx.display.flash(Flash::TimerStart);
                    ctx.request_transition(StateId::Timer);
                }
                InputEvent::LongPress => {
                    ctx.request_transition(StateId::Reset);
                }
                InputEvent::Rotate(_) => {
                    ctx.stage_adjust(ctx.settings.clamped_duration());
                    ctx.request_transition(StateId::Adjust);
                }
                InputEvent::DoubleClick => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        ctx.display.show(Screen::Idle {
            duration_min: ctx.settings.clamped_duration(),
            wifi_connected: ctx.net.is_wifi_connected(),
        });

        if ctx.now.duration_since(self.last_activity) >= SLEEP_TIMEOUT {
            info!("idle activity timeout, going to sleep");
            ctx.request_transition(StateId::Sleep);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting idle state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
