//! Adjust: rotate to nudge the default session length, click to keep it.

use crate::config::{ADJUST_STEP_MIN, AMBER, CHANGE_TIMEOUT, MAX_TIMER_MIN, MIN_TIMER_MIN};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::Instant;
use tracing::info;

pub struct AdjustState {
    duration_min: u32,
    last_activity: Instant,
}

impl AdjustState {
    pub fn new() -> Self {
        Self {
            duration_min: MIN_TIMER_MIN,
            last_activity: Instant::now(),
        }
    }
}

/// Apply a signed detent count to a duration, clamped to the legal range.
fn stepped(duration_min: u32, delta: i32, step: u32, min: u32, max: u32) -> u32 {
    let moved = i64::from(duration_min) + i64::from(delta) * i64::from(step);
    moved.clamp(i64::from(min), i64::from(max)) as u32
}

impl State for AdjustState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering adjust state");
        if let Some(seed) = ctx.take_staged_adjust() {
            self.duration_min = seed.clamp(MIN_TIMER_MIN, MAX_TIMER_MIN);
        }
        self.last_activity = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Solid(AMBER));
        ctx.input
            .register_all(&[InputKind::Click, InputKind::Rotate]);
        ctx.display.show(Screen::Adjust {
            duration_min: self.duration_min,
        });
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            self.last_activity = ctx.now;
            match event {
                InputEvent::Rotate(delta) => {
                    self.duration_min = stepped(
                        self.duration_min,
                        delta,
                        ADJUST_STEP_MIN,
                        MIN_TIMER_MIN,
                        MAX_TIMER_MIN,
                    );
                }
                InputEvent::Click => {
                    info!(duration = self.duration_min, "default duration committed");
                    ctx.settings.default_duration_min = self.duration_min;
                    ctx.persist_settings();
                    ctx.display.flash(Flash::Confirmation);
                    ctx.request_transition(StateId::Idle);
                }
                InputEvent::DoubleClick | InputEvent::LongPress => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        ctx.display.show(Screen::Adjust {
            duration_min: self.duration_min,
        });

        if ctx.now.duration_since(self.last_activity) >= CHANGE_TIMEOUT {
            ctx.request_transition(StateId::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting adjust state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_clamps_at_bounds() {
        assert_eq!(stepped(25, 1, 5, 5, 240), 30);
        assert_eq!(stepped(25, -1, 5, 5, 240), 20);
        assert_eq!(stepped(5, -3, 5, 5, 240), 5);
        assert_eq!(stepped(240, 2, 5, 5, 240), 240);
        assert_eq!(stepped(10, -100, 5, 5, 240), 5);
    }
}
