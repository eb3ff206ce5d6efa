//! Sleep: everything dark until any input wakes the dial.

use crate::context::Ctx;
use crate::display::DisplaySink;
use crate::indicator::IndicatorSink;
use crate::input::InputKind;
use crate::states::{State, StateId};
use tracing::info;

pub struct SleepState;

impl SleepState {
    pub fn new() -> Self {
        Self
    }
}

impl State for SleepState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering sleep state");
        ctx.indicator.off();
        ctx.display.clear();
        ctx.input.register_all(&[
            InputKind::Click,
            InputKind::DoubleClick,
            InputKind::LongPress,
            InputKind::Rotate,
        ]);
    }

    fn update(&mut self, ctx: &mut Ctx) {
        if !ctx.input.drain_registered().is_empty() {
            info!("input received, waking up");
            ctx.request_transition(StateId::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting sleep state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
