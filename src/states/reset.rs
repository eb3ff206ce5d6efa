//! Reset: a two-option prompt guarding the factory reset.
//!
//! Rotation toggles cancel/confirm. Confirming erases credentials and
//! schedules a restart (back through Startup) after a short delay.

use crate::config::{MAGENTA, RESTART_DELAY};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::prefs::Settings;
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct ResetState {
    confirm_selected: bool,
    restart_at: Option<Instant>,
}

impl ResetState {
    pub fn new() -> Self {
        Self {
            confirm_selected: false,
            restart_at: None,
        }
    }
}

impl State for ResetState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering reset state");
        self.confirm_selected = false;
        self.restart_at = None;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: MAGENTA,
            period: Duration::from_secs(2),
        });
        ctx.input
            .register_all(&[InputKind::Click, InputKind::Rotate]);
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            match event {
                InputEvent::Rotate(delta) => {
                    if delta > 0 {
                        self.confirm_selected = true;
                    } else if delta < 0 {
                        self.confirm_selected = false;
                    }
                }
                InputEvent::Click => {
                    if self.restart_at.is_some() {
                        // Reset already underway.
                        continue;
                    }
                    if self.confirm_selected {
                        info!("factory reset confirmed, clearing credentials");
                        ctx.display.flash(Flash::Reset);
                        ctx.net.reset_credentials();
                        ctx.settings = Settings::default();
                        ctx.persist_settings();
                        self.restart_at = Some(ctx.now);
                    } else {
                        info!("factory reset canceled");
                        ctx.display.flash(Flash::Cancel);
                        ctx.request_transition(StateId::Idle);
                    }
                }
                InputEvent::DoubleClick | InputEvent::LongPress => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        ctx.display.show(Screen::Reset {
            confirm_selected: self.confirm_selected,
        });

        if let Some(at) = self.restart_at {
            if ctx.now.duration_since(at) >= RESTART_DELAY {
                info!("restarting");
                ctx.request_transition(StateId::Startup);
            }
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting reset state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
