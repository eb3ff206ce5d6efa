//! Provision: hold in network-provisioning mode until the gateway reports
//! both a completed pairing and live connectivity.

use crate::config::AMBER;
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::states::{State, StateId};
use tracing::info;

pub struct ProvisionState;

impl ProvisionState {
    pub fn new() -> Self {
        Self
    }
}

impl State for ProvisionState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering provision state");
        ctx.display.show(Screen::Provision);
        ctx.indicator.set_effect(IndicatorEffect::Solid(AMBER));
        ctx.net.start_provisioning();
    }

    fn update(&mut self, ctx: &mut Ctx) {
        if ctx.net.is_provisioned() && ctx.net.is_wifi_connected() {
            info!("provisioning complete, network connected");
            ctx.display.flash(Flash::Connected);
            ctx.net.stop_provisioning();
            ctx.settings.provisioned = true;
            ctx.persist_settings();
            ctx.request_transition(StateId::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting provision state");
        ctx.net.stop_provisioning();
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
