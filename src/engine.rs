//! The state machine engine.
//!
//! Exactly one state is current at any instant. A transition is the atomic
//! exit-then-enter sequence; requests raised while one is in flight land in
//! the context's single pending slot and are applied immediately after the
//! current transition completes (last request wins). Update ticks arriving
//! mid-transition are dropped, never queued.
//!
//! Cross-thread callers (the inbound catalog callback) synchronize through
//! the mutex wrapping the whole [`Core`]; a poisoned lock is fatal by
//! design, since proceeding without exit/enter ordering would leave the
//! machine in an undefined state.

use crate::context::Ctx;
use crate::domain::CatalogPayload;
use crate::states::{State, StateArena, StateId};
use std::time::Instant;
use tracing::{info, warn};

pub struct Core {
    current: StateId,
    in_transition: bool,
    states: StateArena,
    pub ctx: Ctx,
}

impl Core {
    /// Build the core with every state pre-allocated. No state is entered
    /// until [`Core::start`] runs.
    pub fn new(ctx: Ctx) -> Self {
        Self {
            current: StateId::Startup,
            in_transition: false,
            states: StateArena::new(),
            ctx,
        }
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    /// Enter the initial state. Runs the same exit/enter cycle as any other
    /// transition; exiting the never-entered startup state is harmless.
    pub fn start(&mut self, now: Instant) {
        self.ctx.now = now;
        self.change_state(StateId::Startup);
    }

    /// Move to `target`, running `exit()` on the outgoing state to
    /// completion before `enter()` on the incoming one. Targeting the
    /// current state still runs a full cycle. Requests staged during
    /// `exit()`/`enter()` are applied in order after this transition.
    pub fn change_state(&mut self, target: StateId) {
        if self.in_transition {
            // Re-entrant request: defer, apply after the active transition.
            self.ctx.request_transition(target);
            return;
        }

        self.in_transition = true;
        let mut next = Some(target);
        while let Some(id) = next {
            info!(from = ?self.current, to = ?id, "state transition");
            self.states.get_mut(self.current).exit(&mut self.ctx);
            debug_assert!(
                !self.ctx.input.has_registrations(),
                "state left input handlers registered on exit"
            );
            self.current = id;
            self.states.get_mut(id).enter(&mut self.ctx);
            next = self.ctx.take_pending_transition();
        }
        self.in_transition = false;
    }

    /// One driver tick for the current state. Dropped while a transition is
    /// in flight so a half-initialized state is never ticked.
    pub fn update(&mut self, now: Instant) {
        if self.in_transition {
            return;
        }
        self.ctx.now = now;
        self.states.get_mut(self.current).update(&mut self.ctx);
        if let Some(target) = self.ctx.take_pending_transition() {
            self.change_state(target);
        }
    }

    /// Inbound catalog callback. A decode failure is a logged no-op; the
    /// previous catalog stays untouched. On success the machine switches to
    /// the task list only from Idle or Sleep, never interrupting a session.
    pub fn ingest_catalog(&mut self, json: &str) {
        match CatalogPayload::parse(json) {
            Ok(payload) => {
                self.ctx.catalog.ingest(payload);
                if matches!(self.current, StateId::Idle | StateId::Sleep) {
                    self.change_state(StateId::TaskList);
                }
            }
            Err(e) => warn!("catalog ingestion skipped: {e}"),
        }
    }
}
