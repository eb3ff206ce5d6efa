//! Read-only task browsing while a timer keeps running.
//!
//! Entered by rotating during a session. The live session context is
//! snapshotted on the way in and handed back untouched on the way out; no
//! events are emitted and nothing here can select a task. Keeps its own
//! cursors so the owning list state's positions are undisturbed.

use crate::config::{TASK_VIEW_TIMEOUT, TEAL};
use crate::context::Ctx;
use crate::display::{DisplaySink, Screen};
use crate::domain::{Cursor, SessionContext, TaskListMode};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::task_list::build_list_screen;
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct TaskListViewState {
    session: Option<SessionContext>,
    mode: TaskListMode,
    cursor_pending: Cursor,
    cursor_completed: Cursor,
    cursor_projects: Cursor,
    last_activity: Instant,
}

impl TaskListViewState {
    pub fn new() -> Self {
        Self {
            session: None,
            mode: TaskListMode::Pending,
            cursor_pending: Cursor::default(),
            cursor_completed: Cursor::default(),
            cursor_projects: Cursor::default(),
            last_activity: Instant::now(),
        }
    }

    fn back_to_timer(&mut self, ctx: &mut Ctx) {
        match self.session.take() {
            Some(session) => {
                ctx.stage_session(session);
                ctx.request_transition(StateId::Timer);
            }
            None => {
                // No session to return to; nothing sane to resume.
                warn!("read-only view without a session snapshot");
                ctx.request_transition(StateId::Idle);
            }
        }
    }

    fn scroll(&mut self, ctx: &Ctx, delta: i32) {
        let len = match self.mode {
            TaskListMode::Pending => ctx.catalog.pending().len(),
            TaskListMode::Completed => ctx.catalog.completed().len(),
            TaskListMode::Projects => ctx.catalog.projects().len(),
        };
        let cursor = match self.mode {
            TaskListMode::Pending => &mut self.cursor_pending,
            TaskListMode::Completed => &mut self.cursor_completed,
            TaskListMode::Projects => &mut self.cursor_projects,
        };
        cursor.step(delta, len);
    }

    fn active_cursor(&self, ctx: &Ctx) -> Cursor {
        let len = match self.mode {
            TaskListMode::Pending => ctx.catalog.pending().len(),
            TaskListMode::Completed => ctx.catalog.completed().len(),
            TaskListMode::Projects => ctx.catalog.projects().len(),
        };
        let mut cursor = match self.mode {
            TaskListMode::Pending => self.cursor_pending,
            TaskListMode::Completed => self.cursor_completed,
            TaskListMode::Projects => self.cursor_projects,
        };
        cursor.clamp(len);
        cursor
    }
}

impl State for TaskListViewState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!("entering read-only task view");
        self.session = ctx.take_staged_session();
        self.mode = TaskListMode::Pending;
        self.cursor_pending = Cursor::default();
        self.cursor_completed = Cursor::default();
        self.cursor_projects = Cursor::default();
        self.last_activity = ctx.now;

        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: TEAL,
            period: Duration::from_secs(8),
        });
        ctx.input.register_all(&[
            InputKind::Click,
            InputKind::DoubleClick,
            InputKind::Rotate,
        ]);
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            self.last_activity = ctx.now;
            match event {
                InputEvent::Rotate(delta) => self.scroll(ctx, delta),
                InputEvent::DoubleClick => self.mode = self.mode.next(),
                InputEvent::Click => {
                    info!("returning to timer");
                    self.back_to_timer(ctx);
                }
                InputEvent::LongPress => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        let cursor = self.active_cursor(ctx);
        let screen = build_list_screen(&ctx.catalog, self.mode, cursor, true);
        ctx.display.show(Screen::TaskList(screen));

        if ctx.now.duration_since(self.last_activity) >= TASK_VIEW_TIMEOUT {
            info!("view timeout, returning to timer");
            self.back_to_timer(ctx);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting read-only task view");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
