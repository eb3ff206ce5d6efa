//! Duration selection for a chosen task.
//!
//! Seeded from the task's suggested session length. Rotation steps within
//! fixed bounds, click starts the timer, double click opens the subtask
//! detail, long press abandons back to the list. Returning from the detail
//! view keeps the duration the user already dialed in.

use crate::config::{
    AMBER, DURATION_MAX_MIN, DURATION_MIN_MIN, DURATION_SELECT_TIMEOUT, DURATION_STEP_MIN,
};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, Screen};
use crate::domain::{SessionContext, SessionTask, Task};
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct DurationSelectState {
    task: Task,
    project_name: String,
    duration_min: u32,
    last_activity: Instant,
}

impl DurationSelectState {
    pub fn new() -> Self {
        Self {
            task: Task::default(),
            project_name: String::new(),
            duration_min: crate::config::DEFAULT_TIMER_MIN,
            last_activity: Instant::now(),
        }
    }
}

impl State for DurationSelectState {
    fn enter(&mut self, ctx: &mut Ctx) {
        // A freshly staged task reseeds the duration; coming back from the
        // detail view stages nothing and keeps the dialed value.
        if let Some((task, project_name)) = ctx.take_staged_task() {
            self.duration_min = task.duration.clamp(DURATION_MIN_MIN, DURATION_MAX_MIN);
            self.task = task;
            self.project_name = project_name;
        }
        info!(
            task_id = %self.task.id,
            duration = self.duration_min,
            "entering duration select state"
        );
        self.last_activity = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: AMBER,
            period: Duration::from_secs(5),
        });
        ctx.input.register_all(&[
            InputKind::Click,
            InputKind::DoubleClick,
            InputKind::LongPress,
            InputKind::Rotate,
        ]);
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            self.last_activity = ctx.now;
            match event {
                InputEvent::Rotate(delta) => {
                    let moved = i64::from(self.duration_min)
                        + i64::from(delta) * i64::from(DURATION_STEP_MIN);
                    self.duration_min = moved
                        .clamp(i64::from(DURATION_MIN_MIN), i64::from(DURATION_MAX_MIN))
                        as u32;
                }
                InputEvent::Click => {
                    info!(
                        task_id = %self.task.id,
                        duration = self.duration_min,
                        "duration confirmed, starting session"
                    );
                    let session = SessionContext::begin(
                        self.duration_min,
                        Some(SessionTask::from_task(&self.task)),
                    );
                    ctx.stage_session(session);
                    ctx.display.flash(Flash::TimerStart);
                    ctx.request_transition(StateId::Timer);
                }
                InputEvent::DoubleClick => {
                    ctx.stage_task(self.task.clone(), self.project_name.clone());
                    ctx.request_transition(StateId::TaskDetail);
                }
                InputEvent::LongPress => {
                    ctx.display.flash(Flash::Cancel);
                    ctx.request_transition(StateId::TaskList);
                }
            }
        }
        if ctx.transition_pending() {
            return;
        }

        ctx.display.show(Screen::DurationSelect {
            task_name: self.task.screen_name(),
            duration_min: self.duration_min,
        });

        if ctx.now.duration_since(self.last_activity) >= DURATION_SELECT_TIMEOUT {
            info!("duration select timeout, returning to task list");
            ctx.request_transition(StateId::TaskList);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting duration select state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
