//! Task detail: subtask checklist plus a trailing "mark task complete" row.
//!
//! Subtask toggles are optimistic local updates on this state's copy of the
//! task; the authoritative flags come back with the next catalog refresh.

use crate::config::{TASK_DETAIL_TIMEOUT, TASK_PAGE_SIZE, TEAL};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, ListRow, Screen};
use crate::domain::{Cursor, Task};
use crate::events::OutboundEvent;
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct TaskDetailState {
    task: Task,
    project_name: String,
    cursor: Cursor,
    last_activity: Instant,
}

impl TaskDetailState {
    pub fn new() -> Self {
        Self {
            task: Task::default(),
            project_name: String::new(),
            cursor: Cursor::default(),
            last_activity: Instant::now(),
        }
    }

    /// Subtask rows plus the synthetic trailing row.
    fn total_rows(&self) -> usize {
        self.task.subtasks.len() + 1
    }

    fn select(&mut self, ctx: &mut Ctx) {
        let complete_row = self.task.subtasks.len();
        if self.cursor.index >= complete_row {
            info!(task_id = %self.task.id, "marking task complete");
            ctx.send_event(OutboundEvent::TaskComplete {
                project_id: self.task.project_id.clone(),
                task_id: self.task.id.clone(),
                task_name: self.task.name.clone(),
            });
            ctx.display.flash(Flash::Confirmation);
            ctx.request_transition(StateId::TaskList);
            return;
        }

        let index = self.cursor.index;
        if let Some(completed) = self.task.toggle_subtask(index) {
            let item_id = self.task.subtasks[index].id.clone();
            info!(%item_id, completed, "subtask toggled");
            ctx.send_event(OutboundEvent::SubtaskToggle {
                project_id: self.task.project_id.clone(),
                task_id: self.task.id.clone(),
                task_name: self.task.name.clone(),
                item_id,
                completed,
            });
        }
    }

    fn rows(&self) -> Vec<ListRow> {
        let mut rows: Vec<ListRow> = self
            .task
            .subtasks
            .iter()
            .enumerate()
            .map(|(i, sub)| ListRow {
                title: sub.title.clone(),
                detail: if sub.completed { "[x]" } else { "[ ]" }.to_string(),
                selected: i == self.cursor.index,
            })
            .collect();
        rows.push(ListRow {
            title: "Mark task complete".to_string(),
            detail: format!("{}/{}", self.task.subtasks_done, self.task.subtasks_total),
            selected: self.cursor.index == self.task.subtasks.len(),
        });
        rows.into_iter()
            .skip(self.cursor.offset)
            .take(TASK_PAGE_SIZE)
            .collect()
    }
}

impl State for TaskDetailState {
    fn enter(&mut self, ctx: &mut Ctx) {
        if let Some((task, project_name)) = ctx.take_staged_task() {
            self.task = task;
            self.project_name = project_name;
        }
        info!(task_id = %self.task.id, "entering task detail state");
        self.cursor = Cursor::default();
        self.last_activity = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: TEAL,
            period: Duration::from_secs(8),
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
                    let total = self.total_rows();
                    self.cursor.step(delta, total);
                }
                InputEvent::Click => self.select(ctx),
                InputEvent::DoubleClick => {
                    ctx.request_transition(StateId::DurationSelect);
                }
                InputEvent::LongPress => {
                    ctx.display.flash(Flash::Cancel);
                    ctx.request_transition(StateId::DurationSelect);
                }
            }
        }
        if ctx.transition_pending() {
            return;
        }

        self.cursor.clamp(self.total_rows());
        ctx.display.show(Screen::TaskDetail {
            project_name: self.project_name.clone(),
            task_name: self.task.screen_name(),
            rows: self.rows(),
            cursor: self.cursor,
            total: self.total_rows(),
        });

        if ctx.now.duration_since(self.last_activity) >= TASK_DETAIL_TIMEOUT {
            info!("detail timeout, returning to duration select");
            ctx.request_transition(StateId::DurationSelect);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting task detail state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}
