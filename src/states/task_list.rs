//! Task list: the three-mode browser over the synced catalog.
//!
//! Double-click cycles Pending -> Completed -> Projects. In Pending mode a
//! click opens the duration selector for the highlighted task; in Completed
//! mode it drops back to Pending (that list is read-only); in Projects mode
//! it commits the highlighted project. Long press aborts to Idle.

use crate::config::{TASK_LIST_TIMEOUT, TASK_PAGE_SIZE, TEAL};
use crate::context::Ctx;
use crate::display::{DisplaySink, Flash, ListRow, ListScreen, Screen};
use crate::domain::{Cursor, Task, TaskCatalog, TaskListMode};
use crate::events::OutboundEvent;
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::{Duration, Instant};
use tracing::info;

pub struct TaskListState {
    last_activity: Instant,
}

impl TaskListState {
    pub fn new() -> Self {
        Self {
            last_activity: Instant::now(),
        }
    }

    fn open_selected_task(&self, ctx: &mut Ctx) {
        let Some(task) = ctx.catalog.selected_pending() else {
            info!("no task highlighted, returning to idle");
            ctx.request_transition(StateId::Idle);
            return;
        };
        info!(task_id = %task.id, duration = task.duration, "task selected");
        let project_name = ctx.catalog.selected_project_name().to_string();
        ctx.stage_task(task, project_name);
        ctx.request_transition(StateId::DurationSelect);
    }

    fn commit_project(&self, ctx: &mut Ctx) {
        if let Some(project) = ctx.catalog.commit_selected_project() {
            info!(project_id = %project.id, "project committed");
            ctx.send_event(OutboundEvent::ProjectSelected {
                project_id: project.id,
                project_name: project.name,
            });
            ctx.display.flash(Flash::Confirmation);
        }
        ctx.catalog.set_mode(TaskListMode::Pending);
    }
}

impl State for TaskListState {
    fn enter(&mut self, ctx: &mut Ctx) {
        info!(mode = ?ctx.catalog.mode(), "entering task list state");
        self.last_activity = ctx.now;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: TEAL,
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
                InputEvent::Rotate(delta) => ctx.catalog.move_cursor(delta),
                InputEvent::DoubleClick => ctx.catalog.cycle_mode(),
                InputEvent::Click => match ctx.catalog.mode() {
                    TaskListMode::Pending => self.open_selected_task(ctx),
                    TaskListMode::Completed => ctx.catalog.set_mode(TaskListMode::Pending),
                    TaskListMode::Projects => self.commit_project(ctx),
                },
                InputEvent::LongPress => {
                    ctx.display.flash(Flash::Cancel);
                    ctx.request_transition(StateId::Idle);
                }
            }
        }
        if ctx.transition_pending() {
            return;
        }

        let mode = ctx.catalog.mode();
        let cursor = ctx.catalog.cursor();
        let screen = build_list_screen(&ctx.catalog, mode, cursor, false);
        ctx.display.show(Screen::TaskList(screen));

        if ctx.now.duration_since(self.last_activity) >= TASK_LIST_TIMEOUT {
            info!("task list timeout, returning to idle");
            ctx.request_transition(StateId::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting task list state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}

/// Cut the active list down to the visible window for rendering. Shared with
/// the read-only variant.
pub(crate) fn build_list_screen(
    catalog: &TaskCatalog,
    mode: TaskListMode,
    cursor: Cursor,
    read_only: bool,
) -> ListScreen {
    let (rows, total) = match mode {
        TaskListMode::Pending => {
            let tasks = catalog.pending();
            (task_rows(tasks, cursor), tasks.len())
        }
        TaskListMode::Completed => {
            let tasks = catalog.completed();
            (task_rows(tasks, cursor), tasks.len())
        }
        TaskListMode::Projects => {
            let projects = catalog.projects();
            let rows = projects
                .iter()
                .enumerate()
                .skip(cursor.offset)
                .take(TASK_PAGE_SIZE)
                .map(|(i, p)| ListRow {
                    title: p.name.clone(),
                    detail: if p.id == catalog.selected_project_id() {
                        "current".to_string()
                    } else {
                        String::new()
                    },
                    selected: i == cursor.index,
                })
                .collect();
            (rows, projects.len())
        }
    };

    ListScreen {
        mode,
        rows,
        cursor,
        total,
        read_only,
    }
}

fn task_rows(tasks: &[Task], cursor: Cursor) -> Vec<ListRow> {
    tasks
        .iter()
        .enumerate()
        .skip(cursor.offset)
        .take(TASK_PAGE_SIZE)
        .map(|(i, task)| ListRow {
            title: task.screen_name(),
            detail: task_detail_line(task),
            selected: i == cursor.index,
        })
        .collect()
}

fn task_detail_line(task: &Task) -> String {
    let mut parts = vec![format!("{}m", task.duration)];
    if task.subtasks_total > 0 {
        parts.push(format!("[{}/{}]", task.subtasks_done, task.subtasks_total));
    }
    if !task.priority_flag.is_empty() {
        parts.push(task.priority_flag.clone());
    } else if task.priority > 0 {
        parts.push(format!("p{}", task.priority));
    }
    if !task.due_mmdd.is_empty() {
        parts.push(format!("due {}", task.due_mmdd));
    }
    if task.completed {
        if !task.completed_mmdd.is_empty() {
            parts.push(format!("done {}", task.completed_mmdd));
        }
        if task.completed_spent_sec > 0 {
            parts.push(format!("{}m spent", task.completed_spent_sec / 60));
        }
    } else if task.spent_today_sec > 0 {
        parts.push(format!("{}m today", task.spent_today_sec / 60));
    }
    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogPayload;
    use pretty_assertions::assert_eq;

    fn catalog_with(pending: usize) -> TaskCatalog {
        let tasks: Vec<String> = (0..pending)
            .map(|i| {
                format!(
                    r#"{{"id": "t{i}", "name": "task {i}", "status": "needs_action",
                        "duration": 30, "spent_today_sec": 120}}"#
                )
            })
            .collect();
        let json = format!(r#"{{"tasks": [{}]}}"#, tasks.join(","));
        let mut catalog = TaskCatalog::default();
        catalog.ingest(CatalogPayload::parse(&json).unwrap());
        catalog
    }

    #[test]
    fn test_build_list_screen_window() {
        let mut catalog = catalog_with(10);
        catalog.move_cursor(5);
        let cursor = catalog.cursor();
        let screen = build_list_screen(&catalog, TaskListMode::Pending, cursor, false);

        assert_eq!(screen.total, 10);
        assert_eq!(screen.rows.len(), TASK_PAGE_SIZE);
        assert_eq!(screen.rows[0].title, "task 2");
        assert!(screen.rows[3].selected);
    }

    #[test]
    fn test_detail_line_composition() {
        let mut task = Task {
            id: "t".into(),
            name: "x".into(),
            duration: 30,
            spent_today_sec: 600,
            ..Task::default()
        };
        task.priority = 3;
        task.due_mmdd = "0812".into();
        assert_eq!(task_detail_line(&task), "30m  p3  due 0812  10m today");
    }

    #[test]
    fn test_empty_list_screen_has_no_rows() {
        let catalog = TaskCatalog::default();
        let screen =
            build_list_screen(&catalog, TaskListMode::Pending, Cursor::default(), false);
        assert_eq!(screen.total, 0);
        assert!(screen.rows.is_empty());
    }
}
