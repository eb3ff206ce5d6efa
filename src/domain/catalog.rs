//! Device-local mirror of the external task source.
//!
//! The catalog is replaced wholesale on every refresh, never merged. Pending
//! and completed lists partition the ingested tasks by completion flag.
//! Each browse mode keeps its own cursor + window-offset pair; every read
//! re-clamps against the current list length, so cursors can never dangle
//! after a refresh lands mid-browse.

use crate::config::TASK_PAGE_SIZE;
use crate::domain::payload::CatalogPayload;
use crate::domain::task::{Project, Task};
use tracing::info;

/// Browse mode, cycled by double-click in this fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskListMode {
    #[default]
    Pending,
    Completed,
    Projects,
}

impl TaskListMode {
    pub fn next(self) -> Self {
        match self {
            TaskListMode::Pending => TaskListMode::Completed,
            TaskListMode::Completed => TaskListMode::Projects,
            TaskListMode::Projects => TaskListMode::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskListMode::Pending => "TODO",
            TaskListMode::Completed => "DONE",
            TaskListMode::Projects => "LISTS",
        }
    }
}

/// Selection cursor + scroll window for one list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    pub offset: usize,
}

impl Cursor {
    /// Move by `delta`, keeping the sliding window in step. The window only
    /// scrolls when the cursor would leave it, and never past either end.
    pub(crate) fn step(&mut self, delta: i32, len: usize) {
        if len == 0 {
            *self = Cursor::default();
            return;
        }
        self.clamp(len);

        if delta > 0 {
            let steps = delta as usize;
            self.index = (self.index + steps).min(len - 1);
            if self.index >= self.offset + TASK_PAGE_SIZE {
                self.offset = self.index + 1 - TASK_PAGE_SIZE;
            }
        } else if delta < 0 {
            let steps = delta.unsigned_abs() as usize;
            self.index = self.index.saturating_sub(steps);
            if self.index < self.offset {
                self.offset = self.index;
            }
        }
    }

    pub(crate) fn clamp(&mut self, len: usize) {
        if len == 0 {
            *self = Cursor::default();
            return;
        }
        if self.index >= len {
            self.index = len - 1;
        }
        let max_offset = len.saturating_sub(TASK_PAGE_SIZE);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
        if self.index < self.offset {
            self.offset = self.index;
        }
    }
}

/// In-memory mirror of projects and tasks plus the browse cursors.
#[derive(Debug, Default)]
pub struct TaskCatalog {
    pending: Vec<Task>,
    completed: Vec<Task>,
    projects: Vec<Project>,
    selected_project_id: String,
    selected_project_name: String,
    mode: TaskListMode,
    cursor_pending: Cursor,
    cursor_completed: Cursor,
    cursor_projects: Cursor,
}

impl TaskCatalog {
    /// Replace the whole catalog from a decoded payload.
    ///
    /// Cursors reset to the top. The initial mode becomes Completed only when
    /// there is nothing pending but something completed; an active Projects
    /// mode survives the refresh so a list switch in progress is not yanked
    /// away.
    pub fn ingest(&mut self, payload: CatalogPayload) {
        self.selected_project_id = payload.selected_project_id;
        self.selected_project_name = payload.selected_project_name;
        self.projects = payload
            .projects
            .into_iter()
            .map(|p| p.into_project())
            .collect();

        self.pending.clear();
        self.completed.clear();
        for task_payload in payload.tasks {
            let task = task_payload.into_task();
            if task.completed {
                self.completed.push(task);
            } else {
                self.pending.push(task);
            }
        }

        self.cursor_pending = Cursor::default();
        self.cursor_completed = Cursor::default();
        self.cursor_projects = Cursor::default();

        if self.mode != TaskListMode::Projects {
            self.mode = if self.pending.is_empty() && !self.completed.is_empty() {
                TaskListMode::Completed
            } else {
                TaskListMode::Pending
            };
        }

        info!(
            pending = self.pending.len(),
            completed = self.completed.len(),
            projects = self.projects.len(),
            "catalog refreshed"
        );
    }

    pub fn pending(&self) -> &[Task] {
        &self.pending
    }

    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_project_id(&self) -> &str {
        &self.selected_project_id
    }

    pub fn selected_project_name(&self) -> &str {
        &self.selected_project_name
    }

    pub fn mode(&self) -> TaskListMode {
        self.mode
    }

    /// Cycle Pending -> Completed -> Projects -> Pending.
    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn set_mode(&mut self, mode: TaskListMode) {
        self.mode = mode;
    }

    fn active_len(&self) -> usize {
        match self.mode {
            TaskListMode::Pending => self.pending.len(),
            TaskListMode::Completed => self.completed.len(),
            TaskListMode::Projects => self.projects.len(),
        }
    }

    fn active_cursor_mut(&mut self) -> &mut Cursor {
        match self.mode {
            TaskListMode::Pending => &mut self.cursor_pending,
            TaskListMode::Completed => &mut self.cursor_completed,
            TaskListMode::Projects => &mut self.cursor_projects,
        }
    }

    /// Move the active mode's cursor by `delta`. Zero deltas are no-ops.
    pub fn move_cursor(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        let len = self.active_len();
        self.active_cursor_mut().step(delta, len);
    }

    /// Clamped cursor for the active mode.
    pub fn cursor(&mut self) -> Cursor {
        let len = self.active_len();
        let cursor = self.active_cursor_mut();
        cursor.clamp(len);
        *cursor
    }

    /// The highlighted pending task, if any (clamped read).
    pub fn selected_pending(&mut self) -> Option<Task> {
        if self.pending.is_empty() {
            return None;
        }
        let index = {
            let len = self.pending.len();
            let cursor = &mut self.cursor_pending;
            cursor.clamp(len);
            cursor.index
        };
        self.pending.get(index).cloned()
    }

    /// The highlighted project, if any (clamped read).
    pub fn selected_project(&mut self) -> Option<Project> {
        if self.projects.is_empty() {
            return None;
        }
        let index = {
            let len = self.projects.len();
            let cursor = &mut self.cursor_projects;
            cursor.clamp(len);
            cursor.index
        };
        self.projects.get(index).cloned()
    }

    /// Commit the highlighted project as the selected one. Returns the
    /// project when a commit actually happened.
    pub fn commit_selected_project(&mut self) -> Option<Project> {
        let project = self.selected_project()?;
        self.selected_project_id = project.id.clone();
        self.selected_project_name = project.name.clone();
        Some(project)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(pending: usize, completed: usize) -> CatalogPayload {
        let mut tasks = Vec::new();
        for i in 0..pending {
            tasks.push(format!(
                r#"{{"id": "p{i}", "name": "pending {i}", "status": "needs_action"}}"#
            ));
        }
        for i in 0..completed {
            tasks.push(format!(
                r#"{{"id": "c{i}", "name": "done {i}", "status": "completed"}}"#
            ));
        }
        let json = format!(
            r#"{{"selected_project_id": "proj", "selected_project_name": "Focus",
                "projects": [{{"id": "proj", "name": "Focus"}}, {{"id": "other", "name": "Other"}}],
                "tasks": [{}]}}"#,
            tasks.join(",")
        );
        CatalogPayload::parse(&json).unwrap()
    }

    #[test]
    fn test_ingest_partitions_by_status() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(3, 2));
        assert_eq!(catalog.pending().len(), 3);
        assert_eq!(catalog.completed().len(), 2);
        assert!(catalog.pending().iter().all(|t| !t.completed));
        assert!(catalog.completed().iter().all(|t| t.completed));
    }

    #[test]
    fn test_ingest_resets_cursors() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(8, 0));
        catalog.move_cursor(6);
        assert_eq!(catalog.cursor().index, 6);

        catalog.ingest(payload(8, 0));
        assert_eq!(catalog.cursor(), Cursor::default());
    }

    #[test]
    fn test_initial_mode_completed_only_when_pending_empty() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(0, 2));
        assert_eq!(catalog.mode(), TaskListMode::Completed);

        catalog.ingest(payload(1, 2));
        assert_eq!(catalog.mode(), TaskListMode::Pending);

        catalog.ingest(payload(0, 0));
        assert_eq!(catalog.mode(), TaskListMode::Pending);
    }

    #[test]
    fn test_projects_mode_survives_refresh() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(1, 1));
        catalog.set_mode(TaskListMode::Projects);
        catalog.ingest(payload(0, 2));
        assert_eq!(catalog.mode(), TaskListMode::Projects);
    }

    #[test]
    fn test_mode_cycle_order_wraps() {
        let mut mode = TaskListMode::Pending;
        mode = mode.next();
        assert_eq!(mode, TaskListMode::Completed);
        mode = mode.next();
        assert_eq!(mode, TaskListMode::Projects);
        mode = mode.next();
        assert_eq!(mode, TaskListMode::Pending);
    }

    #[test]
    fn test_cursor_window_slides_only_at_edges() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(10, 0));

        // Within the first page the window stays put.
        catalog.move_cursor(3);
        assert_eq!(catalog.cursor(), Cursor { index: 3, offset: 0 });

        // Crossing the page edge slides the window by one.
        catalog.move_cursor(1);
        assert_eq!(catalog.cursor(), Cursor { index: 4, offset: 1 });

        // Never over-scrolls past the end.
        catalog.move_cursor(100);
        assert_eq!(catalog.cursor(), Cursor { index: 9, offset: 6 });

        // Scrolling back only moves the window once the cursor leaves it.
        catalog.move_cursor(-3);
        assert_eq!(catalog.cursor(), Cursor { index: 6, offset: 6 });
        catalog.move_cursor(-1);
        assert_eq!(catalog.cursor(), Cursor { index: 5, offset: 5 });

        catalog.move_cursor(-100);
        assert_eq!(catalog.cursor(), Cursor { index: 0, offset: 0 });
    }

    #[test]
    fn test_cursor_zero_delta_noop() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(5, 0));
        catalog.move_cursor(2);
        let before = catalog.cursor();
        catalog.move_cursor(0);
        assert_eq!(catalog.cursor(), before);
    }

    #[test]
    fn test_cursor_clamps_after_shrinking_refresh() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(10, 0));
        catalog.move_cursor(9);

        // A smaller refresh resets, but force a stale cursor to prove the
        // clamped read path too.
        catalog.ingest(payload(3, 0));
        catalog.cursor_pending = Cursor { index: 7, offset: 6 };
        assert_eq!(catalog.cursor(), Cursor { index: 2, offset: 0 });
        assert_eq!(catalog.selected_pending().unwrap().id, "p2");
    }

    #[test]
    fn test_per_mode_cursors_are_independent() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(6, 6));

        catalog.move_cursor(4);
        assert_eq!(catalog.cursor().index, 4);

        catalog.cycle_mode();
        assert_eq!(catalog.mode(), TaskListMode::Completed);
        assert_eq!(catalog.cursor().index, 0);
        catalog.move_cursor(2);

        catalog.set_mode(TaskListMode::Pending);
        assert_eq!(catalog.cursor().index, 4);
        catalog.set_mode(TaskListMode::Completed);
        assert_eq!(catalog.cursor().index, 2);
    }

    #[test]
    fn test_commit_selected_project() {
        let mut catalog = TaskCatalog::default();
        catalog.ingest(payload(1, 0));
        catalog.set_mode(TaskListMode::Projects);
        catalog.move_cursor(1);

        let project = catalog.commit_selected_project().unwrap();
        assert_eq!(project.id, "other");
        assert_eq!(catalog.selected_project_id(), "other");
        assert_eq!(catalog.selected_project_name(), "Other");
    }

    #[test]
    fn test_empty_lists_never_panic() {
        let mut catalog = TaskCatalog::default();
        catalog.move_cursor(5);
        catalog.move_cursor(-5);
        assert_eq!(catalog.cursor(), Cursor::default());
        assert!(catalog.selected_pending().is_none());
        assert!(catalog.commit_selected_project().is_none());
        assert!(catalog.pending().is_empty() && catalog.completed().is_empty());
    }
}
