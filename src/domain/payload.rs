//! Schema-validated decode of the inbound catalog payload.
//!
//! The upstream source pushes one JSON object replacing the whole catalog.
//! `tasks` is required; `status` must be one of the two known strings.
//! Optional fields default exactly where the wire contract defines a default
//! (duration 25, counters 0, flags false) rather than defaulting everything.

use crate::domain::task::{Project, Subtask, Task};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

fn default_duration() -> u32 {
    crate::config::DEFAULT_TIMER_MIN
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub selected_project_id: String,
    #[serde(default)]
    pub selected_project_name: String,
    #[serde(default)]
    pub projects: Vec<ProjectPayload>,
    pub tasks: Vec<TaskPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectPayload {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NeedsAction,
    Completed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskPayload {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub status: TaskStatus,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub spent_today_sec: u32,
    #[serde(default)]
    pub completed_mmdd: String,
    #[serde(default)]
    pub completed_spent_sec: u32,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub priority_flag: String,
    #[serde(default)]
    pub due_mmdd: String,
    #[serde(default)]
    pub has_repeat: bool,
    #[serde(default)]
    pub has_reminder: bool,
    pub subtasks_total: Option<u32>,
    pub subtasks_done: Option<u32>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskPayload {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// 0 = open, anything else = done.
    #[serde(default)]
    pub status: u8,
}

impl CatalogPayload {
    pub fn parse(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TaskPayload {
    /// Materialize the payload row into the catalog's task type.
    ///
    /// Subtask done/total counts come from the payload when present, else
    /// are derived by counting the subtask completion flags.
    pub fn into_task(self) -> Task {
        let subtasks: Vec<Subtask> = self
            .subtasks
            .into_iter()
            .map(|s| Subtask {
                id: s.id,
                title: s.title,
                completed: s.status != 0,
            })
            .collect();

        let derived_done = subtasks.iter().filter(|s| s.completed).count() as u32;
        let derived_total = subtasks.len() as u32;

        Task {
            id: self.id,
            project_id: self.project_id,
            name: self.name,
            display_name: self.display_name,
            completed: self.status == TaskStatus::Completed,
            duration: self.duration,
            spent_today_sec: self.spent_today_sec,
            completed_mmdd: self.completed_mmdd,
            completed_spent_sec: self.completed_spent_sec,
            priority: self.priority,
            priority_flag: self.priority_flag,
            due_mmdd: self.due_mmdd,
            has_repeat: self.has_repeat,
            has_reminder: self.has_reminder,
            subtasks_done: self.subtasks_done.unwrap_or(derived_done),
            subtasks_total: self.subtasks_total.unwrap_or(derived_total),
            subtasks,
        }
    }
}

impl ProjectPayload {
    pub fn into_project(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_payload() {
        let json = r#"{
            "tasks": [
                {"id": "t1", "name": "Write report", "status": "needs_action"}
            ]
        }"#;
        let payload = CatalogPayload::parse(json).unwrap();
        assert_eq!(payload.tasks.len(), 1);

        let task = payload.tasks[0].clone().into_task();
        assert_eq!(task.duration, 25);
        assert!(!task.completed);
        assert_eq!(task.subtasks_total, 0);
    }

    #[test]
    fn test_parse_rejects_missing_tasks_key() {
        let json = r#"{"projects": []}"#;
        assert!(CatalogPayload::parse(json).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let json = r#"{"tasks": [{"id": "t1", "name": "x", "status": "paused"}]}"#;
        assert!(CatalogPayload::parse(json).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(CatalogPayload::parse("{not json").is_err());
    }

    #[test]
    fn test_subtask_counts_from_payload_win() {
        let json = r#"{
            "tasks": [{
                "id": "t1", "name": "x", "status": "needs_action",
                "subtasks_total": 9, "subtasks_done": 4,
                "subtasks": [{"id": "s1", "title": "a", "status": 1}]
            }]
        }"#;
        let task = CatalogPayload::parse(json).unwrap().tasks[0]
            .clone()
            .into_task();
        assert_eq!(task.subtasks_total, 9);
        assert_eq!(task.subtasks_done, 4);
    }

    #[test]
    fn test_subtask_counts_derived_when_absent() {
        let json = r#"{
            "tasks": [{
                "id": "t1", "name": "x", "status": "completed",
                "subtasks": [
                    {"id": "s1", "title": "a", "status": 1},
                    {"id": "s2", "title": "b", "status": 0}
                ]
            }]
        }"#;
        let task = CatalogPayload::parse(json).unwrap().tasks[0]
            .clone()
            .into_task();
        assert!(task.completed);
        assert_eq!(task.subtasks_total, 2);
        assert_eq!(task.subtasks_done, 1);
        assert!(task.subtasks[0].completed);
        assert!(!task.subtasks[1].completed);
    }
}
