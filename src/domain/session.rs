//! Session context threaded across Timer / Paused / TaskCompletePrompt.

use crate::domain::task::{screen_name, Task};
use uuid::Uuid;

/// Identity of the task a session is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTask {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub project_id: String,
}

impl SessionTask {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            display_name: task.display_name.clone(),
            project_id: task.project_id.clone(),
        }
    }
}

/// One timer run: duration, elapsed progress, optional task identity, and a
/// session id that stays stable through pause/resume and read-only browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub duration_min: u32,
    pub elapsed_secs: u64,
    pub task: Option<SessionTask>,
    pub session_id: String,
}

impl SessionContext {
    /// Begin a fresh session: zero elapsed time, new session id.
    pub fn begin(duration_min: u32, task: Option<SessionTask>) -> Self {
        Self {
            duration_min,
            elapsed_secs: 0,
            task,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn total_secs(&self) -> u64 {
        u64::from(self.duration_min) * 60
    }

    /// Remaining seconds, floor-clamped to zero for display.
    pub fn remaining_secs(&self) -> u64 {
        self.total_secs().saturating_sub(self.elapsed_secs)
    }

    pub fn task_id(&self) -> &str {
        self.task.as_ref().map(|t| t.id.as_str()).unwrap_or("")
    }

    pub fn task_name(&self) -> &str {
        self.task.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }

    /// ASCII-safe name for the timer screens; empty when no task.
    pub fn task_screen_name(&self) -> String {
        match &self.task {
            Some(t) => screen_name(&t.display_name, &t.name, &t.id),
            None => String::new(),
        }
    }
}

/// Everything the end-of-session prompt needs, staged by Timer/Paused
/// before the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub task: SessionTask,
    pub session_id: String,
    pub elapsed_secs: u64,
    pub count_time: bool,
    pub canceled: bool,
}

impl PromptContext {
    pub fn from_session(session: &SessionContext, task: SessionTask, canceled: bool) -> Self {
        Self {
            task,
            session_id: session.session_id.clone(),
            elapsed_secs: session.elapsed_secs,
            // Only a natural completion counts toward daily totals.
            count_time: !canceled,
            canceled,
        }
    }
}
