use crate::config::DEFAULT_TIMER_MIN;

/// A unit of work mirrored from the external task source.
///
/// Tasks are value types: fully replaced on every catalog refresh, read-only
/// afterwards except for the local subtask toggle in the detail view (which
/// the next refresh reconciles).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    /// Primary name, may be non-ASCII.
    pub name: String,
    /// Optional ASCII fallback for screens that cannot render the name.
    pub display_name: String,
    pub completed: bool,
    /// Suggested session length in minutes.
    pub duration: u32,
    pub spent_today_sec: u32,
    /// `MMDD` stamp, only meaningful when `completed`.
    pub completed_mmdd: String,
    /// Seconds spent on the completion day, only meaningful when `completed`.
    pub completed_spent_sec: u32,
    /// Numeric priority (0/1/3/5).
    pub priority: u8,
    /// Optional priority flag character (e.g. "!").
    pub priority_flag: String,
    /// `MMDD` due stamp, empty when absent.
    pub due_mmdd: String,
    pub has_repeat: bool,
    pub has_reminder: bool,
    pub subtasks_done: u32,
    pub subtasks_total: u32,
    pub subtasks: Vec<Subtask>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: String::new(),
            project_id: String::new(),
            name: String::new(),
            display_name: String::new(),
            completed: false,
            duration: DEFAULT_TIMER_MIN,
            spent_today_sec: 0,
            completed_mmdd: String::new(),
            completed_spent_sec: 0,
            priority: 0,
            priority_flag: String::new(),
            due_mmdd: String::new(),
            has_repeat: false,
            has_reminder: false,
            subtasks_done: 0,
            subtasks_total: 0,
            subtasks: Vec::new(),
        }
    }
}

impl Task {
    /// Toggle the subtask at `index` and recompute the done/total counts.
    /// Returns the new completion flag, or None when the index is stale.
    pub fn toggle_subtask(&mut self, index: usize) -> Option<bool> {
        let sub = self.subtasks.get_mut(index)?;
        sub.completed = !sub.completed;
        let now_completed = sub.completed;

        self.subtasks_done = self.subtasks.iter().filter(|s| s.completed).count() as u32;
        if self.subtasks_total == 0 {
            self.subtasks_total = self.subtasks.len() as u32;
        }
        Some(now_completed)
    }

    /// Name shown on ASCII-only screens: prefer `display_name`, fall back to
    /// `name`, then to a `TASK <id-suffix>` tag when neither renders.
    pub fn screen_name(&self) -> String {
        screen_name(&self.display_name, &self.name, &self.id)
    }
}

/// A checklist row owned by its parent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Immutable project snapshot from the last catalog refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

fn is_ascii_printable(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Shared display-name fallback used by any screen limited to ASCII.
pub fn screen_name(display_name: &str, name: &str, id: &str) -> String {
    if is_ascii_printable(display_name) {
        return display_name.to_string();
    }
    if is_ascii_printable(name) {
        return name.to_string();
    }
    let suffix: String = id
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if is_ascii_printable(&suffix) {
        format!("TASK {}", suffix)
    } else {
        "TASK".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_subtasks(n: usize) -> Task {
        let mut task = Task {
            id: "t1".into(),
            name: "Write report".into(),
            ..Task::default()
        };
        for i in 0..n {
            task.subtasks.push(Subtask {
                id: format!("s{}", i),
                title: format!("Step {}", i),
                completed: false,
            });
        }
        task.subtasks_total = n as u32;
        task
    }

    #[test]
    fn test_toggle_subtask_updates_counts() {
        let mut task = task_with_subtasks(3);

        assert_eq!(task.toggle_subtask(1), Some(true));
        assert_eq!(task.subtasks_done, 1);
        assert!(task.subtasks[1].completed);

        assert_eq!(task.toggle_subtask(1), Some(false));
        assert_eq!(task.subtasks_done, 0);
    }

    #[test]
    fn test_toggle_subtask_stale_index() {
        let mut task = task_with_subtasks(2);
        assert_eq!(task.toggle_subtask(5), None);
        assert_eq!(task.subtasks_done, 0);
    }

    #[test]
    fn test_toggle_subtask_derives_total_when_missing() {
        let mut task = task_with_subtasks(2);
        task.subtasks_total = 0;
        task.toggle_subtask(0);
        assert_eq!(task.subtasks_total, 2);
    }

    #[test]
    fn test_screen_name_prefers_display_name() {
        assert_eq!(screen_name("Report", "写报告", "abc123"), "Report");
    }

    #[test]
    fn test_screen_name_falls_back_to_name() {
        assert_eq!(screen_name("", "Report", "abc123"), "Report");
    }

    #[test]
    fn test_screen_name_non_ascii_uses_id_suffix() {
        assert_eq!(screen_name("", "写报告", "abc123"), "TASK c123");
    }

    #[test]
    fn test_screen_name_everything_empty() {
        assert_eq!(screen_name("", "", ""), "TASK");
    }
}
