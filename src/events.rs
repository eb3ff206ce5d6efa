//! Outbound session-event payloads and the queue feeding the delivery thread.
//!
//! Delivery is fire-and-forget: the core enqueues, a gateway thread drains.
//! A full queue drops the newest payload (logged) rather than blocking the
//! driver loop.

use crate::domain::{PromptContext, SessionContext};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::Serialize;
use tracing::warn;

/// Why a session was canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    User,
    Timeout,
}

/// One outbound notification, serialized as a flat JSON object tagged by
/// `event`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutboundEvent {
    FocusStarted {
        session_id: String,
        task_id: String,
        task_name: String,
        duration_minutes: u32,
    },
    FocusResumed {
        session_id: String,
        task_id: String,
        task_name: String,
        elapsed_seconds: u64,
    },
    FocusPaused {
        session_id: String,
        task_id: String,
        task_name: String,
        elapsed_seconds: u64,
        count_time: bool,
    },
    FocusCanceled {
        session_id: String,
        task_id: String,
        task_name: String,
        elapsed_seconds: u64,
        count_time: bool,
        cancel_reason: CancelReason,
    },
    FocusCompleted {
        session_id: String,
        task_id: String,
        task_name: String,
        elapsed_seconds: u64,
        count_time: bool,
    },
    TaskDoneDecision {
        session_id: String,
        task_id: String,
        task_name: String,
        task_display_name: String,
        project_id: String,
        mark_task_done: bool,
        end_type: String,
        elapsed_seconds: u64,
        count_time: bool,
    },
    SubtaskToggle {
        project_id: String,
        task_id: String,
        task_name: String,
        item_id: String,
        completed: bool,
    },
    TaskComplete {
        project_id: String,
        task_id: String,
        task_name: String,
    },
    ProjectSelected {
        project_id: String,
        project_name: String,
    },
    DeviceOnline {},
}

impl OutboundEvent {
    pub fn focus_started(session: &SessionContext) -> Self {
        OutboundEvent::FocusStarted {
            session_id: session.session_id.clone(),
            task_id: session.task_id().to_string(),
            task_name: session.task_name().to_string(),
            duration_minutes: session.duration_min,
        }
    }

    pub fn focus_resumed(session: &SessionContext) -> Self {
        OutboundEvent::FocusResumed {
            session_id: session.session_id.clone(),
            task_id: session.task_id().to_string(),
            task_name: session.task_name().to_string(),
            elapsed_seconds: session.elapsed_secs,
        }
    }

    pub fn focus_paused(session: &SessionContext) -> Self {
        OutboundEvent::FocusPaused {
            session_id: session.session_id.clone(),
            task_id: session.task_id().to_string(),
            task_name: session.task_name().to_string(),
            elapsed_seconds: session.elapsed_secs,
            count_time: false,
        }
    }

    pub fn focus_canceled(session: &SessionContext, reason: CancelReason) -> Self {
        OutboundEvent::FocusCanceled {
            session_id: session.session_id.clone(),
            task_id: session.task_id().to_string(),
            task_name: session.task_name().to_string(),
            elapsed_seconds: session.elapsed_secs,
            count_time: false,
            cancel_reason: reason,
        }
    }

    pub fn focus_completed(session: &SessionContext) -> Self {
        OutboundEvent::FocusCompleted {
            session_id: session.session_id.clone(),
            task_id: session.task_id().to_string(),
            task_name: session.task_name().to_string(),
            elapsed_seconds: session.elapsed_secs,
            count_time: true,
        }
    }

    pub fn task_done_decision(prompt: &PromptContext, mark_task_done: bool) -> Self {
        OutboundEvent::TaskDoneDecision {
            session_id: prompt.session_id.clone(),
            task_id: prompt.task.id.clone(),
            task_name: prompt.task.name.clone(),
            task_display_name: prompt.task.display_name.clone(),
            project_id: prompt.task.project_id.clone(),
            mark_task_done,
            end_type: if prompt.canceled {
                "canceled".to_string()
            } else {
                "completed".to_string()
            },
            elapsed_seconds: prompt.elapsed_secs,
            count_time: prompt.count_time,
        }
    }

    /// The `event` tag this payload serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundEvent::FocusStarted { .. } => "focus_started",
            OutboundEvent::FocusResumed { .. } => "focus_resumed",
            OutboundEvent::FocusPaused { .. } => "focus_paused",
            OutboundEvent::FocusCanceled { .. } => "focus_canceled",
            OutboundEvent::FocusCompleted { .. } => "focus_completed",
            OutboundEvent::TaskDoneDecision { .. } => "task_done_decision",
            OutboundEvent::SubtaskToggle { .. } => "subtask_toggle",
            OutboundEvent::TaskComplete { .. } => "task_complete",
            OutboundEvent::ProjectSelected { .. } => "project_selected",
            OutboundEvent::DeviceOnline {} => "device_online",
        }
    }
}

/// Sending half of the bounded outbound queue.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<OutboundEvent>,
}

impl EventSender {
    /// Enqueue without blocking. On a full queue the payload is dropped and
    /// logged; the session proceeds regardless.
    pub fn send(&self, event: OutboundEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(kind = event.kind(), "event queue full, dropping payload");
            }
            Err(TrySendError::Disconnected(event)) => {
                warn!(kind = event.kind(), "event queue closed, dropping payload");
            }
        }
    }
}

/// Create the bounded queue: sender for the core, receiver for delivery.
pub fn event_channel(capacity: usize) -> (EventSender, Receiver<OutboundEvent>) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (EventSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionTask;
    use pretty_assertions::assert_eq;

    fn session_with_task() -> SessionContext {
        let mut session = SessionContext::begin(
            25,
            Some(SessionTask {
                id: "t1".into(),
                name: "Write report".into(),
                display_name: "Report".into(),
                project_id: "proj".into(),
            }),
        );
        session.session_id = "sid".into();
        session
    }

    #[test]
    fn test_focus_started_payload_shape() {
        let json = serde_json::to_value(OutboundEvent::focus_started(&session_with_task())).unwrap();
        assert_eq!(json["event"], "focus_started");
        assert_eq!(json["session_id"], "sid");
        assert_eq!(json["task_id"], "t1");
        assert_eq!(json["task_name"], "Write report");
        assert_eq!(json["duration_minutes"], 25);
    }

    #[test]
    fn test_canceled_payload_carries_reason() {
        let mut session = session_with_task();
        session.elapsed_secs = 300;

        let user = serde_json::to_value(OutboundEvent::focus_canceled(
            &session,
            CancelReason::User,
        ))
        .unwrap();
        let timeout = serde_json::to_value(OutboundEvent::focus_canceled(
            &session,
            CancelReason::Timeout,
        ))
        .unwrap();

        assert_eq!(user["cancel_reason"], "user");
        assert_eq!(timeout["cancel_reason"], "timeout");
        assert_eq!(user["count_time"], false);
        assert_eq!(user["elapsed_seconds"], 300);

        // Identical apart from the reason field.
        let mut u = user.clone();
        u["cancel_reason"] = timeout["cancel_reason"].clone();
        assert_eq!(u, timeout);
    }

    #[test]
    fn test_completed_counts_time() {
        let mut session = session_with_task();
        session.elapsed_secs = 1500;
        let json = serde_json::to_value(OutboundEvent::focus_completed(&session)).unwrap();
        assert_eq!(json["count_time"], true);
        assert_eq!(json["elapsed_seconds"], 1500);
    }

    #[test]
    fn test_decision_payload_end_type() {
        let session = session_with_task();
        let task = session.task.clone().unwrap();
        let prompt = PromptContext::from_session(&session, task, true);
        let json =
            serde_json::to_value(OutboundEvent::task_done_decision(&prompt, false)).unwrap();
        assert_eq!(json["event"], "task_done_decision");
        assert_eq!(json["end_type"], "canceled");
        assert_eq!(json["mark_task_done"], false);
        assert_eq!(json["task_display_name"], "Report");
    }

    #[test]
    fn test_full_queue_drops_newest_without_blocking() {
        let (sender, rx) = event_channel(2);
        sender.send(OutboundEvent::DeviceOnline {});
        sender.send(OutboundEvent::DeviceOnline {});
        // Third send must not block; it is dropped.
        sender.send(OutboundEvent::ProjectSelected {
            project_id: "p".into(),
            project_name: "P".into(),
        });

        assert_eq!(rx.len(), 2);
        assert_eq!(rx.recv().unwrap().kind(), "device_online");
        assert_eq!(rx.recv().unwrap().kind(), "device_online");
        assert!(rx.try_recv().is_err());
    }
}
