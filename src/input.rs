//! Discrete input events and the state-scoped handler table.
//!
//! The driver pushes debounced events in arrival order; the active state
//! drains them once per tick. A state only ever sees the event kinds it
//! registered in `enter()`, and `exit()` must wipe the table, since stale
//! registrations would route input into a no-longer-active state.

use std::collections::VecDeque;

/// A debounced event from the two physical controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click,
    DoubleClick,
    LongPress,
    /// Signed detent count from the knob.
    Rotate(i32),
}

impl InputEvent {
    pub fn kind(self) -> InputKind {
        match self {
            InputEvent::Click => InputKind::Click,
            InputEvent::DoubleClick => InputKind::DoubleClick,
            InputEvent::LongPress => InputKind::LongPress,
            InputEvent::Rotate(_) => InputKind::Rotate,
        }
    }
}

/// The four registrable event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Click,
    DoubleClick,
    LongPress,
    Rotate,
}

impl InputKind {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            InputKind::Click => 0,
            InputKind::DoubleClick => 1,
            InputKind::LongPress => 2,
            InputKind::Rotate => 3,
        }
    }
}

/// Event queue plus the per-state registration table.
#[derive(Debug, Default)]
pub struct InputSource {
    queue: VecDeque<InputEvent>,
    registered: [bool; InputKind::COUNT],
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in one event kind (called from a state's `enter()`).
    pub fn register(&mut self, kind: InputKind) {
        self.registered[kind.index()] = true;
    }

    pub fn register_all(&mut self, kinds: &[InputKind]) {
        for &kind in kinds {
            self.register(kind);
        }
    }

    /// Wipe every registration (called from a state's `exit()`).
    pub fn clear_handlers(&mut self) {
        self.registered = [false; InputKind::COUNT];
    }

    pub fn has_registrations(&self) -> bool {
        self.registered.iter().any(|&r| r)
    }

    pub fn is_registered(&self, kind: InputKind) -> bool {
        self.registered[kind.index()]
    }

    /// Queue an event from the driver. Zero-delta rotations are input noise
    /// and are absorbed here.
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::Rotate(0) = event {
            return;
        }
        self.queue.push_back(event);
    }

    /// Drain the queue, keeping arrival order and dropping events whose kind
    /// the active state did not register for.
    pub fn drain_registered(&mut self) -> Vec<InputEvent> {
        let mut out = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            if self.is_registered(event.kind()) {
                out.push(event);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unregistered_kinds_are_dropped() {
        let mut input = InputSource::new();
        input.register(InputKind::Click);

        input.push(InputEvent::Click);
        input.push(InputEvent::DoubleClick);
        input.push(InputEvent::Rotate(1));
        input.push(InputEvent::Click);

        assert_eq!(
            input.drain_registered(),
            vec![InputEvent::Click, InputEvent::Click]
        );
        // Drained, not left behind.
        assert_eq!(input.drain_registered(), Vec::new());
    }

    #[test]
    fn test_arrival_order_preserved() {
        let mut input = InputSource::new();
        input.register_all(&[InputKind::Click, InputKind::Rotate]);

        input.push(InputEvent::Rotate(-1));
        input.push(InputEvent::Click);
        input.push(InputEvent::Rotate(2));

        assert_eq!(
            input.drain_registered(),
            vec![
                InputEvent::Rotate(-1),
                InputEvent::Click,
                InputEvent::Rotate(2)
            ]
        );
    }

    #[test]
    fn test_zero_delta_rotation_absorbed() {
        let mut input = InputSource::new();
        input.register(InputKind::Rotate);
        input.push(InputEvent::Rotate(0));
        assert_eq!(input.drain_registered(), Vec::new());
    }

    #[test]
    fn test_clear_handlers_wipes_table() {
        let mut input = InputSource::new();
        input.register_all(&[
            InputKind::Click,
            InputKind::DoubleClick,
            InputKind::LongPress,
            InputKind::Rotate,
        ]);
        assert!(input.has_registrations());

        input.clear_handlers();
        assert!(!input.has_registrations());

        input.push(InputEvent::Click);
        assert_eq!(input.drain_registered(), Vec::new());
    }
}
