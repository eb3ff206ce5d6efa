//! Screen variants and the sink the states render through.
//!
//! States hand the sink a fully-described `Screen` value once per tick; how
//! it gets drawn (terminal pane here, OLED on the appliance) is the sink's
//! concern. Short-lived `Flash` overlays cover transition moments.

use crate::domain::{Cursor, TaskListMode};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a transition flash stays visible.
pub const FLASH_DURATION: Duration = Duration::from_millis(700);

/// One row of a task/project list, already cut down to what a list screen
/// shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub title: String,
    pub detail: String,
    pub selected: bool,
}

/// Everything a list screen needs: mode banner, the visible window, and
/// where the cursor sits inside the full list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScreen {
    pub mode: TaskListMode,
    pub rows: Vec<ListRow>,
    pub cursor: Cursor,
    pub total: usize,
    /// Read-only variant entered from a running timer.
    pub read_only: bool,
}

/// The full set of screens the core can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Idle {
        duration_min: u32,
        wifi_connected: bool,
    },
    Adjust {
        duration_min: u32,
    },
    DurationSelect {
        task_name: String,
        duration_min: u32,
    },
    TaskList(ListScreen),
    TaskDetail {
        project_name: String,
        task_name: String,
        rows: Vec<ListRow>,
        cursor: Cursor,
        total: usize,
    },
    Timer {
        remaining_secs: u64,
        task_name: String,
    },
    Paused {
        remaining_secs: u64,
        task_name: String,
    },
    Done,
    TaskCompletePrompt {
        task_name: String,
        mark_done_selected: bool,
        canceled: bool,
    },
    Provision,
    Reset {
        confirm_selected: bool,
    },
    Blank,
}

/// Transient overlays shown across a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    TimerStart,
    TimerPause,
    TimerResume,
    TimerDone,
    Cancel,
    Confirmation,
    Connected,
    Reset,
}

impl Flash {
    pub fn caption(self) -> &'static str {
        match self {
            Flash::TimerStart => "START",
            Flash::TimerPause => "PAUSE",
            Flash::TimerResume => "RESUME",
            Flash::TimerDone => "DONE!",
            Flash::Cancel => "CANCEL",
            Flash::Confirmation => "OK",
            Flash::Connected => "CONNECTED",
            Flash::Reset => "RESET",
        }
    }
}

/// Narrow rendering interface the states talk to.
pub trait DisplaySink {
    /// Replace the current screen.
    fn show(&mut self, screen: Screen);
    /// Overlay a transition flash for a short interval.
    fn flash(&mut self, flash: Flash);
    /// Blank everything (sleep).
    fn clear(&mut self);
}

/// What the terminal renderer reads each frame.
#[derive(Debug, Clone)]
pub struct DisplayFrame {
    pub screen: Screen,
    pub flash: Option<(Flash, Instant)>,
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self {
            screen: Screen::Splash,
            flash: None,
        }
    }
}

impl DisplayFrame {
    /// The flash still visible at `now`, if any.
    pub fn active_flash(&self, now: Instant) -> Option<Flash> {
        match self.flash {
            Some((flash, set_at)) if now.duration_since(set_at) < FLASH_DURATION => Some(flash),
            _ => None,
        }
    }
}

/// Display sink shared between the core (writer) and the terminal renderer
/// (reader).
#[derive(Clone, Default)]
pub struct SharedDisplay {
    frame: Arc<Mutex<DisplayFrame>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DisplayFrame {
        self.frame.lock().expect("display frame lock poisoned").clone()
    }
}

impl DisplaySink for SharedDisplay {
    fn show(&mut self, screen: Screen) {
        self.frame.lock().expect("display frame lock poisoned").screen = screen;
    }

    fn flash(&mut self, flash: Flash) {
        self.frame.lock().expect("display frame lock poisoned").flash =
            Some((flash, Instant::now()));
    }

    fn clear(&mut self) {
        let mut frame = self.frame.lock().expect("display frame lock poisoned");
        frame.screen = Screen::Blank;
        frame.flash = None;
    }
}

/// Test double recording every call in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub screens: Vec<Screen>,
    pub flashes: Vec<Flash>,
    pub cleared: usize,
}

#[cfg(test)]
impl DisplaySink for RecordingDisplay {
    fn show(&mut self, screen: Screen) {
        self.screens.push(screen);
    }

    fn flash(&mut self, flash: Flash) {
        self.flashes.push(flash);
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }
}

// Lets tests hold a handle onto a recording sink that lives inside the
// context as a boxed trait object.
#[cfg(test)]
impl DisplaySink for Arc<Mutex<RecordingDisplay>> {
    fn show(&mut self, screen: Screen) {
        self.lock().expect("recording display lock poisoned").show(screen);
    }

    fn flash(&mut self, flash: Flash) {
        self.lock().expect("recording display lock poisoned").flash(flash);
    }

    fn clear(&mut self) {
        self.lock().expect("recording display lock poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_display_roundtrip() {
        let mut display = SharedDisplay::new();
        display.show(Screen::Done);
        assert_eq!(display.snapshot().screen, Screen::Done);

        display.clear();
        assert_eq!(display.snapshot().screen, Screen::Blank);
    }

    #[test]
    fn test_flash_expires() {
        let mut display = SharedDisplay::new();
        display.flash(Flash::Cancel);

        let frame = display.snapshot();
        let now = Instant::now();
        assert_eq!(frame.active_flash(now), Some(Flash::Cancel));
        assert_eq!(frame.active_flash(now + FLASH_DURATION * 2), None);
    }
}
