//! Fixed parameters of the dial: timeouts, bounds, steps, colors.
//!
//! Durations that drive state timeouts are expressed as `std::time::Duration`
//! constants so states can compare against `ctx.now` directly.

use std::time::Duration;

// --- Timer defaults (minutes) ---
pub const DEFAULT_TIMER_MIN: u32 = 25;
pub const MIN_TIMER_MIN: u32 = 5;
pub const MAX_TIMER_MIN: u32 = 240;
pub const ADJUST_STEP_MIN: u32 = 5;

// --- Per-task duration selection (minutes) ---
pub const DURATION_STEP_MIN: u32 = 5;
pub const DURATION_MIN_MIN: u32 = 5;
pub const DURATION_MAX_MIN: u32 = 120;

// --- State timeouts ---
pub const SPLASH_DURATION: Duration = Duration::from_secs(2);
pub const CHANGE_TIMEOUT: Duration = Duration::from_secs(15);
pub const SLEEP_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const PAUSE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const TASK_LIST_TIMEOUT: Duration = Duration::from_secs(30);
pub const TASK_VIEW_TIMEOUT: Duration = Duration::from_secs(15);
pub const TASK_DETAIL_TIMEOUT: Duration = Duration::from_secs(30);
pub const DURATION_SELECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const RESTART_DELAY: Duration = Duration::from_secs(1);

// --- Browsing ---
/// Rows visible at once in task/project lists before the window scrolls.
pub const TASK_PAGE_SIZE: usize = 4;

// --- Outbound events ---
/// Bounded queue between the core and the delivery thread. When full the
/// newest payload is dropped and logged, never blocking the driver loop.
pub const EVENT_QUEUE_CAPACITY: usize = 5;

// --- Indicator ---
pub const INDICATOR_PIXELS: usize = 16;

/// RGB color for the indicator bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(0x00, 0x00, 0xFF);
pub const AMBER: Rgb = Rgb(0xFF, 0xBF, 0x00);
pub const RED: Rgb = Rgb(0xFF, 0x00, 0x00);
pub const GREEN: Rgb = Rgb(0x00, 0xFF, 0x00);
pub const YELLOW: Rgb = Rgb(0xFF, 0xFF, 0x00);
pub const MAGENTA: Rgb = Rgb(0xFF, 0x00, 0xFF);
pub const TEAL: Rgb = Rgb(0x00, 0x80, 0x80);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bounds_ordering() {
        assert!(MIN_TIMER_MIN < DEFAULT_TIMER_MIN);
        assert!(DEFAULT_TIMER_MIN < MAX_TIMER_MIN);
        assert!(DURATION_MIN_MIN <= DEFAULT_TIMER_MIN);
        assert!(DEFAULT_TIMER_MIN <= DURATION_MAX_MIN);
    }

    #[test]
    fn test_view_timeout_shorter_than_list_timeout() {
        assert!(TASK_VIEW_TIMEOUT < TASK_LIST_TIMEOUT);
    }
}
