pub mod keybindings;
pub mod led_pane;
pub mod screen_pane;
pub mod styles;

use crate::display::DisplayFrame;
use crate::indicator::IndicatorEffect;
use keybindings::render_keybindings;
use led_pane::render_led_pane;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use screen_pane::{render_flash, render_screen};
use std::time::Instant;

/// Everything the renderer needs for one frame.
pub struct ViewModel {
    pub frame: DisplayFrame,
    pub effect: IndicatorEffect,
    pub effect_set_at: Instant,
    pub now: Instant,
}

/// Main render function - draws the front panel
pub fn render(f: &mut Frame, view: &ViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.size());

    render_screen(f, chunks[0], &view.frame.screen);
    if let Some(flash) = view.frame.active_flash(view.now) {
        render_flash(f, chunks[0], flash);
    }
    render_led_pane(f, chunks[1], view.effect, view.effect_set_at, view.now);
    render_keybindings(f, chunks[2]);
}
