//! Terminal rendering of the RGB indicator bar.
//!
//! Turns the active effect plus its age into one brightness/color per pixel.

use crate::config::{Rgb, INDICATOR_PIXELS};
use crate::indicator::IndicatorEffect;
use crate::ui::styles::border_style;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const SPINNER_STEP: Duration = Duration::from_millis(120);

fn scale(color: Rgb, brightness: f32) -> Color {
    let b = brightness.clamp(0.0, 1.0);
    Color::Rgb(
        (f32::from(color.0) * b) as u8,
        (f32::from(color.1) * b) as u8,
        (f32::from(color.2) * b) as u8,
    )
}

/// Triangle wave in [0, 1] over `period`, starting at 0.
fn breath_level(age: Duration, period: Duration) -> f32 {
    if period.is_zero() {
        return 1.0;
    }
    let phase = (age.as_secs_f32() / period.as_secs_f32()).fract();
    if phase < 0.5 {
        phase * 2.0
    } else {
        (1.0 - phase) * 2.0
    }
}

/// Lit pixel count for a decaying fill.
fn decay_lit(age: Duration, total: Duration, pixels: usize) -> usize {
    if total.is_zero() {
        return 0;
    }
    let remaining = 1.0 - (age.as_secs_f32() / total.as_secs_f32()).min(1.0);
    (remaining * pixels as f32).ceil() as usize
}

/// Per-pixel colors for the current effect at `now`.
pub fn pixel_colors(effect: IndicatorEffect, set_at: Instant, now: Instant) -> Vec<Color> {
    let age = now.duration_since(set_at);
    match effect {
        IndicatorEffect::Off => vec![Color::Rgb(20, 20, 20); INDICATOR_PIXELS],
        IndicatorEffect::Solid(color) => vec![scale(color, 1.0); INDICATOR_PIXELS],
        IndicatorEffect::Breath { color, period } => {
            let level = 0.15 + 0.85 * breath_level(age, period);
            vec![scale(color, level); INDICATOR_PIXELS]
        }
        IndicatorEffect::FillDecay { color, total } => {
            let lit = decay_lit(age, total, INDICATOR_PIXELS);
            (0..INDICATOR_PIXELS)
                .map(|i| {
                    if i < lit {
                        scale(color, 1.0)
                    } else {
                        Color::Rgb(20, 20, 20)
                    }
                })
                .collect()
        }
        IndicatorEffect::Spinner(color) => {
            let pos = (age.as_millis() / SPINNER_STEP.as_millis()) as usize % INDICATOR_PIXELS;
            (0..INDICATOR_PIXELS)
                .map(|i| {
                    if i == pos {
                        scale(color, 1.0)
                    } else {
                        scale(color, 0.1)
                    }
                })
                .collect()
        }
    }
}

/// Render the indicator bar into `area`.
pub fn render_led_pane(
    f: &mut Frame,
    area: Rect,
    effect: IndicatorEffect,
    set_at: Instant,
    now: Instant,
) {
    let spans: Vec<Span> = pixel_colors(effect, set_at, now)
        .into_iter()
        .map(|color| Span::styled("██", Style::default().fg(color)))
        .collect();
    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RED;

    #[test]
    fn test_breath_level_triangle() {
        let period = Duration::from_secs(4);
        assert_eq!(breath_level(Duration::ZERO, period), 0.0);
        assert!((breath_level(Duration::from_secs(1), period) - 0.5).abs() < 1e-6);
        assert!((breath_level(Duration::from_secs(2), period) - 1.0).abs() < 1e-6);
        assert!((breath_level(Duration::from_secs(3), period) - 0.5).abs() < 1e-6);
        // Wraps around.
        assert!(breath_level(Duration::from_secs(4), period) < 1e-6);
    }

    #[test]
    fn test_decay_lit_drains_linearly() {
        let total = Duration::from_secs(100);
        assert_eq!(decay_lit(Duration::ZERO, total, 16), 16);
        assert_eq!(decay_lit(Duration::from_secs(50), total, 16), 8);
        assert_eq!(decay_lit(Duration::from_secs(100), total, 16), 0);
        assert_eq!(decay_lit(Duration::from_secs(500), total, 16), 0);
    }

    #[test]
    fn test_fill_decay_pixels() {
        let set_at = Instant::now();
        let now = set_at + Duration::from_secs(50);
        let colors = pixel_colors(
            IndicatorEffect::FillDecay {
                color: RED,
                total: Duration::from_secs(100),
            },
            set_at,
            now,
        );
        assert_eq!(colors.len(), INDICATOR_PIXELS);
        assert_eq!(colors[0], Color::Rgb(255, 0, 0));
        assert_eq!(colors[15], Color::Rgb(20, 20, 20));
    }
}
