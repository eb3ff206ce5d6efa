use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the key hint bar mapping keys onto the dial's two controls.
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::styled(
        " ←/→ rotate | space click | d double-click | l long-press | q quit ",
        hint_style(),
    );
    f.render_widget(Paragraph::new(hints), area);
}
