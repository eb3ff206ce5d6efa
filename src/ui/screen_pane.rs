//! Terminal rendering of the dial's screen variants.

use crate::display::{Flash, ListRow, Screen};
use crate::ui::styles::{
    accent_style, border_style, default_style, dim_style, flash_style, paused_style,
    selected_style, timer_style, title_style, warning_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Format whole seconds as `MM:SS` (hours fold into minutes, firmware-style).
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", title), title_style()))
}

fn centered(f: &mut Frame, area: Rect, block: Block, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}

fn pad(area: Rect, lines: usize) -> Vec<Line<'static>> {
    let content_height = area.height.saturating_sub(2) as usize;
    let padding = content_height.saturating_sub(lines) / 2;
    vec![Line::raw(""); padding]
}

/// Render the current screen into `area`.
pub fn render_screen(f: &mut Frame, area: Rect, screen: &Screen) {
    match screen {
        Screen::Splash => {
            let mut lines = pad(area, 2);
            lines.push(Line::styled("FOCUS DIAL", title_style()));
            lines.push(Line::styled("starting up", dim_style()));
            centered(f, area, pane_block("focusdial"), lines);
        }
        Screen::Idle {
            duration_min,
            wifi_connected,
        } => {
            let mut lines = pad(area, 3);
            lines.push(Line::styled(format!("{} min", duration_min), timer_style()));
            lines.push(Line::styled("click to focus", dim_style()));
            lines.push(Line::styled(
                if *wifi_connected { "wifi ok" } else { "wifi off" },
                if *wifi_connected {
                    accent_style()
                } else {
                    warning_style()
                },
            ));
            centered(f, area, pane_block("idle"), lines);
        }
        Screen::Adjust { duration_min } => {
            let mut lines = pad(area, 2);
            lines.push(Line::styled(format!("{} min", duration_min), timer_style()));
            lines.push(Line::styled("rotate to adjust, click to save", dim_style()));
            centered(f, area, pane_block("default duration"), lines);
        }
        Screen::DurationSelect {
            task_name,
            duration_min,
        } => {
            let mut lines = pad(area, 3);
            lines.push(Line::styled(task_name.clone(), default_style()));
            lines.push(Line::styled(format!("{} min", duration_min), timer_style()));
            lines.push(Line::styled(
                "click start | double detail | hold cancel",
                dim_style(),
            ));
            centered(f, area, pane_block("session length"), lines);
        }
        Screen::TaskList(list) => render_task_list(f, area, list),
        Screen::TaskDetail {
            project_name,
            task_name,
            rows,
            cursor,
            total,
        } => {
            let title = if project_name.is_empty() {
                task_name.clone()
            } else {
                format!("{} / {}", project_name, task_name)
            };
            let items = list_items(rows);
            let list = List::new(items).block(pane_block(&title));
            f.render_widget(list, area);
            render_count_footer(f, area, cursor.index + 1, *total);
        }
        Screen::Timer {
            remaining_secs,
            task_name,
        } => {
            let mut lines = pad(area, 3);
            lines.push(Line::styled(format_clock(*remaining_secs), timer_style()));
            if !task_name.is_empty() {
                lines.push(Line::styled(task_name.clone(), default_style()));
            }
            lines.push(Line::styled("click pause | double cancel", dim_style()));
            centered(f, area, pane_block("focus"), lines);
        }
        Screen::Paused {
            remaining_secs,
            task_name,
        } => {
            let mut lines = pad(area, 3);
            lines.push(Line::styled(format_clock(*remaining_secs), paused_style()));
            if !task_name.is_empty() {
                lines.push(Line::styled(task_name.clone(), default_style()));
            }
            lines.push(Line::styled("PAUSED - click to resume", paused_style()));
            centered(f, area, pane_block("paused"), lines);
        }
        Screen::Done => {
            let mut lines = pad(area, 2);
            lines.push(Line::styled("SESSION DONE", accent_style()));
            lines.push(Line::styled("click for idle", dim_style()));
            centered(f, area, pane_block("done"), lines);
        }
        Screen::TaskCompletePrompt {
            task_name,
            mark_done_selected,
            canceled,
        } => {
            let mut lines = pad(area, 4);
            lines.push(Line::styled(
                if *canceled { "session canceled" } else { "session complete" },
                if *canceled { warning_style() } else { accent_style() },
            ));
            lines.push(Line::styled(task_name.clone(), default_style()));
            lines.push(Line::raw("mark task done?"));
            lines.push(Line::from(vec![
                Span::styled(
                    " YES ",
                    if *mark_done_selected {
                        selected_style()
                    } else {
                        dim_style()
                    },
                ),
                Span::raw("  "),
                Span::styled(
                    " NO ",
                    if *mark_done_selected {
                        dim_style()
                    } else {
                        selected_style()
                    },
                ),
            ]));
            centered(f, area, pane_block("task complete"), lines);
        }
        Screen::Provision => {
            let mut lines = pad(area, 2);
            lines.push(Line::styled("PAIRING MODE", title_style()));
            lines.push(Line::styled("waiting for network setup", dim_style()));
            centered(f, area, pane_block("provision"), lines);
        }
        Screen::Reset { confirm_selected } => {
            let mut lines = pad(area, 3);
            lines.push(Line::styled("erase credentials and restart?", warning_style()));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled(
                    " CANCEL ",
                    if *confirm_selected {
                        dim_style()
                    } else {
                        selected_style()
                    },
                ),
                Span::raw("  "),
                Span::styled(
                    " RESET ",
                    if *confirm_selected {
                        selected_style()
                    } else {
                        dim_style()
                    },
                ),
            ]));
            centered(f, area, pane_block("factory reset"), lines);
        }
        Screen::Blank => {
            f.render_widget(pane_block("sleep"), area);
        }
    }
}

fn render_task_list(f: &mut Frame, area: Rect, list: &crate::display::ListScreen) {
    let title = if list.read_only {
        format!("{} (viewing)", list.mode.label())
    } else {
        list.mode.label().to_string()
    };

    if list.total == 0 {
        let mut lines = pad(area, 2);
        lines.push(Line::styled("nothing here", dim_style()));
        lines.push(Line::styled("double-click to switch lists", dim_style()));
        centered(f, area, pane_block(&title), lines);
        return;
    }

    let items = list_items(&list.rows);
    let widget = List::new(items).block(pane_block(&title));
    f.render_widget(widget, area);
    render_count_footer(f, area, list.cursor.index + 1, list.total);
}

fn list_items(rows: &[ListRow]) -> Vec<ListItem<'static>> {
    rows.iter()
        .map(|row| {
            let marker = if row.selected { "> " } else { "  " };
            let style = if row.selected {
                selected_style()
            } else {
                default_style()
            };
            let mut spans = vec![Span::styled(format!("{}{}", marker, row.title), style)];
            if !row.detail.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(row.detail.clone(), dim_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect()
}

/// "n/total" in the bottom-right corner of a list pane.
fn render_count_footer(f: &mut Frame, area: Rect, position: usize, total: usize) {
    let text = format!(" {}/{} ", position, total);
    let width = text.len() as u16;
    if area.width <= width + 2 || area.height < 2 {
        return;
    }
    let corner = Rect {
        x: area.x + area.width - width - 2,
        y: area.y + area.height - 1,
        width,
        height: 1,
    };
    f.render_widget(Paragraph::new(Line::styled(text, dim_style())), corner);
}

/// Render a transition flash over the middle of the screen area.
pub fn render_flash(f: &mut Frame, area: Rect, flash: Flash) {
    let caption = flash.caption();
    let width = (caption.len() as u16 + 6).min(area.width);
    let height = 3u16.min(area.height);
    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    f.render_widget(Clear, overlay);
    let paragraph = Paragraph::new(Line::styled(caption, flash_style()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(flash_style()));
    f.render_widget(paragraph, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3 * 3600), "180:00");
    }
}
