pub mod charts;
pub mod filter_bar;
pub mod side_panel;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use unicode_width::UnicodeWidthChar;

use super::app::App;

/// Width of the right-hand overview column
const SIDE_W: u16 = 28;
/// Height of the chart strip
const CHARTS_H: u16 = 9;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background).fg(app.theme.text);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: filter bar (2 rows) | list + overview | charts | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(CHARTS_H),
            Constraint::Length(1),
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_W)])
        .split(chunks[1]);

    filter_bar::render_filter_bar(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, middle[0]);
    side_panel::render_side_panel(frame, app, middle[1]);
    charts::render_charts(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}

/// Cut `s` to at most `max` display columns, marking the cut with an ellipsis
pub(super) fn truncate_to_width(s: &str, max: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_helpers::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("milk", 10), "milk");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_to_width("Buy oat milk", 6), "Buy o\u{2026}");
        assert_eq!(truncate_to_width("日本語", 4), "日\u{2026}");
    }

    #[test]
    fn full_layout_with_tasks() {
        let mut app = sample_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.contains("Todo Tracker"));
        assert!(out.contains("Buy milk"));
        assert!(out.contains("Overview"));
        assert!(out.contains("By category"));
        assert!(!out.contains("No tasks to show charts."));
    }

    #[test]
    fn full_layout_when_empty() {
        let mut app = app_with_tasks(vec![]);
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.contains("No tasks yet."));
        assert!(out.contains("No tasks to show charts."));
    }
}
