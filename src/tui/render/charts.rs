use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Paragraph};

use crate::ops::stats::DueBucket;
use crate::tui::app::App;

/// Category, priority and due-status bar charts side by side
pub fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.dashboard.is_empty() {
        let block = Block::bordered()
            .title(" Charts ")
            .border_style(Style::default().fg(app.theme.border).bg(bg));
        let msg = Line::from(Span::styled(
            "No tasks to show charts.",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(msg).block(block), area);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let dash = &app.dashboard;
    let by_category: Vec<(String, usize, Color)> = dash
        .by_category
        .iter()
        .map(|(c, n)| (c.clone(), *n, app.theme.cyan))
        .collect();
    render_bar_chart(frame, app, cols[0], " By category ", &by_category, "");

    let by_priority: Vec<(String, usize, Color)> = dash
        .by_priority
        .iter()
        .map(|(p, n)| (p.to_string(), *n, app.theme.priority_color(*p)))
        .collect();
    render_bar_chart(frame, app, cols[1], " By priority ", &by_priority, "");

    let by_due: Vec<(String, usize, Color)> = DueBucket::ALL
        .iter()
        .map(|&b| (b.to_string(), dash.due.get(b), app.theme.bucket_color(b)))
        .filter(|(_, n, _)| *n > 0)
        .collect();
    render_bar_chart(
        frame,
        app,
        cols[2],
        " Pending by due ",
        &by_due,
        "No pending tasks with due dates.",
    );
}

/// One horizontal bar per row; `empty_msg` stands in when there are no rows
fn render_bar_chart(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    rows: &[(String, usize, Color)],
    empty_msg: &str,
) {
    let bg = app.theme.background;
    let block = Block::bordered()
        .title(title.to_string())
        .border_style(Style::default().fg(app.theme.border).bg(bg));

    if rows.is_empty() {
        let msg = Span::styled(empty_msg.to_string(), Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(Paragraph::new(Line::from(msg)).block(block), area);
        return;
    }

    let bars: Vec<Bar> = rows
        .iter()
        .map(|(label, n, color)| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value(*n as u64)
                .text_value(n.to_string())
                .style(Style::default().fg(*color))
                .value_style(Style::default().fg(app.theme.background).bg(*color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .label_style(Style::default().fg(app.theme.text))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(90, 9, |frame, area| render_charts(frame, app, area))
    }

    #[test]
    fn empty_dashboard_shows_message() {
        let app = app_with_tasks(vec![]);
        let out = render(&app);
        assert!(out.contains("No tasks to show charts."));
        assert!(!out.contains("By category"));
    }

    #[test]
    fn three_charts_with_labels() {
        let app = sample_app();
        let out = render(&app);
        assert!(out.contains("By category"));
        assert!(out.contains("By priority"));
        assert!(out.contains("Pending by due"));
        assert!(out.contains("Home"));
        assert!(out.contains("Work"));
        assert!(out.contains("High"));
        assert!(out.contains("Overdue"));
        assert!(!out.contains("Due Soon"));
    }

    #[test]
    fn due_chart_without_dated_pending_tasks() {
        let app = app_with_tasks(vec![task(1, "a", "General", Priority::Low, None)]);
        let out = render(&app);
        assert!(out.contains("No pending tasks"));
    }
}
