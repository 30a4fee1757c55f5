use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};

use crate::tui::app::App;

/// Quick stats above a completion gauge
pub fn render_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let border = Style::default().fg(app.theme.border).bg(bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let quick = &app.dashboard.quick;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let row = |name: &'static str, text: String, style: Style| {
        Line::from(vec![Span::styled(format!(" {:<12}", name), label), Span::styled(text, style)])
    };

    let overdue_style = if quick.overdue > 0 {
        value.fg(app.theme.red)
    } else {
        value
    };
    let mut lines = vec![
        row("Total", quick.total.to_string(), value),
        row(
            "Completed",
            format!("{} ({}%)", quick.completed, quick.completed_percent),
            value,
        ),
        row("Pending", (quick.total - quick.completed).to_string(), value),
        row("Overdue", quick.overdue.to_string(), overdue_style),
    ];
    if app.dashboard.due.undated > 0 {
        lines.push(row("No due date", app.dashboard.due.undated.to_string(), label));
    }

    let stats = Paragraph::new(lines).block(Block::bordered().title(" Overview ").border_style(border));
    frame.render_widget(stats, chunks[0]);

    let completion = Block::bordered().title(" Completion ").border_style(border);
    match app.dashboard.completion_rate {
        Some(rate) => {
            let gauge = Gauge::default()
                .block(completion)
                .gauge_style(Style::default().fg(app.theme.green).bg(app.theme.selection_bg))
                .percent(rate.round().clamp(0.0, 100.0) as u16)
                .label(format!("{:.1}%", rate));
            frame.render_widget(gauge, chunks[1]);
        }
        // No rate without tasks
        None => {
            let placeholder = Paragraph::new(Line::from(Span::styled(" No tasks yet", label))).block(completion);
            frame.render_widget(placeholder, chunks[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(28, 12, |frame, area| render_side_panel(frame, app, area))
    }

    #[test]
    fn shows_quick_stats_and_rate() {
        let app = sample_app();
        let out = render(&app);
        assert!(out.contains("Total       3"));
        assert!(out.contains("Completed   1 (33%)"));
        assert!(out.contains("Pending     2"));
        assert!(out.contains("Overdue     1"));
        assert!(out.contains("33.3%"));
    }

    #[test]
    fn empty_list_has_no_completion_rate() {
        let app = app_with_tasks(vec![]);
        let out = render(&app);
        assert!(out.contains("Total       0"));
        assert!(out.contains("No tasks yet"));
        assert!(!out.contains("0.0%"));
        assert!(!out.contains("No due date"));
    }
}
