use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::filter::StatusFilter;
use crate::tui::app::App;

const TITLE: &str = " Todo Tracker";

/// Title plus the active filter values, then a separator line
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text_bright).bg(bg);
    let unset = Style::default().fg(app.theme.text).bg(bg);

    let mut filters: Vec<Span> = Vec::new();
    let mut push = |name: &'static str, text: String, active: bool| {
        filters.push(Span::styled(format!("{}:", name), label));
        filters.push(Span::styled(
            format!("{}  ", text),
            if active { value.add_modifier(Modifier::BOLD) } else { unset },
        ));
    };
    if !app.criteria.search.is_empty() {
        push("search", app.criteria.search.clone(), true);
    }
    push(
        "category",
        app.criteria.category.clone().unwrap_or_else(|| "All".into()),
        app.criteria.category.is_some(),
    );
    push(
        "priority",
        app.criteria.priority.map_or("All".to_string(), |p| p.to_string()),
        app.criteria.priority.is_some(),
    );
    push(
        "status",
        app.criteria.status.to_string(),
        app.criteria.status != StatusFilter::All,
    );

    let mut spans = vec![Span::styled(
        TITLE,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let title_w = TITLE.chars().count();
    let filters_w: usize = filters.iter().map(|s| s.content.chars().count()).sum();
    // Filters right-aligned; dropped when they don't fit
    if title_w + filters_w + 1 <= width {
        spans.push(Span::styled(
            " ".repeat(width - title_w - filters_w),
            Style::default().bg(bg),
        ));
        spans.extend(filters);
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.border).bg(bg),
    ));
    frame.render_widget(Paragraph::new(vec![Line::from(spans), separator]), area);
}
