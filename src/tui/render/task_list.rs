use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::task::Task;
use crate::ops::due::due_status;
use crate::tui::app::App;

use super::truncate_to_width;

/// Render the filtered task list with the cursor row highlighted
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let title = format!(" Tasks ({}/{}) ", app.visible.len(), app.workspace.tasks.len());
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.workspace.tasks.is_empty() || app.visible.is_empty() {
        let msg = if app.workspace.tasks.is_empty() {
            "No tasks yet. Press 'a' to add one."
        } else {
            "No tasks match your filters."
        };
        let line = Line::from(Span::styled(msg, Style::default().fg(app.theme.dim).bg(bg)));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let height = inner.height as usize;
    app.scroll_to_cursor(height);

    let width = inner.width as usize;
    let lines: Vec<Line> = app
        .visible_tasks()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, task)| task_row(app, task, i == app.cursor, width))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn task_row<'a>(app: &App, task: &Task, selected: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let bg = if selected { theme.selection_bg } else { theme.background };
    let base = Style::default().bg(bg);

    let checkbox = if task.completed { "[x] " } else { "[ ] " };

    // Right-hand meta: category, priority, due status
    let mut meta: Vec<Span<'a>> = vec![
        Span::styled(format!("  {}", task.category), base.fg(theme.cyan)),
        Span::styled(
            format!("  {} {}", task.priority.marker(), task.priority),
            base.fg(theme.priority_color(task.priority)),
        ),
    ];
    if let Some(status) = due_status(task, app.today) {
        let color = if status.is_overdue() && !task.completed {
            theme.red
        } else {
            theme.dim
        };
        meta.push(Span::styled(format!("  {}", status), base.fg(color)));
    }
    let meta_w: usize = meta.iter().map(|s| s.width()).sum();

    let editing = app.editing == Some(task.id);
    let text_w = width.saturating_sub(checkbox.len() + meta_w + 1);
    let (text, text_style) = if editing {
        let shown = tail_to_width(&app.input_buffer, text_w.saturating_sub(1));
        (
            format!("{}\u{258C}", shown),
            base.fg(theme.text_bright).add_modifier(Modifier::UNDERLINED),
        )
    } else if task.completed {
        (
            truncate_to_width(&task.task, text_w),
            base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        let fg = if selected { theme.text_bright } else { theme.text };
        (truncate_to_width(&task.task, text_w), base.fg(fg))
    };

    let used = checkbox.len() + UnicodeWidthStr::width(text.as_str()) + meta_w;
    let pad = width.saturating_sub(used);

    let check_fg = if task.completed { theme.green } else { theme.text };
    let mut spans = vec![
        Span::styled(checkbox, base.fg(check_fg)),
        Span::styled(text, text_style),
        Span::styled(" ".repeat(pad), base),
    ];
    // Meta is dropped on very narrow panes
    if checkbox.len() + meta_w < width {
        spans.extend(meta);
    }
    Line::from(spans)
}

/// Keep the end of `s` so the edit cursor stays visible
fn tail_to_width(s: &str, max: usize) -> String {
    let mut out: Vec<char> = Vec::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.into_iter().rev().collect()
}
