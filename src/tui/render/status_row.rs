use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

const NAVIGATE_HINT: &str = "a add  e edit  \u{2423} toggle  d del  / search  c/p/s filter  t theme  q quit";

const EDIT_HINT: &str = "@- clear due  // notes  Enter save  Esc cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor = Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg));

    let (mut spans, hint): (Vec<Span>, &str) = match app.mode {
        Mode::Navigate => match app.status {
            Some(ref msg) => (vec![message_span(app, &msg.text, msg.error)], ""),
            None => (Vec::new(), NAVIGATE_HINT),
        },
        Mode::Search => (
            // Search prompt: /pattern▌
            vec![
                Span::styled(format!("/{}", app.criteria.search), bright),
                cursor,
            ],
            "Enter keep  Esc clear",
        ),
        Mode::Edit => match app.status {
            Some(ref msg) => (vec![message_span(app, &msg.text, msg.error)], EDIT_HINT),
            None => (vec![Span::styled("-- EDIT --", dim)], EDIT_HINT),
        },
        Mode::Add => {
            let mut spans = vec![
                Span::styled("add: ", dim),
                Span::styled(app.input_buffer.clone(), bright),
                cursor,
            ];
            if let Some(ref msg) = app.status {
                spans.push(Span::styled("  ", dim));
                spans.push(message_span(app, &msg.text, msg.error));
            }
            (spans, "#category !priority @YYYY-MM-DD // notes")
        }
        Mode::ConfirmReset => (
            vec![Span::styled(
                "Delete ALL tasks? y to confirm, any other key cancels",
                Style::default()
                    .fg(app.theme.red)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )],
            "",
        ),
    };

    // Right-aligned hint, dropped when it doesn't fit
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn message_span<'a>(app: &App, text: &str, error: bool) -> Span<'a> {
    let fg = if error { app.theme.red } else { app.theme.green };
    Span::styled(text.to_string(), Style::default().fg(fg).bg(app.theme.background))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::StatusMessage;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_key_hints() {
        let app = sample_app();
        assert!(render(&app).contains("q quit"));
    }

    #[test]
    fn status_message_replaces_hints() {
        let mut app = sample_app();
        app.status = Some(StatusMessage {
            text: "Deleted: Buy milk".into(),
            error: false,
        });
        let out = render(&app);
        assert_eq!(out, "Deleted: Buy milk");
    }

    #[test]
    fn search_prompt_with_cursor() {
        let mut app = sample_app();
        app.begin_search();
        app.search_push('m');
        let out = render(&app);
        assert!(out.starts_with("/m\u{258C}"));
        assert!(out.ends_with("Enter keep  Esc clear"));
    }

    #[test]
    fn add_prompt_shows_buffer_and_syntax() {
        let mut app = sample_app();
        app.begin_add();
        app.input_buffer = "Call mom".into();
        let out = render(&app);
        assert!(out.starts_with("add: Call mom\u{258C}"));
        assert!(out.contains("@YYYY-MM-DD"));
    }

    #[test]
    fn edit_prompt_lists_clear_and_notes_markers() {
        let mut app = sample_app();
        app.begin_edit();
        let out = render(&app);
        assert!(out.starts_with("-- EDIT --"));
        assert!(out.ends_with("@- clear due  // notes  Enter save  Esc cancel"));
    }

    #[test]
    fn reset_asks_for_confirmation() {
        let mut app = sample_app();
        app.begin_reset();
        assert!(render(&app).contains("Delete ALL tasks?"));
    }
}
