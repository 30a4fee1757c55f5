use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => app.cursor_to_end(),
        (_, KeyCode::PageDown) => app.move_cursor(10),
        (_, KeyCode::PageUp) => app.move_cursor(-10),

        // Task actions
        (_, KeyCode::Char(' ') | KeyCode::Enter) => app.toggle_selected(),
        (_, KeyCode::Char('d') | KeyCode::Delete) => app.delete_selected(),
        (_, KeyCode::Char('e')) => app.begin_edit(),
        (_, KeyCode::Char('a')) => app.begin_add(),

        // Filters
        (_, KeyCode::Char('/')) => app.begin_search(),
        (_, KeyCode::Char('c')) => app.cycle_category(),
        (_, KeyCode::Char('p')) => app.cycle_priority(),
        (_, KeyCode::Char('s')) => app.cycle_status(),
        (_, KeyCode::Char('x') | KeyCode::Esc) => app.clear_filters(),

        // Settings
        (_, KeyCode::Char('t')) => app.toggle_theme(),
        (_, KeyCode::Char('R')) => app.begin_reset(),

        _ => {}
    }
}
