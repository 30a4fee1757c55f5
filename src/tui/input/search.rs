use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Search filters as you type; Enter keeps the text, Esc drops it
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.end_search(false),
        (_, KeyCode::Enter) => app.end_search(true),
        (_, KeyCode::Backspace) => app.search_pop(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.search_push(c),
        _ => {}
    }
}
