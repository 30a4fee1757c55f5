use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// `y` confirms the reset, any other key cancels
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
        _ => app.mode = Mode::Navigate,
    }
}
