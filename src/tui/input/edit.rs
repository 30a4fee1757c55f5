use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Single-line text entry shared by Edit and Add modes
pub(super) fn handle_text_input(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_input(),
        (_, KeyCode::Enter) => match app.mode {
            Mode::Edit => app.commit_edit(),
            Mode::Add => app.commit_add(),
            _ => {}
        },
        (_, KeyCode::Backspace) => {
            app.input_buffer.pop();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.input_buffer.clear(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.input_buffer.push(c),
        _ => {}
    }
}
