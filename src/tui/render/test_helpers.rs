use std::path::PathBuf;

use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::state::UiState;
use crate::io::store::TaskStore;
use crate::io::workspace::Workspace;
use crate::model::config::AppConfig;
use crate::model::task::{Priority, Task, test_timestamp};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// The date every render test treats as today.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
}

pub fn task(id: u64, text: &str, category: &str, priority: Priority, due: Option<&str>) -> Task {
    Task {
        id,
        task: text.into(),
        category: category.into(),
        priority,
        due_date: due.map(String::from),
        notes: String::new(),
        completed: false,
        created_at: test_timestamp(),
    }
}

/// An App over an in-memory list. Rendering never touches the store path.
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let dir = PathBuf::from("/tmp/todo-render-test");
    let ws = Workspace {
        store: TaskStore::new(dir.join("todo_data.json")),
        dir,
        config: AppConfig::default(),
        tasks,
    };
    App::new(ws, UiState::default(), today())
}

/// Three tasks across two categories: one overdue, one done, one undated.
pub fn sample_app() -> App {
    let mut done = task(3, "Read book", "Home", Priority::Low, None);
    done.completed = true;
    app_with_tasks(vec![
        task(1, "Buy milk", "Home", Priority::High, Some("2025-05-13")),
        task(2, "Write report", "Work", Priority::Medium, Some("2025-05-20")),
        done,
    ])
}
