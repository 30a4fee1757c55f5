use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::state::{UiState, load_ui_state, write_ui_state};
use crate::io::workspace::{self, Workspace, WorkspaceError};
use crate::model::config::ThemeName;
use crate::model::task::{Priority, Task, TaskId};
use crate::ops::filter::{FilterCriteria, StatusFilter, apply_filters, category_options};
use crate::ops::quick_add::{edit_line, parse_quick_add, parse_quick_edit};
use crate::ops::stats::Dashboard;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search box (filters live)
    Search,
    /// Editing the description of `App::editing`
    Edit,
    /// Typing a quick-add line
    Add,
    /// Waiting for `y` before deleting every task
    ConfirmReset,
}

/// One-line feedback shown in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub error: bool,
}

/// Main application state
pub struct App {
    pub workspace: Workspace,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme_name: ThemeName,
    pub theme: Theme,
    pub criteria: FilterCriteria,
    pub today: NaiveDate,
    /// IDs of the tasks passing the current filters, in list order
    pub visible: Vec<TaskId>,
    pub dashboard: Dashboard,
    /// Cursor index into `visible`
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Task whose description is being edited (at most one)
    pub editing: Option<TaskId>,
    /// Text buffer for Edit and Add modes
    pub input_buffer: String,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(workspace: Workspace, state: UiState, today: NaiveDate) -> Self {
        let mut app = App {
            workspace,
            mode: Mode::Navigate,
            should_quit: false,
            theme_name: state.theme,
            theme: Theme::for_name(state.theme),
            criteria: state.criteria(),
            today,
            visible: Vec::new(),
            dashboard: Dashboard::default(),
            cursor: 0,
            scroll_offset: 0,
            editing: None,
            input_buffer: String::new(),
            status: None,
        };
        app.refresh();
        app
    }

    /// Recompute the filtered list and the dashboard from the task list
    pub fn refresh(&mut self) {
        self.dashboard = self.workspace.dashboard(self.today);
        self.visible = apply_filters(&self.workspace.tasks, &self.criteria)
            .iter()
            .map(|t| t.id)
            .collect();
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    /// Advance the calendar day; due statuses depend on it
    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.refresh();
        }
    }

    pub fn ui_state(&self) -> UiState {
        let mut state = UiState {
            theme: self.theme_name,
            ..Default::default()
        };
        state.set_criteria(&self.criteria);
        state
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.visible
            .iter()
            .filter_map(|id| self.workspace.find(*id).ok())
            .collect()
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible.get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let max = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }

    /// Keep the cursor row inside a viewport of `height` rows
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            error: false,
        });
    }

    fn set_error(&mut self, err: &WorkspaceError) {
        tracing::warn!(error = %err, "dashboard action failed");
        self.status = Some(StatusMessage {
            text: err.to_string(),
            error: true,
        });
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    pub fn cycle_category(&mut self) {
        let mut choices: Vec<Option<String>> = vec![None];
        choices.extend(category_options(&self.workspace.tasks).into_iter().map(Some));
        self.criteria.category = next_choice(&choices, &self.criteria.category);
        self.cursor = 0;
        self.refresh();
    }

    pub fn cycle_priority(&mut self) {
        let mut choices: Vec<Option<Priority>> = vec![None];
        choices.extend(Priority::ALL.iter().rev().copied().map(Some));
        self.criteria.priority = next_choice(&choices, &self.criteria.priority);
        self.cursor = 0;
        self.refresh();
    }

    pub fn cycle_status(&mut self) {
        self.criteria.status = next_choice(&StatusFilter::ALL, &self.criteria.status);
        self.cursor = 0;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.cursor = 0;
        self.refresh();
    }

    pub fn begin_search(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn search_push(&mut self, c: char) {
        self.criteria.search.push(c);
        self.cursor = 0;
        self.refresh();
    }

    pub fn search_pop(&mut self) {
        self.criteria.search.pop();
        self.cursor = 0;
        self.refresh();
    }

    /// Leave search mode; `keep` false drops the search text
    pub fn end_search(&mut self, keep: bool) {
        if !keep {
            self.criteria.search.clear();
            self.refresh();
        }
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Task actions
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        match self.workspace.toggle(id) {
            Ok(true) => self.set_status("Marked completed"),
            Ok(false) => self.set_status("Marked pending"),
            Err(e) => self.set_error(&e),
        }
        self.refresh();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        if self.editing == Some(id) {
            self.cancel_input();
        }
        match self.workspace.delete(id) {
            Ok(removed) => self.set_status(format!("Deleted: {}", removed.task)),
            Err(e) => self.set_error(&e),
        }
        self.refresh();
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let Ok(task) = self.workspace.find(id) else { return };
        self.input_buffer = edit_line(task);
        self.editing = Some(id);
        self.mode = Mode::Edit;
    }

    /// Save the edit line. Markers change category, priority, due date and
    /// notes; an invalid edit keeps the editor open.
    pub fn commit_edit(&mut self) {
        let Some(id) = self.editing else {
            self.cancel_input();
            return;
        };
        let parsed = match self.workspace.find(id) {
            Ok(task) => parse_quick_edit(&self.input_buffer, task),
            Err(e) => {
                self.set_error(&WorkspaceError::from(e));
                self.cancel_input();
                return;
            }
        };
        let saved = self.workspace.edit(id, parsed.edit).and_then(|()| match parsed.notes {
            Some(notes) => self.workspace.set_notes(id, notes),
            None => Ok(()),
        });
        match saved {
            Ok(()) => {
                self.set_status("Task updated");
                self.cancel_input();
            }
            Err(e) => self.set_error(&e),
        }
        self.refresh();
    }

    pub fn begin_add(&mut self) {
        self.input_buffer.clear();
        self.mode = Mode::Add;
    }

    /// Add the quick-add line as a task. An empty description keeps the
    /// prompt open.
    pub fn commit_add(&mut self) {
        let new = parse_quick_add(&self.input_buffer);
        match self.workspace.add(new) {
            Ok(id) => {
                self.set_status("Task added");
                self.cancel_input();
                self.refresh();
                if let Some(pos) = self.visible.iter().position(|v| *v == id) {
                    self.cursor = pos;
                }
            }
            Err(e) => self.set_error(&e),
        }
    }

    /// Drop any in-progress edit or add
    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.editing = None;
        self.mode = Mode::Navigate;
    }

    pub fn toggle_theme(&mut self) {
        self.theme_name = self.theme_name.toggled();
        self.theme = Theme::for_name(self.theme_name);
    }

    pub fn begin_reset(&mut self) {
        self.mode = Mode::ConfirmReset;
    }

    pub fn confirm_reset(&mut self) {
        self.mode = Mode::Navigate;
        match self.workspace.reset() {
            Ok(()) => self.set_status("All data has been reset!"),
            Err(e) => self.set_error(&e),
        }
        self.cursor = 0;
        self.scroll_offset = 0;
        self.refresh();
    }
}

/// The choice after `current`, wrapping; unknown values restart at the first
fn next_choice<T: Clone + PartialEq>(choices: &[T], current: &T) -> T {
    let next = choices
        .iter()
        .position(|c| c == current)
        .map_or(0, |i| (i + 1) % choices.len());
    choices[next].clone()
}

fn save_ui_state(app: &App) {
    if let Err(e) = write_ui_state(&app.workspace.dir, &app.ui_state()) {
        tracing::warn!(error = %e, "could not save dashboard state");
    }
}

/// Run the dashboard in `dir`, optionally on an explicit data file
pub fn run(dir: &Path, data_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::open(dir, data_file)?;
    let state = load_ui_state(dir, &ws.config);
    tracing::info!(path = %ws.store.path().display(), tasks = ws.tasks.len(), "dashboard opened");

    let mut app = App::new(ws, state, workspace::today());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        } else {
            app.set_today(workspace::today());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::model::task::NewTask;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
    }

    fn app_with(tmp: &TempDir, tasks: &[NewTask]) -> App {
        let mut ws = Workspace::open(tmp.path(), None).unwrap();
        for t in tasks {
            ws.add(t.clone()).unwrap();
        }
        App::new(ws, UiState::default(), today())
    }

    #[test]
    fn new_app_computes_visible_and_dashboard() {
        let tmp = TempDir::new().unwrap();
        let app = app_with(&tmp, &[NewTask::new("a"), NewTask::new("b")]);
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.dashboard.quick.total, 2);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn toggle_updates_store_and_dashboard() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("a")]);
        app.toggle_selected();
        assert!(app.workspace.tasks[0].completed);
        assert_eq!(app.dashboard.quick.completed, 1);
        let reloaded = Workspace::open(tmp.path(), None).unwrap();
        assert!(reloaded.tasks[0].completed);
    }

    #[test]
    fn status_filter_cycles_and_hides_completed() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("a"), NewTask::new("b")]);
        app.toggle_selected();
        app.cycle_status();
        assert_eq!(app.criteria.status, StatusFilter::Completed);
        assert_eq!(app.visible.len(), 1);
        app.cycle_status();
        assert_eq!(app.criteria.status, StatusFilter::Pending);
        assert_eq!(app.visible.len(), 1);
        app.cycle_status();
        assert_eq!(app.criteria.status, StatusFilter::All);
        assert_eq!(app.visible.len(), 2);
    }

    #[test]
    fn category_cycle_walks_sorted_options_then_all() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(
            &tmp,
            &[NewTask::new("a").category("Work"), NewTask::new("b").category("Home")],
        );
        app.cycle_category();
        assert_eq!(app.criteria.category.as_deref(), Some("Home"));
        app.cycle_category();
        assert_eq!(app.criteria.category.as_deref(), Some("Work"));
        app.cycle_category();
        assert_eq!(app.criteria.category, None);
    }

    #[test]
    fn stale_saved_category_restarts_cycle() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::open(tmp.path(), None).unwrap();
        let state = UiState {
            category: Some("Gone".into()),
            ..Default::default()
        };
        let mut app = App::new(ws, state, today());
        app.cycle_category();
        assert_eq!(app.criteria.category, None);
    }

    #[test]
    fn search_filters_live_and_escape_clears() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("Buy milk"), NewTask::new("Walk dog")]);
        app.begin_search();
        for c in "MILK".chars() {
            app.search_push(c);
        }
        assert_eq!(app.visible.len(), 1);
        app.end_search(false);
        assert_eq!(app.criteria.search, "");
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn empty_edit_is_rejected_and_editor_stays_open() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("Original")]);
        app.begin_edit();
        assert_eq!(app.input_buffer, "Original #General !medium");
        app.input_buffer = "   ".into();
        app.commit_edit();
        assert_eq!(app.mode, Mode::Edit);
        assert!(app.status.as_ref().unwrap().error);
        assert_eq!(app.workspace.tasks[0].task, "Original");

        app.input_buffer = "Renamed".into();
        app.commit_edit();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.editing, None);
        assert_eq!(app.workspace.tasks[0].task, "Renamed");
    }

    #[test]
    fn edit_line_markers_change_every_field() {
        let tmp = TempDir::new().unwrap();
        let due = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("Pay rent").category("Home").due(due)]);
        app.begin_edit();
        assert_eq!(app.input_buffer, "Pay rent #Home !medium @2025-05-20");

        app.input_buffer = "Pay rent early #Work !high @2025-05-18 // by transfer".into();
        app.commit_edit();
        assert_eq!(app.mode, Mode::Navigate);

        let reloaded = Workspace::open(tmp.path(), None).unwrap();
        let task = &reloaded.tasks[0];
        assert_eq!(task.task, "Pay rent early");
        assert_eq!(task.category, "Work");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date.as_deref(), Some("2025-05-18"));
        assert_eq!(task.notes, "by transfer");

        app.begin_edit();
        app.input_buffer = "Pay rent early @-".into();
        app.commit_edit();
        assert_eq!(app.workspace.tasks[0].due_date, None);
        assert_eq!(app.workspace.tasks[0].category, "Work");
        assert_eq!(app.workspace.tasks[0].notes, "by transfer");
    }

    #[test]
    fn description_edit_keeps_unparsable_due_date() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("Pay rent")]);
        app.workspace.tasks[0].due_date = Some("2025-13-40".into());
        app.workspace.save().unwrap();

        app.begin_edit();
        assert_eq!(app.input_buffer, "Pay rent #General !medium");
        app.input_buffer = "Pay the rent #General !medium".into();
        app.commit_edit();

        let reloaded = Workspace::open(tmp.path(), None).unwrap();
        assert_eq!(reloaded.tasks[0].task, "Pay the rent");
        assert_eq!(reloaded.tasks[0].due_date.as_deref(), Some("2025-13-40"));
    }

    #[test]
    fn quick_add_selects_new_task() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("first")]);
        app.begin_add();
        app.input_buffer = "second #Work !high // bring receipts".into();
        app.commit_add();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.cursor, 1);
        let added = &app.workspace.tasks[1];
        assert_eq!(added.category, "Work");
        assert_eq!(added.priority, Priority::High);
        assert_eq!(added.notes, "bring receipts");
    }

    #[test]
    fn delete_clamps_cursor() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("a"), NewTask::new("b")]);
        app.cursor_to_end();
        app.delete_selected();
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.status.as_ref().unwrap().text, "Deleted: b");
    }

    #[test]
    fn reset_clears_everything() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("a")]);
        app.begin_reset();
        app.confirm_reset();
        assert!(app.workspace.tasks.is_empty());
        assert!(!app.workspace.store.exists());
        assert!(app.dashboard.is_empty());
    }

    #[test]
    fn ui_state_carries_theme_and_filters() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(&tmp, &[NewTask::new("a")]);
        app.toggle_theme();
        app.cycle_priority();
        let state = app.ui_state();
        assert_eq!(state.theme, ThemeName::Dark);
        assert_eq!(state.priority, Some(Priority::High));
    }

    #[test]
    fn scroll_follows_cursor() {
        let tmp = TempDir::new().unwrap();
        let tasks: Vec<NewTask> = (0..10).map(|i| NewTask::new(format!("t{}", i))).collect();
        let mut app = app_with(&tmp, &tasks);
        app.cursor_to_end();
        app.scroll_to_cursor(4);
        assert_eq!(app.scroll_offset, 6);
        app.cursor = 2;
        app.scroll_to_cursor(4);
        assert_eq!(app.scroll_offset, 2);
    }
}
