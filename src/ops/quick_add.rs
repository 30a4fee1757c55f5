use chrono::NaiveDate;

use crate::model::task::{DATE_FORMAT, DueChange, NewTask, Priority, Task, TaskEdit};

/// Everything after a standalone `//` is the task's notes
pub const NOTES_MARKER: &str = "//";

/// `@-` clears the due date on an edit
const CLEAR_DUE: &str = "-";

/// Fields read from a one-line entry. `None` and `DueChange::Keep` mean the
/// line didn't mention that field.
#[derive(Debug, Default)]
struct Markers {
    task: String,
    category: Option<String>,
    priority: Option<Priority>,
    due: DueChange,
    notes: Option<String>,
}

impl Markers {
    fn parse(input: &str) -> Self {
        let (head, notes) = split_notes(input);
        let mut markers = Markers {
            notes: notes.map(str::to_string),
            ..Default::default()
        };

        // Markers are read from the end, one of each kind, so a `#12` in the
        // description itself survives a round trip through `edit_line`.
        let mut words: Vec<&str> = head.split_whitespace().collect();
        while let Some(token) = words.last().copied() {
            if !markers.take(token) {
                break;
            }
            words.pop();
        }
        markers.task = words.join(" ");
        markers
    }

    /// Apply `token` if it is a marker for a field not yet set
    fn take(&mut self, token: &str) -> bool {
        if let Some(category) = token.strip_prefix('#') {
            if category.is_empty() || self.category.is_some() {
                return false;
            }
            self.category = Some(category.to_string());
        } else if let Some(priority) = token.strip_prefix('!') {
            match priority.parse::<Priority>() {
                Ok(p) if self.priority.is_none() => self.priority = Some(p),
                _ => return false,
            }
        } else if let Some(due) = token.strip_prefix('@') {
            if self.due != DueChange::Keep {
                return false;
            }
            self.due = if due == CLEAR_DUE {
                DueChange::Clear
            } else {
                match NaiveDate::parse_from_str(due, DATE_FORMAT) {
                    Ok(date) => DueChange::Set(date),
                    Err(_) => return false,
                }
            };
        } else {
            return false;
        }
        true
    }
}

/// Split at the first standalone `//`. `http://` and the like don't count.
fn split_notes(input: &str) -> (&str, Option<&str>) {
    let mut from = 0;
    while let Some(pos) = input[from..].find(NOTES_MARKER) {
        let start = from + pos;
        let end = start + NOTES_MARKER.len();
        let before = input[..start].chars().next_back().is_none_or(char::is_whitespace);
        let after = input[end..].chars().next().is_none_or(char::is_whitespace);
        if before && after {
            return (&input[..start], Some(input[end..].trim()));
        }
        from = end;
    }
    (input, None)
}

/// Parse one-line quick-add input into a new task.
///
/// Trailing `#Work`, `!high` and `@2025-06-01` tokens set the category,
/// priority and due date; `// text` sets the notes. Tokens that don't parse
/// stay in the description.
pub fn parse_quick_add(input: &str) -> NewTask {
    let markers = Markers::parse(input);
    let mut new = NewTask::new(markers.task);
    if let Some(category) = markers.category {
        new.category = category;
    }
    if let Some(priority) = markers.priority {
        new.priority = priority;
    }
    if let DueChange::Set(due) = markers.due {
        new.due_date = Some(due);
    }
    if let Some(notes) = markers.notes {
        new.notes = notes;
    }
    new
}

/// An edit read from the dashboard's edit line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickEdit {
    pub edit: TaskEdit,
    /// Replacement notes, when the line has a `//` marker
    pub notes: Option<String>,
}

/// Parse an edit line against the task being edited. Fields without a
/// marker keep their current value; `@-` clears the due date.
pub fn parse_quick_edit(input: &str, current: &Task) -> QuickEdit {
    let markers = Markers::parse(input);
    let mut edit = TaskEdit::from_task(current);
    edit.task = markers.task;
    if let Some(category) = markers.category {
        edit.category = category;
    }
    if let Some(priority) = markers.priority {
        edit.priority = priority;
    }
    edit.due = markers.due;
    QuickEdit {
        edit,
        notes: markers.notes,
    }
}

/// The edit line a task starts from. Values that can't be written as a
/// marker (a category with spaces, an unparsable date, multi-line notes) are
/// left out and so kept as they are.
pub fn edit_line(task: &Task) -> String {
    let mut line = task.task.clone();
    if !task.category.is_empty() && !task.category.contains(char::is_whitespace) {
        line.push_str(&format!(" #{}", task.category));
    }
    line.push_str(&format!(" !{}", task.priority.as_str().to_ascii_lowercase()));
    if let Some(due) = task.due_date() {
        line.push_str(&format!(" @{}", due.format(DATE_FORMAT)));
    }
    if !task.notes.is_empty() && !task.notes.contains('\n') {
        line.push_str(&format!(" {} {}", NOTES_MARKER, task.notes));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::test_timestamp;

    fn stored(text: &str) -> Task {
        Task {
            id: 1,
            task: text.into(),
            category: "Home".into(),
            priority: Priority::High,
            due_date: Some("2025-06-01".into()),
            notes: String::new(),
            completed: false,
            created_at: test_timestamp(),
        }
    }

    #[test]
    fn plain_text_uses_defaults() {
        let new = parse_quick_add("  Buy   milk ");
        assert_eq!(new, NewTask::new("Buy milk"));
    }

    #[test]
    fn markers_set_fields() {
        let new = parse_quick_add("Pay rent #Home !high @2025-06-01");
        assert_eq!(new.task, "Pay rent");
        assert_eq!(new.category, "Home");
        assert_eq!(new.priority, Priority::High);
        assert_eq!(new.due_date, NaiveDate::from_ymd_opt(2025, 6, 1));
    }

    #[test]
    fn unparsable_markers_stay_in_description() {
        let new = parse_quick_add("Fix it !now @tomorrow #");
        assert_eq!(new.task, "Fix it !now @tomorrow #");
        assert_eq!(new.priority, Priority::Medium);
        assert_eq!(new.due_date, None);
    }

    #[test]
    fn markers_only_leave_empty_description() {
        assert_eq!(parse_quick_add("#Work !low").task, "");
    }

    #[test]
    fn markers_are_read_from_the_end() {
        let new = parse_quick_add("Fix #12 before #Work");
        assert_eq!(new.task, "Fix #12 before");
        assert_eq!(new.category, "Work");

        let new = parse_quick_add("Fix #12 #Work");
        assert_eq!(new.task, "Fix #12");
        assert_eq!(new.category, "Work");
    }

    #[test]
    fn notes_follow_the_marker() {
        let new = parse_quick_add("Call bank #Home // ask about http://example.com fees");
        assert_eq!(new.task, "Call bank");
        assert_eq!(new.category, "Home");
        assert_eq!(new.notes, "ask about http://example.com fees");

        let url_only = parse_quick_add("Read https://example.com");
        assert_eq!(url_only.task, "Read https://example.com");
        assert_eq!(url_only.notes, "");
    }

    #[test]
    fn edit_line_round_trips_unchanged() {
        let mut task = stored("Pay rent");
        task.notes = "landlord prefers transfer".into();
        let line = edit_line(&task);
        assert_eq!(line, "Pay rent #Home !high @2025-06-01 // landlord prefers transfer");

        let parsed = parse_quick_edit(&line, &task);
        assert_eq!(parsed.edit.task, "Pay rent");
        assert_eq!(parsed.edit.category, "Home");
        assert_eq!(parsed.edit.priority, Priority::High);
        assert_eq!(parsed.edit.due, DueChange::Set(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert_eq!(parsed.notes.as_deref(), Some("landlord prefers transfer"));
    }

    #[test]
    fn edit_without_markers_keeps_fields() {
        let task = stored("Pay rent");
        let parsed = parse_quick_edit("Pay the rent", &task);
        assert_eq!(parsed.edit.task, "Pay the rent");
        assert_eq!(parsed.edit.category, "Home");
        assert_eq!(parsed.edit.priority, Priority::High);
        assert_eq!(parsed.edit.due, DueChange::Keep);
        assert_eq!(parsed.notes, None);
    }

    #[test]
    fn edit_markers_change_and_clear() {
        let task = stored("Pay rent");
        let parsed = parse_quick_edit("Pay rent #Work !low @-", &task);
        assert_eq!(parsed.edit.category, "Work");
        assert_eq!(parsed.edit.priority, Priority::Low);
        assert_eq!(parsed.edit.due, DueChange::Clear);

        let cleared_notes = parse_quick_edit("Pay rent //", &task);
        assert_eq!(cleared_notes.notes.as_deref(), Some(""));
    }

    #[test]
    fn edit_line_leaves_out_values_markers_cannot_hold() {
        let mut task = stored("Plan trip");
        task.category = "Home Office".into();
        task.due_date = Some("2025-13-40".into());
        task.notes = "line one\nline two".into();
        assert_eq!(edit_line(&task), "Plan trip !high");

        let parsed = parse_quick_edit(&edit_line(&task), &task);
        assert_eq!(parsed.edit.category, "Home Office");
        assert_eq!(parsed.edit.due, DueChange::Keep);
        assert_eq!(parsed.notes, None);
    }
}
