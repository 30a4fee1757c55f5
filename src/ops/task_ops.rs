use chrono::NaiveDateTime;

use crate::model::task::{DueChange, NewTask, Task, TaskEdit, TaskId};

/// Error type for task operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task description is required")]
    EmptyDescription,
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_task(tasks: &[Task], id: TaskId) -> Option<&Task> {
    tasks.iter().find(|t| t.id == id)
}

pub fn find_task_mut(tasks: &mut [Task], id: TaskId) -> Option<&mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}

/// Next id: the creation time in seconds, bumped past any id already in
/// the list so two adds in the same second never collide.
pub fn next_id(tasks: &[Task], now: NaiveDateTime) -> TaskId {
    let time_id = now.and_utc().timestamp().max(0) as TaskId;
    let after_max = tasks.iter().map(|t| t.id).max().map_or(0, |m| m + 1);
    time_id.max(after_max)
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Append a new task. Validation runs before the list is touched.
/// Returns the assigned ID.
pub fn add_task(tasks: &mut Vec<Task>, new: NewTask, now: NaiveDateTime) -> Result<TaskId, TaskError> {
    let description = validate_description(&new.task)?;
    let id = next_id(tasks, now);

    let mut task = Task {
        id,
        task: description,
        category: normalize_category(&new.category),
        priority: new.priority,
        due_date: None,
        notes: new.notes,
        completed: false,
        created_at: now,
    };
    task.set_due_date(new.due_date);
    tasks.push(task);
    Ok(id)
}

/// Flip the completion flag. Returns the new value.
pub fn toggle_complete(tasks: &mut [Task], id: TaskId) -> Result<bool, TaskError> {
    let task = find_task_mut(tasks, id).ok_or(TaskError::NotFound(id))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

/// Set the completion flag. Returns whether it changed.
pub fn set_completed(tasks: &mut [Task], id: TaskId, completed: bool) -> Result<bool, TaskError> {
    let task = find_task_mut(tasks, id).ok_or(TaskError::NotFound(id))?;
    let changed = task.completed != completed;
    task.completed = completed;
    Ok(changed)
}

/// Replace description, category, priority and due date in place.
/// `id`, `created_at`, `completed` and `notes` are untouched.
pub fn edit_task(tasks: &mut [Task], id: TaskId, edit: TaskEdit) -> Result<(), TaskError> {
    let description = validate_description(&edit.task)?;
    let task = find_task_mut(tasks, id).ok_or(TaskError::NotFound(id))?;
    task.task = description;
    task.category = normalize_category(&edit.category);
    task.priority = edit.priority;
    match edit.due {
        DueChange::Keep => {}
        DueChange::Set(due) => task.set_due_date(Some(due)),
        DueChange::Clear => task.set_due_date(None),
    }
    Ok(())
}

pub fn set_notes(tasks: &mut [Task], id: TaskId, notes: String) -> Result<(), TaskError> {
    let task = find_task_mut(tasks, id).ok_or(TaskError::NotFound(id))?;
    task.notes = notes;
    Ok(())
}

/// Remove a task, returning it. A missing ID is `NotFound` and the list
/// is left as it was.
pub fn delete_task(tasks: &mut Vec<Task>, id: TaskId) -> Result<Task, TaskError> {
    let idx = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))?;
    Ok(tasks.remove(idx))
}

fn validate_description(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        crate::model::task::DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}
