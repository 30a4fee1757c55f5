use std::cell::Cell;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::model::task::Task;

/// Error type for task store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not back up unreadable {path} before saving: {source}")]
    BackupError { path: PathBuf, source: io::Error },
    #[error("could not remove {path}: {source}")]
    RemoveError { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// The JSON file holding the task list
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    /// Set when the last load found a file it couldn't parse. The next save
    /// copies that file to `backup_path()` first.
    needs_backup: Cell<bool>,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TaskStore {
            path: path.into(),
            needs_backup: Cell::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file>.bak`, where an unparsable file is kept before it is overwritten
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the task list. A missing, unreadable or malformed file reads as
    /// an empty list. A malformed file is backed up on the next save.
    pub fn load(&self) -> Vec<Task> {
        self.needs_backup.set(false);
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no task file yet");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read task file, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => {
                tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
                for task in tasks.iter().filter(|t| t.due_date.is_some() && t.due_date().is_none()) {
                    tracing::warn!(
                        task_id = task.id,
                        due_date = task.due_date.as_deref().unwrap_or_default(),
                        "unparsable due date, task left out of due statistics"
                    );
                }
                tasks
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed task file, starting empty");
                self.needs_backup.set(true);
                Vec::new()
            }
        }
    }

    /// Replace the whole file with `tasks`
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = to_pretty_json(tasks)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;
        }
        if self.needs_backup.get() {
            self.back_up()?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn back_up(&self) -> Result<(), StoreError> {
        let backup = self.backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    "kept a copy of the unreadable task file"
                );
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StoreError::BackupError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        }
        self.needs_backup.set(false);
        Ok(())
    }

    /// Delete the file. Already absent is fine.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.needs_backup.set(false);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::RemoveError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Four-space indented JSON with a trailing newline
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write to a temp file next to `path`, then rename over it
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    use crate::model::task::{Priority, TIMESTAMP_FORMAT};

    fn task(id: u64, text: &str) -> Task {
        Task {
            id,
            task: text.into(),
            category: "General".into(),
            priority: Priority::Medium,
            due_date: Some("2025-06-01".into()),
            notes: String::new(),
            completed: false,
            created_at: NaiveDateTime::parse_from_str("2025-05-01 12:00:00", TIMESTAMP_FORMAT)
                .unwrap(),
        }
    }

    #[test]
    fn load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        assert!(store.load().is_empty());
        assert!(!store.exists());
    }

    #[test]
    fn load_malformed_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo_data.json");
        fs::write(&path, "not json {{{").unwrap();
        assert!(TaskStore::new(&path).load().is_empty());
    }

    #[test]
    fn load_wrong_shape_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo_data.json");
        fs::write(&path, r#"{"tasks": []}"#).unwrap();
        assert!(TaskStore::new(&path).load().is_empty());
    }

    #[test]
    fn unparsable_file_is_backed_up_before_first_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo_data.json");
        let original = r#"[{"id": 1, "task": "keep me", "created_at": "yesterday"}]"#;
        fs::write(&path, original).unwrap();
        let store = TaskStore::new(&path);

        assert!(store.load().is_empty());
        store.save(&[task(2, "New")]).unwrap();
        assert_eq!(fs::read_to_string(store.backup_path()).unwrap(), original);
        assert_eq!(store.backup_path(), tmp.path().join("todo_data.json.bak"));

        // Later saves leave the backup alone
        store.save(&[task(3, "Newer")]).unwrap();
        assert_eq!(fs::read_to_string(store.backup_path()).unwrap(), original);
    }

    #[test]
    fn readable_file_is_not_backed_up() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        store.save(&[task(1, "First")]).unwrap();
        store.load();
        store.save(&[task(2, "Second")]).unwrap();
        assert!(!store.backup_path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        let mut second = task(2, "Second");
        second.completed = true;
        second.due_date = None;
        let tasks = vec![task(1, "First"), second];

        store.save(&tasks).unwrap();
        assert_eq!(store.load(), tasks);
    }

    #[test]
    fn load_then_save_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        store.save(&[task(1, "First"), task(2, "Second")]).unwrap();
        let first_bytes = fs::read(store.path()).unwrap();

        let loaded = store.load();
        store.save(&loaded).unwrap();
        assert_eq!(fs::read(store.path()).unwrap(), first_bytes);
    }

    #[test]
    fn save_replaces_whole_file() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        store.save(&[task(1, "First"), task(2, "Second")]).unwrap();
        store.save(&[task(3, "Third")]).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("nested/dir/tasks.json"));
        store.save(&[task(1, "First")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn empty_list_saves_as_empty_array() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        store.save(&[]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]\n");
    }

    #[test]
    fn reset_removes_file_and_tolerates_absence() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().join("todo_data.json"));
        store.save(&[task(1, "First")]).unwrap();
        store.reset().unwrap();
        assert!(!store.exists());
        store.reset().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let out = to_pretty_json(&vec![1, 2]).unwrap();
        assert_eq!(out, "[\n    1,\n    2\n]\n");
    }
}
