use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::io::config_io::{self, ConfigError};
use crate::io::store::{StoreError, TaskStore};
use crate::model::config::AppConfig;
use crate::model::task::{NewTask, Task, TaskEdit, TaskId};
use crate::ops::stats::Dashboard;
use crate::ops::task_ops::{self, TaskError};

/// Error type for workspace operations
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// The in-memory task list plus the file it syncs to.
///
/// Every mutating method runs the list transformation first and saves the
/// whole list afterwards. A rejected mutation never reaches the store.
#[derive(Debug)]
pub struct Workspace {
    pub dir: PathBuf,
    pub config: AppConfig,
    pub store: TaskStore,
    pub tasks: Vec<Task>,
}

impl Workspace {
    /// Open the workspace in `dir`: read todo.toml, then load the data file
    /// (`data_file` overrides the configured path).
    pub fn open(dir: &Path, data_file: Option<&Path>) -> Result<Self, WorkspaceError> {
        let config = config_io::read_config(dir)?;
        let path = match data_file {
            Some(p) => dir.join(p),
            None => dir.join(&config.data_file),
        };
        let store = TaskStore::new(path);
        let tasks = store.load();
        Ok(Workspace {
            dir: dir.to_path_buf(),
            config,
            store,
            tasks,
        })
    }

    /// Build a workspace around an explicit store, skipping config lookup
    pub fn with_store(dir: &Path, config: AppConfig, store: TaskStore) -> Self {
        let tasks = store.load();
        Workspace {
            dir: dir.to_path_buf(),
            config,
            store,
            tasks,
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.tasks)
    }

    /// Re-read the list from disk, dropping in-memory state
    pub fn reload(&mut self) {
        self.tasks = self.store.load();
    }

    pub fn find(&self, id: TaskId) -> Result<&Task, TaskError> {
        task_ops::find_task(&self.tasks, id).ok_or(TaskError::NotFound(id))
    }

    pub fn add(&mut self, new: NewTask) -> Result<TaskId, WorkspaceError> {
        let id = task_ops::add_task(&mut self.tasks, new, now())?;
        self.save()?;
        tracing::info!(task_id = id, "task added");
        Ok(id)
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<bool, WorkspaceError> {
        let completed = task_ops::toggle_complete(&mut self.tasks, id)?;
        self.save()?;
        tracing::info!(task_id = id, completed, "task toggled");
        Ok(completed)
    }

    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<bool, WorkspaceError> {
        let changed = task_ops::set_completed(&mut self.tasks, id, completed)?;
        if changed {
            self.save()?;
            tracing::info!(task_id = id, completed, "task completion set");
        }
        Ok(changed)
    }

    pub fn edit(&mut self, id: TaskId, edit: TaskEdit) -> Result<(), WorkspaceError> {
        task_ops::edit_task(&mut self.tasks, id, edit)?;
        self.save()?;
        tracing::info!(task_id = id, "task edited");
        Ok(())
    }

    pub fn set_notes(&mut self, id: TaskId, notes: String) -> Result<(), WorkspaceError> {
        task_ops::set_notes(&mut self.tasks, id, notes)?;
        self.save()?;
        tracing::info!(task_id = id, "task notes updated");
        Ok(())
    }

    pub fn delete(&mut self, id: TaskId) -> Result<Task, WorkspaceError> {
        let removed = task_ops::delete_task(&mut self.tasks, id)?;
        self.save()?;
        tracing::info!(task_id = id, "task deleted");
        Ok(removed)
    }

    /// Delete the data file and clear the list
    pub fn reset(&mut self) -> Result<(), WorkspaceError> {
        self.store.reset()?;
        self.tasks.clear();
        tracing::info!(path = %self.store.path().display(), "all tasks reset");
        Ok(())
    }

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        Dashboard::compute(&self.tasks, today, self.config.dashboard.due_soon_days)
    }
}

/// Local time, truncated to whole seconds (the stored precision)
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
