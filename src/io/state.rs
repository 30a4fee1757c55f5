use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::store::{atomic_write, to_pretty_json};
use crate::model::config::{AppConfig, ThemeName};
use crate::model::task::Priority;
use crate::ops::filter::{FilterCriteria, StatusFilter};

/// File name for persisted dashboard state
pub const STATE_FILE: &str = ".todo_state.json";

/// Persisted dashboard state (written to .todo_state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UiState {
    #[serde(default)]
    pub theme: ThemeName,
    /// Last search text
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: StatusFilter,
}

impl UiState {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            category: self.category.clone(),
            priority: self.priority,
            status: self.status,
        }
    }

    pub fn set_criteria(&mut self, criteria: &FilterCriteria) {
        self.search = criteria.search.clone();
        self.category = criteria.category.clone();
        self.priority = criteria.priority;
        self.status = criteria.status;
    }
}

/// Read .todo_state.json from the working directory
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let path = dir.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Saved state, or a fresh one seeded with the configured theme
pub fn load_ui_state(dir: &Path, config: &AppConfig) -> UiState {
    read_ui_state(dir).unwrap_or_else(|| UiState {
        theme: config.ui.theme,
        ..Default::default()
    })
}

/// Write .todo_state.json to the working directory
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), io::Error> {
    let path = dir.join(STATE_FILE);
    let content = to_pretty_json(state)?;
    atomic_write(&path, content.as_bytes())
}
