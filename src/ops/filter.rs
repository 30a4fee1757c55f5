use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::task::{Priority, Task};

/// Completion-status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Completed, StatusFilter::Pending];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" | "done" => Ok(StatusFilter::Completed),
            "pending" | "open" => Ok(StatusFilter::Pending),
            _ => Err(format!(
                "unknown status '{}' (expected: all, completed, pending)",
                s
            )),
        }
    }
}

/// Search text plus the three dropdown filters. `Default` filters nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the description; empty = no-op
    pub search: String,
    /// `None` = "All"
    pub category: Option<String>,
    /// `None` = "All"
    pub priority: Option<Priority>,
    pub status: StatusFilter,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        *self != FilterCriteria::default()
    }
}

/// Result of filtering, keeping "nothing stored" apart from "nothing matched"
#[derive(Debug, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    NoTasks,
    NoMatches,
    Matches(Vec<&'a Task>),
}

impl<'a> FilterOutcome<'a> {
    pub fn of(tasks: &'a [Task], criteria: &FilterCriteria) -> Self {
        if tasks.is_empty() {
            return FilterOutcome::NoTasks;
        }
        let matches = apply_filters(tasks, criteria);
        if matches.is_empty() {
            FilterOutcome::NoMatches
        } else {
            FilterOutcome::Matches(matches)
        }
    }
}

/// Apply search, category, priority and status filters in that order.
/// Each stage only narrows; list order is preserved.
pub fn apply_filters<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().collect();

    let needle = criteria.search.to_lowercase();
    if !needle.is_empty() {
        visible.retain(|t| t.task.to_lowercase().contains(&needle));
    }
    if let Some(category) = criteria.category.as_deref() {
        visible.retain(|t| t.category == category);
    }
    if let Some(priority) = criteria.priority {
        visible.retain(|t| t.priority == priority);
    }
    if criteria.status != StatusFilter::All {
        visible.retain(|t| criteria.status.matches(t));
    }

    visible
}

/// Sorted distinct categories across all tasks
pub fn category_options(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|t| t.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
