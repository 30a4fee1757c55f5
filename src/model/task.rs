use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Unique task identifier, time-derived at creation
pub type TaskId = u64;

/// Date format used for `due_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used for `created_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "General";

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Single-character marker shown in listings
    pub fn marker(self) -> char {
        match self {
            Priority::Low => '.',
            Priority::Medium => '!',
            Priority::High => '*',
        }
    }
}

/// Reads any casing (`"high"`, `"HIGH"`); always written as `"High"`
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "unknown priority '{}' (expected: low, medium, high)",
                s
            )),
        }
    }
}

/// A single to-do item as stored in the data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Description text
    pub task: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    /// Raw `YYYY-MM-DD` string; kept unparsed so a bad value never
    /// poisons the whole file. See [`Task::due_date`].
    #[serde(default, with = "blank_as_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Parsed due date. Missing and malformed dates are both `None`; the
    /// store warns about malformed ones once, at load.
    pub fn due_date(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?;
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::trace!(task_id = self.id, due_date = raw, error = %e, "unparsable due date");
                None
            }
        }
    }

    /// Store a due date in canonical form, or clear it
    pub fn set_due_date(&mut self, due: Option<NaiveDate>) {
        self.due_date = due.map(|d| d.format(DATE_FORMAT).to_string());
    }

    pub fn created_at_str(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Fields collected by the add form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

impl NewTask {
    pub fn new(task: impl Into<String>) -> Self {
        NewTask {
            task: task.into(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::default(),
            due_date: None,
            notes: String::new(),
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// What an edit does to the stored due date. `Keep` leaves the raw value
/// alone, even one that doesn't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueChange {
    #[default]
    Keep,
    Set(NaiveDate),
    Clear,
}

/// Replacement values applied by an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub task: String,
    pub category: String,
    pub priority: Priority,
    pub due: DueChange,
}

impl TaskEdit {
    /// Start from the task's current values, like a pre-filled form
    pub fn from_task(task: &Task) -> Self {
        TaskEdit {
            task: task.task.clone(),
            category: task.category.clone(),
            priority: task.priority,
            due: DueChange::Keep,
        }
    }
}

/// Fixed timestamp for tests
#[cfg(test)]
pub(crate) fn test_timestamp() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-05-01 09:30:00", TIMESTAMP_FORMAT).unwrap()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// `""` and `null` both read as "no due date"; `None` writes back as `""`.
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.trim().is_empty()))
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
