use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Priority, Task};
use crate::ops::due::days_left;

/// Pending-task due-status bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DueBucket {
    Overdue,
    #[serde(rename = "Due Soon")]
    DueSoon,
    Future,
}

impl DueBucket {
    pub const ALL: [DueBucket; 3] = [DueBucket::Overdue, DueBucket::DueSoon, DueBucket::Future];

    pub fn for_days_left(days: i64, soon_days: i64) -> Self {
        if days < 0 {
            DueBucket::Overdue
        } else if days <= soon_days {
            DueBucket::DueSoon
        } else {
            DueBucket::Future
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DueBucket::Overdue => "Overdue",
            DueBucket::DueSoon => "Due Soon",
            DueBucket::Future => "Future",
        }
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts of incomplete tasks per bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DueBuckets {
    pub overdue: usize,
    pub due_soon: usize,
    pub future: usize,
    /// Pending tasks with no usable due date (in no bucket)
    pub undated: usize,
}

impl DueBuckets {
    pub fn get(&self, bucket: DueBucket) -> usize {
        match bucket {
            DueBucket::Overdue => self.overdue,
            DueBucket::DueSoon => self.due_soon,
            DueBucket::Future => self.future,
        }
    }

    /// Total of the three buckets
    pub fn bucketed(&self) -> usize {
        self.overdue + self.due_soon + self.future
    }
}

/// The quick-stats panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub total: usize,
    pub completed: usize,
    /// Whole percent, 0 for an empty list
    pub completed_percent: u32,
    /// Incomplete tasks due before today
    pub overdue: usize,
}

/// Everything the dashboard shows, derived from the current list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    /// `None` when there are no tasks
    pub completion_rate: Option<f64>,
    pub by_category: Vec<(String, usize)>,
    pub by_priority: Vec<(Priority, usize)>,
    pub due: DueBuckets,
    pub quick: QuickStats,
}

impl Dashboard {
    pub fn compute(tasks: &[Task], today: NaiveDate, soon_days: i64) -> Self {
        Dashboard {
            completion_rate: completion_rate(tasks),
            by_category: category_counts(tasks),
            by_priority: priority_counts(tasks),
            due: due_buckets(tasks, today, soon_days),
            quick: quick_stats(tasks, today),
        }
    }

    /// No tasks at all; charts show a placeholder
    pub fn is_empty(&self) -> bool {
        self.quick.total == 0
    }
}

/// Percentage of completed tasks; `None` for an empty list
pub fn completion_rate(tasks: &[Task]) -> Option<f64> {
    if tasks.is_empty() {
        return None;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    Some(done as f64 / tasks.len() as f64 * 100.0)
}

/// Tasks per category, most frequent first, ties by name
pub fn category_counts(tasks: &[Task]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        *counts.entry(task.category.as_str()).or_default() += 1;
    }
    let mut result: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(category, n)| (category.to_string(), n))
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    result
}

/// Tasks per priority, most frequent first, ties High before Low.
/// Priorities with no tasks are left out.
pub fn priority_counts(tasks: &[Task]) -> Vec<(Priority, usize)> {
    let mut result: Vec<(Priority, usize)> = Priority::ALL
        .iter()
        .map(|&p| (p, tasks.iter().filter(|t| t.priority == p).count()))
        .filter(|&(_, n)| n > 0)
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    result
}

/// Bucket incomplete tasks by days until due
pub fn due_buckets(tasks: &[Task], today: NaiveDate, soon_days: i64) -> DueBuckets {
    let mut buckets = DueBuckets::default();
    for task in tasks.iter().filter(|t| !t.completed) {
        let Some(due) = task.due_date() else {
            buckets.undated += 1;
            continue;
        };
        match DueBucket::for_days_left(days_left(due, today), soon_days) {
            DueBucket::Overdue => buckets.overdue += 1,
            DueBucket::DueSoon => buckets.due_soon += 1,
            DueBucket::Future => buckets.future += 1,
        }
    }
    buckets
}

pub fn quick_stats(tasks: &[Task], today: NaiveDate) -> QuickStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let completed_percent = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };
    let overdue = tasks
        .iter()
        .filter(|t| !t.completed)
        .filter_map(|t| t.due_date())
        .filter(|due| *due < today)
        .count();
    QuickStats {
        total,
        completed,
        completed_percent,
        overdue,
    }
}
