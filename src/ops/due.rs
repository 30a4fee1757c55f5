use std::fmt;

use chrono::NaiveDate;

use crate::model::task::Task;

/// Where a task's due date sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue { days: i64 },
    DueToday,
    Upcoming { days: i64 },
}

impl DueStatus {
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        let left = days_left(due, today);
        if left < 0 {
            DueStatus::Overdue { days: -left }
        } else if left == 0 {
            DueStatus::DueToday
        } else {
            DueStatus::Upcoming { days: left }
        }
    }

    pub fn is_overdue(self) -> bool {
        matches!(self, DueStatus::Overdue { .. })
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DueStatus::Overdue { days } => write!(f, "Overdue by {} {}", days, plural_days(days)),
            DueStatus::DueToday => f.write_str("Due Today"),
            DueStatus::Upcoming { days } => write!(f, "{} {} left", days, plural_days(days)),
        }
    }
}

fn plural_days(n: i64) -> &'static str {
    if n == 1 { "day" } else { "days" }
}

/// Whole calendar days from `today` until `due` (negative when past)
pub fn days_left(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Status for a task, or `None` when it has no usable due date
pub fn due_status(task: &Task, today: NaiveDate) -> Option<DueStatus> {
    task.due_date().map(|due| DueStatus::classify(due, today))
}
