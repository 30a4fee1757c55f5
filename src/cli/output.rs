use chrono::NaiveDate;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::model::task::{Priority, Task, TaskId};
use crate::ops::due::due_status;
use crate::ops::stats::{DueBucket, Dashboard};

/// Width of the widest text bar in `stats`
const BAR_WIDTH: usize = 30;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: TaskId,
    pub task: String,
    pub category: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub completed: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_status: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    /// Size of the unfiltered list
    pub total: usize,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct CountJson {
    pub label: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub completion_rate: Option<f64>,
    pub by_category: Vec<CountJson>,
    pub by_priority: Vec<CountJson>,
    pub pending_by_due_status: Vec<CountJson>,
    pub undated_pending: usize,
    pub total: usize,
    pub completed: usize,
    pub completed_percent: u32,
    pub overdue: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task, today: NaiveDate) -> TaskJson {
    TaskJson {
        id: task.id,
        task: task.task.clone(),
        category: task.category.clone(),
        priority: task.priority,
        due_date: task.due_date.clone(),
        notes: task.notes.clone(),
        completed: task.completed,
        created_at: task.created_at_str(),
        due_status: due_status(task, today).map(|s| s.to_string()),
    }
}

pub fn stats_to_json(dash: &Dashboard) -> StatsJson {
    StatsJson {
        completion_rate: dash.completion_rate,
        by_category: dash
            .by_category
            .iter()
            .map(|(label, count)| CountJson {
                label: label.clone(),
                count: *count,
            })
            .collect(),
        by_priority: dash
            .by_priority
            .iter()
            .map(|(p, count)| CountJson {
                label: p.to_string(),
                count: *count,
            })
            .collect(),
        pending_by_due_status: DueBucket::ALL
            .iter()
            .map(|&b| CountJson {
                label: b.to_string(),
                count: dash.due.get(b),
            })
            .collect(),
        undated_pending: dash.due.undated,
        total: dash.quick.total,
        completed: dash.quick.completed,
        completed_percent: dash.quick.completed_percent,
        overdue: dash.quick.overdue,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(task: &Task) -> &'static str {
    if task.completed { "[x]" } else { "[ ]" }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let mut line = format!(
        "{} {} {} | {} | {} {}",
        checkbox(task),
        task.id,
        task.task,
        task.category,
        task.priority.marker(),
        task.priority
    );
    if let Some(status) = due_status(task, today) {
        line.push_str(&format!(" | {}", status));
    }
    line
}

/// Format detailed task view
pub fn format_task_detail(task: &Task, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", checkbox(task), task.task),
        format!("id: {}", task.id),
        format!("category: {}", task.category),
        format!("priority: {}", task.priority),
    ];

    match (task.due_date.as_deref(), due_status(task, today)) {
        (Some(raw), Some(status)) => lines.push(format!("due: {} ({})", raw, status)),
        (Some(raw), None) => lines.push(format!("due: {} (unreadable)", raw)),
        (None, _) => {}
    }
    lines.push(format!("created: {}", task.created_at_str()));

    if !task.notes.is_empty() {
        lines.push("notes:".to_string());
        for line in task.notes.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

/// Render labelled counts as aligned text bars
pub fn format_bar_chart(rows: &[(String, usize)]) -> Vec<String> {
    let label_w = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, n)| *n).max().unwrap_or(0);
    rows.iter()
        .map(|(label, n)| {
            let bar_len = if max == 0 { 0 } else { (n * BAR_WIDTH).div_ceil(max) };
            let pad = label_w - label.width();
            format!(
                " {}{}  {} {}",
                label,
                " ".repeat(pad),
                "#".repeat(bar_len),
                n
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// The stats report: completion rate, charts, quick stats
pub fn format_stats(dash: &Dashboard) -> Vec<String> {
    let mut lines = Vec::new();
    if dash.is_empty() {
        lines.push("No tasks yet. Add some tasks to see statistics.".to_string());
        return lines;
    }

    if let Some(rate) = dash.completion_rate {
        lines.push(format!("Completion rate: {:.1}%", rate));
    }
    lines.push(format!(
        "Total: {}  Completed: {} ({}%)",
        dash.quick.total, dash.quick.completed, dash.quick.completed_percent
    ));
    if dash.quick.overdue > 0 {
        lines.push(format!("Overdue: {} {}", dash.quick.overdue, plural_tasks(dash.quick.overdue)));
    }

    lines.push(String::new());
    lines.push("Tasks by category".to_string());
    lines.extend(format_bar_chart(&dash.by_category));

    lines.push(String::new());
    lines.push("Tasks by priority".to_string());
    let priority_rows: Vec<(String, usize)> = dash
        .by_priority
        .iter()
        .map(|(p, n)| (p.to_string(), *n))
        .collect();
    lines.extend(format_bar_chart(&priority_rows));

    if dash.due.bucketed() > 0 {
        lines.push(String::new());
        lines.push("Pending tasks by due status".to_string());
        let due_rows: Vec<(String, usize)> = DueBucket::ALL
            .iter()
            .map(|&b| (b.to_string(), dash.due.get(b)))
            .filter(|(_, n)| *n > 0)
            .collect();
        lines.extend(format_bar_chart(&due_rows));
    }
    lines
}

fn plural_tasks(n: usize) -> &'static str {
    if n == 1 { "task" } else { "tasks" }
}
