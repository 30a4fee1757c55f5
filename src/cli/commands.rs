use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::config::ThemeName;
use crate::model::task::{Priority, TaskId};
use crate::ops::filter::StatusFilter;

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - personal task tracker"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different working directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,

    /// Data file to use instead of the configured one
    #[arg(long, global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Show task details
    Show(IdArg),
    /// Edit a task's description, category, priority or due date
    Edit(EditArgs),
    /// Replace a task's notes
    Notes(NotesArgs),
    /// Flip a task between completed and pending
    Toggle(IdArg),
    /// Mark a task completed
    Done(IdArg),
    /// Mark a task pending
    Undone(IdArg),
    /// Permanently delete a task
    Delete(IdArg),
    /// Show completion statistics and charts
    Stats,
    /// Export all tasks as CSV
    Export(ExportArgs),
    /// Delete all tasks
    Reset(ResetArgs),
    /// Show or set the dashboard theme
    Theme(ThemeArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks whose description contains this text (case-insensitive)
    #[arg(long, short)]
    pub search: Option<String>,
    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,
    /// Filter by priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Filter by status (all, completed, pending)
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,
}

#[derive(Args)]
pub struct IdArg {
    /// Task ID
    pub id: TaskId,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// What needs to be done
    pub task: String,
    /// Category label
    #[arg(long, default_value = "General")]
    pub category: String,
    /// Priority (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
    /// Additional details
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: TaskId,
    /// New description
    #[arg(long)]
    pub task: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
    /// New priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<Priority>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Args)]
pub struct NotesArgs {
    /// Task ID
    pub id: TaskId,
    /// Notes text (replaces existing notes)
    pub text: String,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm permanent deletion of all tasks
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to switch to (light, dark); omit to show the current one
    pub theme: Option<ThemeName>,
}
