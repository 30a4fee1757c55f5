use std::io;

use crate::model::task::Task;

/// Column order of the CSV export
pub const CSV_HEADERS: [&str; 8] = [
    "id",
    "task",
    "category",
    "priority",
    "due_date",
    "notes",
    "completed",
    "created_at",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv export failed: {0}")]
    Io(#[from] io::Error),
}

/// Write `tasks` as CSV with a header row, one row per task
pub fn write_csv<W: io::Write>(tasks: &[Task], out: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADERS)?;
    for task in tasks {
        wtr.write_record([
            task.id.to_string(),
            task.task.clone(),
            task.category.clone(),
            task.priority.to_string(),
            task.due_date.clone().unwrap_or_default(),
            task.notes.clone(),
            task.completed.to_string(),
            task.created_at_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV export as a string
pub fn to_csv_string(tasks: &[Task]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(tasks, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
