use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::export;
use crate::io::config_io::read_config;
use crate::io::state::{load_ui_state, write_ui_state};
use crate::io::workspace::{self, Workspace};
use crate::model::task::{DueChange, NewTask, TaskEdit};
use crate::ops::filter::{FilterCriteria, FilterOutcome};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Where a command runs: working directory plus optional data file override
pub struct Context {
    pub dir: PathBuf,
    pub file: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = match cli.dir {
            Some(ref dir) => std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
            None => std::env::current_dir()?,
        };
        Ok(Context {
            dir,
            file: cli.file.as_ref().map(PathBuf::from),
            json: cli.json,
        })
    }

    fn open(&self) -> Result<Workspace, Box<dyn std::error::Error>> {
        Ok(Workspace::open(&self.dir, self.file.as_deref())?)
    }
}

pub fn dispatch(ctx: &Context, cmd: Commands) -> CmdResult {
    match cmd {
        // Read commands
        Commands::List(args) => cmd_list(ctx, args),
        Commands::Show(args) => cmd_show(ctx, args),
        Commands::Stats => cmd_stats(ctx),
        Commands::Export(args) => cmd_export(ctx, args),

        // Write commands
        Commands::Add(args) => cmd_add(ctx, args),
        Commands::Edit(args) => cmd_edit(ctx, args),
        Commands::Notes(args) => cmd_notes(ctx, args),
        Commands::Toggle(args) => cmd_toggle(ctx, args),
        Commands::Done(args) => cmd_set_completed(ctx, args, true),
        Commands::Undone(args) => cmd_set_completed(ctx, args, false),
        Commands::Delete(args) => cmd_delete(ctx, args),
        Commands::Reset(args) => cmd_reset(ctx, args),

        // Settings
        Commands::Theme(args) => cmd_theme(ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs) -> CmdResult {
    let ws = ctx.open()?;
    let today = workspace::today();
    let criteria = FilterCriteria {
        search: args.search.unwrap_or_default(),
        category: args.category,
        priority: args.priority,
        status: args.status,
    };

    let outcome = FilterOutcome::of(&ws.tasks, &criteria);
    if ctx.json {
        let tasks = match outcome {
            FilterOutcome::Matches(tasks) => tasks.iter().map(|t| task_to_json(t, today)).collect(),
            _ => Vec::new(),
        };
        let output = TaskListJson {
            total: ws.tasks.len(),
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        FilterOutcome::NoTasks => println!("No tasks yet."),
        FilterOutcome::NoMatches => println!("No tasks match your filters."),
        FilterOutcome::Matches(tasks) => {
            for task in tasks {
                println!("{}", format_task_line(task, today));
            }
        }
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: IdArg) -> CmdResult {
    let ws = ctx.open()?;
    let today = workspace::today();
    let task = ws.find(args.id)?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task, today))?);
    } else {
        for line in format_task_detail(task, today) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(ctx: &Context) -> CmdResult {
    let ws = ctx.open()?;
    let dash = ws.dashboard(workspace::today());
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&dash))?);
    } else {
        for line in format_stats(&dash) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_export(ctx: &Context, args: ExportArgs) -> CmdResult {
    let ws = ctx.open()?;
    match args.output {
        Some(path) => {
            let path = ctx.dir.join(path);
            let file = File::create(&path)
                .map_err(|e| format!("could not create {}: {}", path.display(), e))?;
            export::write_csv(&ws.tasks, BufWriter::new(file))?;
            eprintln!("Exported {} tasks to {}", ws.tasks.len(), path.display());
        }
        None => export::write_csv(&ws.tasks, io::stdout().lock())?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> CmdResult {
    let mut ws = ctx.open()?;
    let mut new = NewTask::new(args.task)
        .category(args.category)
        .priority(args.priority)
        .notes(args.notes);
    new.due_date = args.due;

    let id = ws.add(new)?;
    println!("{}", id);
    Ok(())
}

fn cmd_edit(ctx: &Context, args: EditArgs) -> CmdResult {
    let mut ws = ctx.open()?;
    let mut edit = TaskEdit::from_task(ws.find(args.id)?);
    if let Some(task) = args.task {
        edit.task = task;
    }
    if let Some(category) = args.category {
        edit.category = category;
    }
    if let Some(priority) = args.priority {
        edit.priority = priority;
    }
    if args.clear_due {
        edit.due = DueChange::Clear;
    } else if let Some(due) = args.due {
        edit.due = DueChange::Set(due);
    }

    ws.edit(args.id, edit)?;
    Ok(())
}

fn cmd_notes(ctx: &Context, args: NotesArgs) -> CmdResult {
    let mut ws = ctx.open()?;
    ws.set_notes(args.id, args.text)?;
    Ok(())
}

fn cmd_toggle(ctx: &Context, args: IdArg) -> CmdResult {
    let mut ws = ctx.open()?;
    let completed = ws.toggle(args.id)?;
    println!("{}", if completed { "completed" } else { "pending" });
    Ok(())
}

fn cmd_set_completed(ctx: &Context, args: IdArg, completed: bool) -> CmdResult {
    let mut ws = ctx.open()?;
    ws.set_completed(args.id, completed)?;
    Ok(())
}

fn cmd_delete(ctx: &Context, args: IdArg) -> CmdResult {
    let mut ws = ctx.open()?;
    let removed = ws.delete(args.id)?;
    println!("Deleted: {}", removed.task);
    Ok(())
}

fn cmd_reset(ctx: &Context, args: ResetArgs) -> CmdResult {
    if !args.yes {
        return Err("reset permanently deletes all tasks; pass --yes to confirm".into());
    }
    let mut ws = ctx.open()?;
    ws.reset()?;
    println!("All data has been reset!");
    Ok(())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

fn cmd_theme(ctx: &Context, args: ThemeArgs) -> CmdResult {
    let config = read_config(&ctx.dir)?;
    let mut state = load_ui_state(&ctx.dir, &config);
    match args.theme {
        Some(theme) => {
            state.theme = theme;
            write_ui_state(&ctx.dir, &state)?;
        }
        None => println!("{}", state.theme.as_str()),
    }
    Ok(())
}
