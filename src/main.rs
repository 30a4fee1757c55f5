use clap::Parser;
use todo_tracker::cli::commands::Cli;
use todo_tracker::cli::handlers::{self, Context};
use todo_tracker::logging;

fn main() {
    let mut cli = Cli::parse();

    let ctx = match Context::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command.take() {
        None => {
            // No subcommand → launch the dashboard
            let guard = logging::init_file(&ctx.dir);
            let result = todo_tracker::tui::run(&ctx.dir, ctx.file.as_deref());
            drop(guard);
            if let Err(e) = result {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(cmd) => {
            logging::init_stderr();
            if let Err(e) = handlers::dispatch(&ctx, cmd) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
