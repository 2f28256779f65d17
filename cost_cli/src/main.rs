//! # Costwise CLI
//!
//! Terminal front end for the cost estimation engine: price a project,
//! keep saved estimates in a `.cwp` store and browse the material catalog.

mod cli;
mod commands;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use cost_core::errors::EstimateResult;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => print!("{}", ensure_newline(output)),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            if e.is_recoverable() {
                eprintln!("Another user is editing the store; try again shortly.");
            }
            if cli.verbose > 0 {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> EstimateResult<String> {
    let store_path = cli.store_path();
    debug!(store = %store_path.display(), "Using project store");

    match &cli.command {
        Commands::Estimate { project, format, save, user } => {
            let save = save.then_some((store_path.as_path(), user.as_str()));
            commands::run_estimate(project, *format, save)
        }
        Commands::List { format } => commands::run_list(&store_path, *format),
        Commands::Show { id, format } => commands::run_show(&store_path, id, *format),
        Commands::Verify { id } => commands::run_verify(&store_path, id),
        Commands::Remove { id, user } => commands::run_remove(&store_path, id, user),
        Commands::Materials { category, format } => commands::run_materials(category.as_deref(), *format),
    }
}

fn ensure_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
