//! Oleshki CLI
//!
//! Command-line interface for the evacuation request change log

use clap::{Parser, Subcommand};
use oleshki_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "oleshki")]
#[command(about = "Oleshki - change log for evacuation request snapshots", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the change log from a snapshot directory
    Diff(commands::diff::DiffArgs),
    /// Render a change log to Markdown
    Render(commands::render::RenderArgs),
    /// Count statuses in one snapshot
    Statuses(commands::statuses::StatusesArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Render(args) => commands::render::execute(args),
        Commands::Statuses(args) => commands::statuses::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
