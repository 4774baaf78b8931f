//! Statuses command
//!
//! Usage: oleshki statuses --snapshot <FILE> [--field status] [--json]

use clap::Args;
use oleshki_core::summarize_statuses;
use oleshki_store::read_snapshot;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StatusesArgs {
    /// Snapshot file to summarize
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Field holding the status text
    #[arg(long, default_value = "status")]
    pub field: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute statuses command
pub fn execute(args: StatusesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = read_snapshot(&args.snapshot)?;
    let report = summarize_statuses(&snapshot, &args.field);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Snapshot: {}", report.timestamp.to_rfc3339());
    println!("Total: {}", report.total);
    println!("Done: {}", report.done);
    println!();
    println!("By category:");
    for (category, count) in &report.by_category {
        println!("  {:?}: {}", category, count);
    }
    println!();
    println!("By status:");
    for (status, count) in &report.by_status {
        let label = if status.is_empty() { "(none)" } else { status.as_str() };
        println!("  {}: {}", label, count);
    }

    Ok(())
}
