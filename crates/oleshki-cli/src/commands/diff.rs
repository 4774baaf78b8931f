//! Diff command
//!
//! Usage: oleshki diff --snapshots <DIR> --out <FILE> [--config <TOML>]
//!        [--interval-minutes N] [--field F]... [--lookback-hours H]

use chrono::Utc;
use clap::Args;
use oleshki_core::compute_change_log;
use oleshki_store::{write_change_log, FsSnapshotStore, SnapshotFilter};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Directory of timestamped snapshot files
    #[arg(long)]
    pub snapshots: PathBuf,

    /// Change log output file
    #[arg(long)]
    pub out: PathBuf,

    /// TOML config file; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum minutes between admitted snapshots
    #[arg(long)]
    pub interval_minutes: Option<i64>,

    /// Significant field (repeatable); replaces the configured list
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Only read snapshots declared within the last N hours
    #[arg(long)]
    pub lookback_hours: Option<i64>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(minutes) = args.interval_minutes {
        config.min_interval_minutes = minutes;
    }
    if !args.fields.is_empty() {
        config.significant_fields = args.fields;
    }
    if let Some(hours) = args.lookback_hours {
        config.lookback_hours = Some(hours);
    }
    config.validate()?;

    let mut store = FsSnapshotStore::open(&args.snapshots)?;
    if let Some(since) = config.lookback_start(Utc::now())? {
        store = store.with_filter(SnapshotFilter::since(since));
    }

    let outcome = compute_change_log(&store, &config)?;
    let digest = write_change_log(&args.out, &outcome.change_log)?;

    println!("✓ Change log written to {}", args.out.display());
    println!("  run_id: {}", outcome.run_id);
    println!(
        "  snapshots: {} admitted, {} skipped",
        outcome.stats.snapshots_admitted, outcome.stats.snapshots_skipped
    );
    println!("  entries: {}", outcome.change_log.len());
    println!("  digest: {}", digest);

    Ok(())
}
