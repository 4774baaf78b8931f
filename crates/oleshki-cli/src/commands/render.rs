//! Render command
//!
//! Usage: oleshki render --changelog <FILE> [--output <FILE>] [--config <TOML>]

use clap::Args;
use oleshki_core::render_change_log;
use oleshki_store::read_change_log;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Change log written by `oleshki diff`
    #[arg(long)]
    pub changelog: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML config file naming the fields to show
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute render command
pub fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let log = read_change_log(&args.changelog)?;

    let markdown = render_change_log(&log, &config.significant_fields);

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, markdown)?;
        println!("✓ Rendered to {}", output_path.display());
    } else {
        print!("{}", markdown);
    }

    Ok(())
}
