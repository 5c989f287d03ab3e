use anyhow::Result;
use clap::Parser;
use rosterscraper::{grid::grid_from_path, logging, EngineConfig, RosterEngine};
use std::path::PathBuf;

/// Show how the engine reads a sheet's columns: header row, per-role column
/// and where it came from, sponsor candidates, and a few normalized rows.
#[derive(Parser, Debug)]
#[command(name = "inspect_columns")]
struct Args {
    file: PathBuf,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of data rows to sample
    #[arg(short, long, default_value_t = 5)]
    rows: usize,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(p) => EngineConfig::load(p)?,
        None => EngineConfig::default(),
    };
    let engine = RosterEngine::new(config)?;
    let grid = grid_from_path(&args.file)?;

    let report = engine.inspect(&grid, args.rows);
    if report.low_confidence {
        eprintln!("warning: no header row found, columns are default positions");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
