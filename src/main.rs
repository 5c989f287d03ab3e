use anyhow::{Context, Result};
use clap::Parser;
use rosterscraper::{grid::grid_from_path, logging, EngineConfig, RosterEngine};
use std::path::PathBuf;
use tracing::info;

/// Normalize a roster spreadsheet and print the records as JSON.
#[derive(Parser, Debug)]
#[command(name = "rosterscraper", version)]
struct Args {
    /// CSV or workbook (xlsx, xls, xlsb, ods) to normalize
    file: PathBuf,

    /// YAML engine configuration; defaults apply to anything left out
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only records whose name contains this term
    #[arg(short, long)]
    search: Option<String>,
}

fn main() -> Result<()> {
    logging::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(p) => EngineConfig::load(p)?,
        None => EngineConfig::default(),
    };
    let engine = RosterEngine::new(config).context("invalid engine configuration")?;

    let grid = grid_from_path(&args.file)?;
    info!(file = %args.file.display(), rows = grid.len(), "loaded grid");

    let roster = engine
        .normalize(&grid)
        .with_context(|| format!("normalizing {}", args.file.display()))?;

    let out = match &args.search {
        Some(term) => serde_json::to_string_pretty(&roster.search(term))?,
        None => serde_json::to_string_pretty(&roster.into_report())?,
    };
    println!("{}", out);
    Ok(())
}
