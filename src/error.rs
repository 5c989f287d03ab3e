use std::path::PathBuf;
use thiserror::Error;

/// Whole-run failures. Per-cell and per-row problems never show up here; they
/// are absorbed with a sentinel or by skipping the row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("input grid has no rows")]
    EmptyGrid,

    #[error("no header row found and default name column {column} is empty on every row")]
    NameColumnUnresolved { column: usize },

    #[error("none of the {rows_scanned} data rows produced a record")]
    NoRecords { rows_scanned: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid account pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("serial date range must satisfy 0 < min < max <= 2958466 (got {min}..{max})")]
    InvalidSerialRange { min: f64, max: f64 },

    #[error("strategy list for `{field}` is empty")]
    NoStrategies { field: &'static str },

    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
