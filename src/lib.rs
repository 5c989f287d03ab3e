//! Roster normalization: turns a loosely-structured member spreadsheet
//! (columns in any order, headers worded any way, dates and amounts in mixed
//! encodings) into a validated list of canonical account records.
//!
//! ```no_run
//! use rosterscraper::{grid::grid_from_csv_path, RosterEngine};
//!
//! let grid = grid_from_csv_path("master.csv")?;
//! let roster = RosterEngine::default().normalize(&grid)?;
//! for r in roster.search("doe") {
//!     println!("{} {}", r.name, r.account_number);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cell;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod grid;
pub mod logging;
pub mod process;
pub mod schema;

pub use config::EngineConfig;
pub use diagnostics::ColumnReport;
pub use error::{ConfigError, NormalizeError};
pub use grid::{RawCell, RawGrid, RawRow};
pub use process::{CanonicalRecord, Roster, RosterEngine, RosterReport};
pub use schema::{ColumnMap, ColumnRole, SheetLayout};
