// src/grid/mod.rs

pub mod csv_loader;
pub mod workbook;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::{fmt, path::Path};

pub use csv_loader::{grid_from_csv_path, grid_from_csv_reader};
pub use workbook::{grid_from_range, grid_from_workbook};

/// One untyped spreadsheet cell, as handed over by whatever decoded the file.
/// Serialize-only: untagged, a date and a text cell look alike on the way back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        RawCell::Text(s.into())
    }

    pub fn date(d: NaiveDate) -> Self {
        RawCell::Date(d.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl Default for RawCell {
    fn default() -> Self {
        RawCell::Empty
    }
}

/// Spreadsheet-style rendering: integral numbers print without a fraction,
/// so `20240101.0` reads back as `"20240101"`.
impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Text(s) => f.write_str(s),
            RawCell::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            RawCell::Bool(b) => write!(f, "{}", b),
            RawCell::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s.to_string())
        }
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s)
        }
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

impl From<NaiveDate> for RawCell {
    fn from(d: NaiveDate) -> Self {
        RawCell::date(d)
    }
}

pub type RawRow = Vec<RawCell>;

/// The decoded sheet: rows in file order, header row included if the file has one.
/// Rows may be ragged; a missing cell reads as `RawCell::Empty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawGrid {
    pub rows: Vec<RawRow>,
}

impl RawGrid {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Build a grid from string literals; empty strings become `Empty` cells.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|c| RawCell::from(c.as_ref())).collect())
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Pick a decoder by extension: `.csv` goes through the CSV reader, anything
/// else is handed to the workbook reader.
pub fn grid_from_path<P: AsRef<Path>>(path: P) -> Result<RawGrid> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|s| s.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        grid_from_csv_path(path)
    } else {
        grid_from_workbook(path)
    }
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Out-of-range reads on ragged rows yield an empty cell instead of panicking.
pub fn cell_at(row: &[RawCell], idx: usize) -> &RawCell {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}
