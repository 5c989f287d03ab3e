//! Column inspector: shows what the header pass decided and what the first
//! data rows look like, for debugging a sheet that normalizes badly.

use serde::Serialize;

use crate::cell::normalize_text;
use crate::grid::{cell_at, RawGrid};
use crate::process::RosterEngine;
use crate::schema::{header_texts, ColumnRole, Provenance};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleReport {
    pub role: ColumnRole,
    pub index: usize,
    pub provenance: Provenance,
    /// Header text at `index`, when a header row exists.
    pub header_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    pub header_row: Option<usize>,
    pub first_data_row: usize,
    /// Set when no header row was found and every column is a guess.
    pub low_confidence: bool,
    pub columns: Vec<RoleReport>,
    pub sponsor_candidates: Vec<usize>,
    /// Leading data rows as normalized text.
    pub sample: Vec<Vec<String>>,
}

impl RosterEngine {
    pub fn inspect(&self, grid: &RawGrid, sample_rows: usize) -> ColumnReport {
        let layout = self.resolve(grid);
        let headers = layout
            .header_row
            .map(|i| header_texts(&grid.rows[i]))
            .unwrap_or_default();

        let columns = layout
            .columns
            .iter()
            .map(|(role, entry)| RoleReport {
                role,
                index: entry.index,
                provenance: entry.provenance,
                header_label: headers.get(entry.index).filter(|h| !h.is_empty()).cloned(),
            })
            .collect();

        let width = grid.width();
        let sample = grid
            .rows
            .iter()
            .skip(layout.first_data_row)
            .take(sample_rows)
            .map(|row| (0..width).map(|i| normalize_text(cell_at(row, i))).collect())
            .collect();

        ColumnReport {
            header_row: layout.header_row,
            first_data_row: layout.first_data_row,
            low_confidence: !layout.header_found(),
            columns,
            sponsor_candidates: layout.sponsor_candidates.clone(),
            sample,
        }
    }
}

impl ColumnReport {
    pub fn role(&self, role: ColumnRole) -> Option<&RoleReport> {
        self.columns.iter().find(|r| r.role == role)
    }
}
