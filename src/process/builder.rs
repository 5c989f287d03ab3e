use tracing::{debug, info, instrument, trace};

use super::record::{CanonicalRecord, Roster};
use crate::cell::{normalize_text, AccountPattern, SerialWindow};
use crate::config::EngineConfig;
use crate::error::{ConfigError, NormalizeError};
use crate::extract::{extract_fields, ExtractRules};
use crate::grid::{cell_at, RawGrid};
use crate::schema::{resolve_layout, ColumnRole, SheetLayout};

/// The normalization engine. Holds validated, immutable configuration and is
/// otherwise stateless: every `normalize` call is independent.
#[derive(Debug, Clone)]
pub struct RosterEngine {
    config: EngineConfig,
    pattern: AccountPattern,
    window: SerialWindow,
    /// Lower-cased words that mean "this is a header cell, not a member".
    marker_names: Vec<String>,
}

impl RosterEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pattern = AccountPattern::new(&config.account_pattern).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: config.account_pattern.clone(),
                source,
            }
        })?;
        let window = config.serial_window();

        let mut marker_names: Vec<String> = std::iter::once(&config.name_marker)
            .chain(config.header_markers.iter())
            .chain(
                config
                    .labels
                    .get(&ColumnRole::Name)
                    .map(|l| l.exact.as_slice())
                    .unwrap_or_default(),
            )
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        marker_names.sort();
        marker_names.dedup();

        Ok(Self {
            config,
            pattern,
            window,
            marker_names,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn account_pattern(&self) -> &AccountPattern {
        &self.pattern
    }

    pub fn resolve(&self, grid: &RawGrid) -> SheetLayout {
        resolve_layout(grid, &self.config)
    }

    fn rules(&self) -> ExtractRules<'_> {
        ExtractRules {
            pattern: &self.pattern,
            serial_window: &self.window,
            account_strategies: &self.config.account_strategies,
            sponsor_strategies: &self.config.sponsor_strategies,
            account_sentinel: &self.config.account_sentinel,
            sentinel: &self.config.sentinel,
        }
    }

    /// Why a row with this trimmed, not yet upper-cased name is not a record.
    /// Length is measured before upper-casing, which can grow a name (`ß` → `SS`).
    fn reject_reason(&self, name: &str) -> Option<&'static str> {
        if name.chars().count() < self.config.min_name_len {
            return Some("name too short");
        }
        let lower = name.to_lowercase();
        if self.marker_names.iter().any(|m| *m == lower) {
            return Some("repeated header");
        }
        None
    }

    /// Turn a raw grid into the canonical roster.
    #[instrument(level = "info", skip(self, grid), fields(rows = grid.len()))]
    pub fn normalize(&self, grid: &RawGrid) -> Result<Roster, NormalizeError> {
        if grid.is_empty() {
            return Err(NormalizeError::EmptyGrid);
        }

        let layout = self.resolve(grid);
        let name_col = layout.columns.index(ColumnRole::Name);
        if !layout.header_found()
            && grid
                .rows
                .iter()
                .all(|r| normalize_text(cell_at(r, name_col)).is_empty())
        {
            return Err(NormalizeError::NameColumnUnresolved { column: name_col });
        }

        let rules = self.rules();
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (offset, row) in grid.rows.iter().skip(layout.first_data_row).enumerate() {
            let row_idx = layout.first_data_row + offset;
            let name = normalize_text(cell_at(row, name_col));
            if let Some(reason) = self.reject_reason(&name) {
                trace!(row = row_idx, %name, reason, "skipping row");
                skipped += 1;
                continue;
            }

            let f = extract_fields(row, &layout, &rules);
            records.push(CanonicalRecord {
                id: records.len(),
                name: f.name,
                account_number: f.account_number,
                due_date: f.due_date,
                due_amount: f.due_amount,
                overdue_amount: f.overdue_amount,
                brochure_sales: f.brochure_sales,
                sponsor: f.sponsor,
            });
        }

        let rows_scanned = grid.len().saturating_sub(layout.first_data_row);
        if records.is_empty() {
            debug!(rows_scanned, "every data row was filtered out");
            return Err(NormalizeError::NoRecords { rows_scanned });
        }

        info!(
            records = records.len(),
            skipped,
            header_row = ?layout.header_row,
            "normalized roster"
        );
        Ok(Roster { records, layout })
    }
}

impl Default for RosterEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default()).expect("default config is valid")
    }
}
