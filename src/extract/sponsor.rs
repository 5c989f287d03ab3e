use serde::{Deserialize, Serialize};

use super::{RowContext, Strategy};
use crate::cell::{has_alphabetic, is_purely_numeric, normalize_text};
use crate::grid::cell_at;
use crate::schema::ColumnRole;

/// The sponsor/upline column is the least stable part of the sheet: label,
/// position and even presence change between revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorStrategy {
    /// The mapped sponsor column. Only trusted when a header label put it
    /// there, or when the whole sheet runs on default columns.
    ResolvedColumn,
    /// Every column whose header mentions a sponsor marker, left to right.
    CandidateColumns,
    /// The cell just right of the last account number in the row.
    RightOfLastAccount,
}

impl SponsorStrategy {
    pub const DEFAULT_ORDER: [SponsorStrategy; 3] = [
        SponsorStrategy::ResolvedColumn,
        SponsorStrategy::CandidateColumns,
        SponsorStrategy::RightOfLastAccount,
    ];
}

fn usable(text: String) -> Option<String> {
    if text.is_empty() || is_purely_numeric(&text) {
        None
    } else {
        Some(text)
    }
}

impl Strategy for SponsorStrategy {
    fn attempt(&self, ctx: &RowContext<'_>) -> Option<String> {
        match self {
            SponsorStrategy::ResolvedColumn => {
                let trusted = ctx.layout.columns.from_header(ColumnRole::Sponsor)
                    || !ctx.layout.header_found();
                if !trusted {
                    return None;
                }
                usable(ctx.text(ColumnRole::Sponsor))
            }
            SponsorStrategy::CandidateColumns => ctx
                .layout
                .sponsor_candidates
                .iter()
                .map(|&i| normalize_text(cell_at(ctx.row, i)))
                .find(|t| has_alphabetic(t) && !is_purely_numeric(t)),
            SponsorStrategy::RightOfLastAccount => {
                let last = ctx.row.iter().rposition(|c| ctx.pattern.matches(c))?;
                usable(normalize_text(cell_at(ctx.row, last + 1)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::AccountPattern;
    use crate::extract::{first_hit, test_support::layout};
    use crate::grid::RawGrid;

    fn run(grid: &RawGrid, layout: &crate::schema::SheetLayout) -> Option<String> {
        let pattern = AccountPattern::default();
        let ctx = RowContext {
            row: &grid.rows[0],
            layout,
            pattern: &pattern,
        };
        first_hit(&SponsorStrategy::DEFAULT_ORDER, &ctx)
    }

    #[test]
    fn header_resolved_column_is_used() {
        let grid = RawGrid::from_strings(vec![vec!["Doe", "Smith, John"]]);
        let layout = layout(&[(ColumnRole::Sponsor, 1)], vec![1]);
        assert_eq!(run(&grid, &layout).as_deref(), Some("Smith, John"));
    }

    #[test]
    fn numeric_resolved_value_falls_through_to_candidates() {
        let grid = RawGrid::from_strings(vec![vec!["Doe", "12345", "Upline Ann"]]);
        let layout = layout(&[(ColumnRole::Sponsor, 1)], vec![1, 2]);
        assert_eq!(run(&grid, &layout).as_deref(), Some("Upline Ann"));
    }

    #[test]
    fn default_sponsor_column_is_ignored_when_a_header_exists() {
        let mut cells = vec![String::new(); 16];
        cells[1] = "Doe".into();
        cells[14] = "Stale Value".into();
        let grid = RawGrid::from_strings(vec![cells]);
        let layout = layout(&[(ColumnRole::Name, 1)], vec![]);
        assert_eq!(run(&grid, &layout), None);
    }

    #[test]
    fn default_sponsor_column_is_used_without_a_header() {
        let mut cells = vec![String::new(); 16];
        cells[14] = "Cruz, Maria".into();
        let grid = RawGrid::from_strings(vec![cells]);
        let layout = layout(&[], vec![]);
        assert_eq!(run(&grid, &layout).as_deref(), Some("Cruz, Maria"));
    }

    #[test]
    fn position_fallback_uses_the_last_account() {
        let grid = RawGrid::from_strings(vec![vec![
            "Doe",
            "1111-2222-33333",
            "Not This",
            "4444-5555-66666",
            "Reyes, Tom",
        ]]);
        let layout = layout(&[(ColumnRole::Name, 0)], vec![]);
        assert_eq!(run(&grid, &layout).as_deref(), Some("Reyes, Tom"));
    }

    #[test]
    fn position_fallback_rejects_numbers() {
        let grid = RawGrid::from_strings(vec![vec!["Doe", "1111-2222-33333", "42"]]);
        let layout = layout(&[(ColumnRole::Name, 0)], vec![]);
        assert_eq!(run(&grid, &layout), None);
    }
}
