use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, warn};

use super::{RawCell, RawGrid, RawRow};

fn convert(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::from(s.as_str()),
        Data::Float(n) => RawCell::Number(*n),
        Data::Int(n) => RawCell::Number(*n as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        // the workbook knows its own epoch, so let calamine resolve it
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => RawCell::Date(ndt),
            None => RawCell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => {
            warn!(error = ?e, "cell error in workbook, treating as empty");
            RawCell::Empty
        }
    }
}

/// Decode the first worksheet of an xlsx/xls/xlsb/ods file.
pub fn grid_from_workbook<P: AsRef<Path>>(path: P) -> Result<RawGrid> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {:?}", path))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook {:?} has no sheets", path))?
        .with_context(|| format!("Failed to read first sheet of {:?}", path))?;

    let grid = grid_from_range(&range);
    debug!(rows = grid.len(), "decoded workbook grid");
    Ok(grid)
}

/// A calamine range starts at its first used cell. Pad it back out so grid
/// indices are absolute sheet positions (column A = 0, row 1 = 0).
pub fn grid_from_range(range: &Range<Data>) -> RawGrid {
    let (r0, c0) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<RawRow> = vec![Vec::new(); r0 as usize];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![RawCell::Empty; c0 as usize];
        cells.extend(row.iter().map(convert));
        cells
    }));
    RawGrid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_cells_map_onto_raw_cells() {
        assert_eq!(convert(&Data::Int(3)), RawCell::Number(3.0));
        assert_eq!(convert(&Data::String(String::new())), RawCell::Empty);
        assert_eq!(convert(&Data::String("Doe".into())), RawCell::text("Doe"));
        assert_eq!(convert(&Data::Bool(true)), RawCell::Bool(true));
    }

    #[test]
    fn empty_leading_column_keeps_sheet_positions() -> anyhow::Result<()> {
        // B1..O1 used, column A blank: the master sheet layout
        let mut range = Range::new((0, 1), (0, 14));
        range.set_value((0, 1), Data::String("Doe, Jane".into()));
        range.set_value((0, 14), Data::String("Smith, John".into()));

        let grid = grid_from_range(&range);
        assert_eq!(grid.rows[0][0], RawCell::Empty);
        assert_eq!(grid.rows[0][1], RawCell::text("Doe, Jane"));
        assert_eq!(grid.rows[0][14], RawCell::text("Smith, John"));

        let roster = crate::RosterEngine::default().normalize(&grid)?;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records[0].name, "DOE, JANE");
        assert_eq!(roster.records[0].sponsor, "Smith, John");
        Ok(())
    }

    #[test]
    fn empty_leading_rows_keep_sheet_positions() {
        let mut range = Range::new((2, 0), (2, 1));
        range.set_value((2, 1), Data::String("Doe, Jane".into()));

        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 3);
        assert!(grid.rows[0].is_empty());
        assert_eq!(grid.rows[2][1], RawCell::text("Doe, Jane"));
    }

    #[test]
    fn missing_workbook_is_an_error() {
        assert!(grid_from_workbook("/definitely/not/here.xlsx").is_err());
    }
}
