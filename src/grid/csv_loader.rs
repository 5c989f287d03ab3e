use anyhow::{Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

use super::{RawCell, RawGrid};

static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("static regex"));

/// CSV has no cell types, so plain decimals are promoted to numbers the way a
/// workbook decoder would have delivered them. Everything else stays text.
fn infer_cell(raw: &str) -> RawCell {
    let v = raw.trim();
    if v.is_empty() {
        return RawCell::Empty;
    }
    if PLAIN_DECIMAL.is_match(v) {
        if let Ok(n) = v.parse::<f64>() {
            return RawCell::Number(n);
        }
    }
    RawCell::Text(raw.to_string())
}

/// Read every record (no header handling; the engine finds its own header row).
pub fn grid_from_csv_reader<R: Read>(reader: R) -> Result<RawGrid> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // ragged rows are normal in exported rosters
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record.iter().map(infer_cell).collect());
    }
    debug!(rows = rows.len(), "decoded CSV grid");
    Ok(RawGrid::new(rows))
}

pub fn grid_from_csv_path<P: AsRef<Path>>(path: P) -> Result<RawGrid> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    grid_from_csv_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn decimals_become_numbers_and_the_rest_stays_text() -> Result<()> {
        let content = "Name,Amount,Acct\nDoe,150.50,1111-2222-33333\nRoe,\"$1,200.00\",\n";
        let grid = grid_from_csv_reader(Cursor::new(content))?;
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.rows[1][1], RawCell::Number(150.5));
        assert_eq!(grid.rows[1][2], RawCell::text("1111-2222-33333"));
        assert_eq!(grid.rows[2][1], RawCell::text("$1,200.00"));
        assert_eq!(grid.rows[2][2], RawCell::Empty);
        Ok(())
    }

    #[test]
    fn ragged_records_are_accepted() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "a,b,c\nd\n")?;
        let grid = grid_from_csv_path(tmp.path())?;
        assert_eq!(grid.rows[0].len(), 3);
        assert_eq!(grid.rows[1].len(), 1);
        Ok(())
    }
}
