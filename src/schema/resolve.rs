// src/schema/resolve.rs

use tracing::{debug, instrument, trace, warn};

use super::types::{ColumnMap, ColumnRole, SheetLayout};
use crate::cell::normalize_text;
use crate::config::EngineConfig;
use crate::grid::{RawCell, RawGrid};

/// Lower-cased, whitespace-normalized header text for every cell in `row`.
pub fn header_texts(row: &[RawCell]) -> Vec<String> {
    row.iter().map(|c| normalize_text(c).to_lowercase()).collect()
}

fn mentions_any(text: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| !m.is_empty() && text.contains(m.as_str()))
}

/// Does this row look like the header? One cell must carry the name marker
/// (and not be a sponsor column) or one of the compound header labels.
pub fn is_header_row(row: &[RawCell], cfg: &EngineConfig) -> bool {
    header_texts(row).iter().any(|h| {
        mentions_any(h, &cfg.header_markers)
            || (!cfg.name_marker.is_empty()
                && h.contains(cfg.name_marker.as_str())
                && !mentions_any(h, &cfg.sponsor_markers))
    })
}

/// Index of the first header-looking row within the scan window. First match
/// wins; later candidates are not considered.
pub fn find_header_row(grid: &RawGrid, cfg: &EngineConfig) -> Option<usize> {
    grid.rows
        .iter()
        .take(cfg.header_scan_rows)
        .position(|row| is_header_row(row, cfg))
}

/// Build the sheet layout. Never fails: with no header the static defaults
/// stand and every row from 0 is data.
#[instrument(level = "debug", skip(grid, cfg), fields(rows = grid.len()))]
pub fn resolve_layout(grid: &RawGrid, cfg: &EngineConfig) -> SheetLayout {
    let mut columns = ColumnMap::from_defaults(&cfg.default_columns);

    let Some(header_row) = find_header_row(grid, cfg) else {
        warn!(
            scanned = cfg.header_scan_rows.min(grid.len()),
            "no header row found, using default column positions"
        );
        return SheetLayout {
            columns,
            sponsor_candidates: Vec::new(),
            header_row: None,
            first_data_row: 0,
        };
    };

    let headers = header_texts(&grid.rows[header_row]);
    debug!(header_row, ?headers, "header row found");

    for (role, labels) in &cfg.labels {
        if *role == ColumnRole::Sponsor {
            continue;
        }
        match labels.find(&headers) {
            Some(idx) => {
                trace!(%role, idx, label = %headers[idx], "header match");
                columns = columns.with_header_match(*role, idx);
            }
            None => debug!(%role, default = columns.index(*role), "no header match, keeping default"),
        }
    }

    let sponsor_candidates: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| mentions_any(h, &cfg.sponsor_markers))
        .map(|(i, _)| i)
        .collect();
    if let Some(&first) = sponsor_candidates.first() {
        columns = columns.with_header_match(ColumnRole::Sponsor, first);
    }
    debug!(?sponsor_candidates, "sponsor candidates");

    SheetLayout {
        columns,
        sponsor_candidates,
        header_row: Some(header_row),
        first_data_row: header_row + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(cells: &[(usize, &str)], width: usize) -> Vec<String> {
        let mut row = vec![String::new(); width];
        for (i, v) in cells {
            row[*i] = v.to_string();
        }
        row
    }

    #[test]
    fn header_labels_override_defaults() {
        let cfg = EngineConfig::default();
        let mut rows = vec![
            padded(&[(0, "MONTHLY REPORT")], 12),
            padded(&[], 12),
            padded(&[(0, "Branch 7")], 12),
            padded(&[(2, "Last, First Name"), (9, "Acct. No.")], 12),
        ];
        rows.push(padded(&[(2, "Doe, Jane"), (9, "1111-2222-33333")], 12));
        let grid = RawGrid::from_strings(rows);

        let layout = resolve_layout(&grid, &cfg);
        assert_eq!(layout.header_row, Some(3));
        assert_eq!(layout.first_data_row, 4);
        assert_eq!(layout.columns.index(ColumnRole::Name), 2);
        assert_eq!(layout.columns.index(ColumnRole::AccountNumber), 9);
        assert!(layout.columns.from_header(ColumnRole::AccountNumber));
        // unmatched roles keep their defaults
        assert_eq!(layout.columns.index(ColumnRole::DueAmount), 5);
        assert!(!layout.columns.from_header(ColumnRole::DueAmount));
        assert!(!layout.columns.from_header(ColumnRole::Sponsor));
    }

    #[test]
    fn sponsor_name_alone_is_not_a_header() {
        let cfg = EngineConfig::default();
        let grid = RawGrid::from_strings(vec![vec!["Sponsor Name", "x"]]);
        assert_eq!(find_header_row(&grid, &cfg), None);
    }

    #[test]
    fn header_outside_the_scan_window_is_ignored() {
        let cfg = EngineConfig {
            header_scan_rows: 2,
            ..EngineConfig::default()
        };
        let grid = RawGrid::from_strings(vec![
            vec!["junk"],
            vec!["junk"],
            vec!["Name", "Acct No"],
        ]);
        let layout = resolve_layout(&grid, &cfg);
        assert_eq!(layout.header_row, None);
        assert_eq!(layout.first_data_row, 0);
        assert_eq!(layout.columns.index(ColumnRole::Name), 1);
    }

    #[test]
    fn first_header_candidate_wins() {
        let cfg = EngineConfig::default();
        let grid = RawGrid::from_strings(vec![
            vec!["", "Name"],
            vec!["Member Name", ""],
        ]);
        let layout = resolve_layout(&grid, &cfg);
        assert_eq!(layout.header_row, Some(0));
        assert_eq!(layout.columns.index(ColumnRole::Name), 1);
    }

    #[test]
    fn every_sponsor_column_becomes_a_candidate() {
        let cfg = EngineConfig::default();
        let grid = RawGrid::from_strings(vec![vec![
            "Name",
            "Upline",
            "Acct No",
            "Sponsor Name",
        ]]);
        let layout = resolve_layout(&grid, &cfg);
        assert_eq!(layout.sponsor_candidates, vec![1, 3]);
        assert_eq!(layout.columns.index(ColumnRole::Sponsor), 1);
        assert!(layout.columns.from_header(ColumnRole::Sponsor));
    }
}
