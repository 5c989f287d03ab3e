// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A semantic field of a roster row, independent of where it sits in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Name,
    AccountNumber,
    DueDate,
    DueAmount,
    OverdueAmount,
    BrochureSales,
    Sponsor,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 7] = [
        ColumnRole::Name,
        ColumnRole::AccountNumber,
        ColumnRole::DueDate,
        ColumnRole::DueAmount,
        ColumnRole::OverdueAmount,
        ColumnRole::BrochureSales,
        ColumnRole::Sponsor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Name => "name",
            ColumnRole::AccountNumber => "account_number",
            ColumnRole::DueDate => "due_date",
            ColumnRole::DueAmount => "due_amount",
            ColumnRole::OverdueAmount => "overdue_amount",
            ColumnRole::BrochureSales => "brochure_sales",
            ColumnRole::Sponsor => "sponsor",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a role's column index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Header,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub index: usize,
    pub provenance: Provenance,
}

/// Role → column index. Every role always has an entry; the map is built once
/// per upload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    entries: BTreeMap<ColumnRole, ColumnEntry>,
}

impl ColumnMap {
    /// All roles at their static default index. Roles missing from `defaults`
    /// land at `usize::MAX`, which reads as an empty cell on every row.
    pub fn from_defaults(defaults: &BTreeMap<ColumnRole, usize>) -> Self {
        let entries = ColumnRole::ALL
            .iter()
            .map(|role| {
                let index = defaults.get(role).copied().unwrap_or(usize::MAX);
                (
                    *role,
                    ColumnEntry {
                        index,
                        provenance: Provenance::Default,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Consume and return a map with `role` pinned to a header-matched column.
    pub(crate) fn with_header_match(mut self, role: ColumnRole, index: usize) -> Self {
        self.entries.insert(
            role,
            ColumnEntry {
                index,
                provenance: Provenance::Header,
            },
        );
        self
    }

    pub fn index(&self, role: ColumnRole) -> usize {
        self.entries[&role].index
    }

    pub fn entry(&self, role: ColumnRole) -> ColumnEntry {
        self.entries[&role]
    }

    pub fn from_header(&self, role: ColumnRole) -> bool {
        self.entries[&role].provenance == Provenance::Header
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnRole, ColumnEntry)> + '_ {
        self.entries.iter().map(|(r, e)| (*r, *e))
    }
}

/// Everything the header pass learned about a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub columns: ColumnMap,
    /// Columns whose header mentions a sponsor/upline marker, left to right.
    pub sponsor_candidates: Vec<usize>,
    /// Row index of the detected header, if any.
    pub header_row: Option<usize>,
    /// First row treated as data (`header_row + 1`, or 0).
    pub first_data_row: usize,
}

impl SheetLayout {
    pub fn header_found(&self) -> bool {
        self.header_row.is_some()
    }
}
