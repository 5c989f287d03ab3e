use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::search;
use crate::schema::SheetLayout;

/// One member/account row of the normalized roster. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// Position in this run's output; dense, 0-based, not stable across uploads.
    pub id: usize,
    pub name: String,
    pub account_number: String,
    pub due_date: String,
    pub due_amount: f64,
    pub overdue_amount: f64,
    pub brochure_sales: f64,
    pub sponsor: String,
}

/// Result of one normalization run: the records plus the layout they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    pub records: Vec<CanonicalRecord>,
    pub layout: SheetLayout,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    /// Case-insensitive name lookup; see [`search::search`].
    pub fn search(&self, term: &str) -> Vec<&CanonicalRecord> {
        search::search(&self.records, term)
    }

    /// Wrap the records for persistence, stamped with the current time.
    pub fn into_report(self) -> RosterReport {
        RosterReport {
            items: self.records,
            updated_at: Utc::now(),
        }
    }
}

/// What a caller persists as "the latest upload"; a new upload replaces it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterReport {
    pub items: Vec<CanonicalRecord>,
    pub updated_at: DateTime<Utc>,
}
