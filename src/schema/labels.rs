// src/schema/labels.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::ColumnRole;

/// Header wordings accepted for one role. All comparisons happen on
/// lower-cased, trimmed header text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleLabels {
    /// Whole-cell matches, tried first and in order.
    pub exact: Vec<String>,
    /// Substring matches, tried after every exact label missed.
    pub contains: Vec<String>,
    /// A header containing any of these is never taken for this role.
    pub exclude: Vec<String>,
}

impl RoleLabels {
    fn new(exact: &[&str], contains: &[&str], exclude: &[&str]) -> Self {
        fn own(xs: &[&str]) -> Vec<String> {
            xs.iter().map(|s| s.to_string()).collect()
        }
        Self {
            exact: own(exact),
            contains: own(contains),
            exclude: own(exclude),
        }
    }

    pub fn excludes(&self, header: &str) -> bool {
        self.exclude.iter().any(|x| header.contains(x.as_str()))
    }

    /// First column matching this role: exact labels in priority order, then
    /// substring labels in priority order.
    pub fn find(&self, headers: &[String]) -> Option<usize> {
        for label in &self.exact {
            if let Some(i) = headers
                .iter()
                .position(|h| h == label && !self.excludes(h))
            {
                return Some(i);
            }
        }
        for label in &self.contains {
            if let Some(i) = headers
                .iter()
                .position(|h| !h.is_empty() && h.contains(label.as_str()) && !self.excludes(h))
            {
                return Some(i);
            }
        }
        None
    }
}

/// The label table for the roster layouts seen so far. Sponsor is absent on
/// purpose: it resolves to a candidate list via the sponsor markers instead.
pub fn default_labels() -> BTreeMap<ColumnRole, RoleLabels> {
    let mut m = BTreeMap::new();
    m.insert(
        ColumnRole::Name,
        RoleLabels::new(
            &["last, first name", "name", "member name", "full name", "representative"],
            &["first name", "last name", "name"],
            &["sponsor", "upline", "recruiter"],
        ),
    );
    m.insert(
        ColumnRole::AccountNumber,
        RoleLabels::new(
            &["acct. no.", "acct no", "acct no.", "account number", "account no.", "account #"],
            &["acct", "account"],
            &["sponsor", "upline"],
        ),
    );
    m.insert(
        ColumnRole::DueDate,
        RoleLabels::new(
            &["due date", "next due date", "next due"],
            &["due date", "date"],
            &[],
        ),
    );
    m.insert(
        ColumnRole::DueAmount,
        RoleLabels::new(
            &["due amount", "amount due", "amt due"],
            &["due amount", "amount due", "due amt"],
            &["overdue"],
        ),
    );
    m.insert(
        ColumnRole::OverdueAmount,
        RoleLabels::new(
            &["amount overdue", "overdue amount", "overdue"],
            &["overdue", "past due"],
            &[],
        ),
    );
    m.insert(
        ColumnRole::BrochureSales,
        RoleLabels::new(&["bps", "brochure sales"], &["brochure", "bps"], &[]),
    );
    m
}

pub fn default_sponsor_markers() -> Vec<String> {
    ["sponsor", "upline", "recruiter", "referred"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
