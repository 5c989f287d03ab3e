use super::record::CanonicalRecord;

/// Terms shorter than this match nothing.
pub const MIN_SEARCH_LEN: usize = 2;
pub const SEARCH_LIMIT: usize = 30;

/// Records whose name contains `term` (case-insensitive), in roster order,
/// capped at [`SEARCH_LIMIT`].
pub fn search<'a>(records: &'a [CanonicalRecord], term: &str) -> Vec<&'a CanonicalRecord> {
    if term.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .take(SEARCH_LIMIT)
        .collect()
}
