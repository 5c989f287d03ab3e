use regex::Regex;

use super::text::normalize_text;
use crate::grid::RawCell;

/// Three hyphen-separated digit groups: 4-4-5.
pub const DEFAULT_ACCOUNT_PATTERN: &str = r"^[0-9]{4}-[0-9]{4}-[0-9]{5}$";

/// Strict structural matcher for account numbers. No separator or grouping
/// repair is attempted; only surrounding whitespace is ignored.
#[derive(Debug, Clone)]
pub struct AccountPattern {
    re: Regex,
}

impl AccountPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }

    pub fn is_match_str(&self, s: &str) -> bool {
        self.re.is_match(s.trim())
    }

    /// Returns the normalized text when the cell holds an account number.
    pub fn match_cell(&self, cell: &RawCell) -> Option<String> {
        let text = normalize_text(cell);
        if self.re.is_match(&text) {
            Some(text)
        } else {
            None
        }
    }

    pub fn matches(&self, cell: &RawCell) -> bool {
        self.match_cell(cell).is_some()
    }
}

impl Default for AccountPattern {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_PATTERN).expect("default account pattern compiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_four_four_five() {
        let p = AccountPattern::default();
        assert!(p.matches(&RawCell::text("1234-5678-90123")));
        assert!(p.matches(&RawCell::text("  1234-5678-90123\u{00A0}")));
        assert!(!p.matches(&RawCell::text("1234-5678-9012")));
        assert!(!p.matches(&RawCell::text("1234 5678 90123")));
        assert!(!p.matches(&RawCell::text("12345678-90123")));
        assert!(!p.matches(&RawCell::text("x1234-5678-90123")));
        assert!(!p.matches(&RawCell::Number(1234567890123.0)));
        assert!(!p.matches(&RawCell::Empty));
    }

    #[test]
    fn alternate_pattern() -> Result<(), regex::Error> {
        let p = AccountPattern::new(r"^AC-[0-9]{6}$")?;
        assert!(p.is_match_str("AC-000123"));
        assert!(!p.is_match_str("1234-5678-90123"));
        Ok(())
    }
}
