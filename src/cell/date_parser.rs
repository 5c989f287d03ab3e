use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::text::normalize_text;
use crate::grid::RawCell;

/// Canonical display form for due dates.
const DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// Day-zero convention of the spreadsheet that produced a serial date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateSystem {
    /// Day 0 = 1899-12-30 (serial 25569 = 1970-01-01).
    #[default]
    Excel1900,
    /// Day 0 = 1904-01-01.
    Excel1904,
}

impl DateSystem {
    pub fn epoch(&self) -> NaiveDate {
        match self {
            DateSystem::Excel1900 => NaiveDate::from_ymd_opt(1899, 12, 30),
            DateSystem::Excel1904 => NaiveDate::from_ymd_opt(1904, 1, 1),
        }
        .expect("valid epoch literal")
    }
}

/// Serial of 9999-12-31 in the 1900 system; no window may reach past it.
pub const MAX_SERIAL: f64 = 2_958_465.0;

/// Numbers strictly inside `(min, max)` are taken to be serial dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerialWindow {
    pub system: DateSystem,
    pub min: f64,
    pub max: f64,
}

impl Default for SerialWindow {
    /// Roughly 2009-07 through 2064-04 in the 1900 system.
    fn default() -> Self {
        Self {
            system: DateSystem::Excel1900,
            min: 40_000.0,
            max: 60_000.0,
        }
    }
}

impl SerialWindow {
    pub fn to_date(&self, serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial <= self.min || serial >= self.max {
            return None;
        }
        // time-of-day fraction is dropped; out-of-calendar serials pass through
        self.system
            .epoch()
            .checked_add_days(Days::new(serial.floor() as u64))
    }
}

/// `YYYYMMDD` → `MM/DD/YYYY` by position only; `20231399` becomes `13/99/2023`.
fn reformat_yyyymmdd(s: &str) -> Option<String> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}/{}/{}", &s[4..6], &s[6..8], &s[0..4]))
}

/// Any cell → display date, tried in order: 8-digit `YYYYMMDD`, serial date
/// inside the window, native date, then trimmed pass-through text.
/// Empty cells give `sentinel`.
pub fn normalize_date(cell: &RawCell, window: &SerialWindow, sentinel: &str) -> String {
    match cell {
        RawCell::Empty => sentinel.to_string(),
        RawCell::Date(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        RawCell::Number(n) if !n.is_finite() => sentinel.to_string(),
        RawCell::Number(n) => {
            let rendered = cell.to_string();
            if let Some(s) = reformat_yyyymmdd(&rendered) {
                return s;
            }
            match window.to_date(*n) {
                Some(d) => d.format(DISPLAY_FORMAT).to_string(),
                None => rendered,
            }
        }
        RawCell::Text(_) | RawCell::Bool(_) => {
            let text = normalize_text(cell);
            if text.is_empty() {
                return sentinel.to_string();
            }
            reformat_yyyymmdd(&text).unwrap_or(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(cell: RawCell) -> String {
        normalize_date(&cell, &SerialWindow::default(), "N/A")
    }

    #[test]
    fn eight_digit_strings_reformat_positionally() {
        assert_eq!(norm(RawCell::text("20240315")), "03/15/2024");
        assert_eq!(norm(RawCell::text(" 20231399 ")), "13/99/2023");
        assert_eq!(norm(RawCell::Number(20240101.0)), "01/01/2024");
    }

    #[test]
    fn serial_dates_use_the_1900_epoch() {
        assert_eq!(norm(RawCell::Number(45000.0)), "03/15/2023");
        assert_eq!(norm(RawCell::Number(45000.75)), "03/15/2023");
    }

    #[test]
    fn serial_dates_in_the_1904_system() {
        let window = SerialWindow {
            system: DateSystem::Excel1904,
            ..SerialWindow::default()
        };
        // the two systems are 1462 days apart
        assert_eq!(
            normalize_date(&RawCell::Number(45000.0 - 1462.0), &window, "N/A"),
            "03/15/2023"
        );
    }

    #[test]
    fn numbers_outside_the_window_pass_through() {
        assert_eq!(norm(RawCell::Number(123.0)), "123");
        assert_eq!(norm(RawCell::Number(60000.0)), "60000");
    }

    #[test]
    fn serials_past_the_calendar_pass_through() {
        let window = SerialWindow {
            max: 1e17,
            ..SerialWindow::default()
        };
        assert_eq!(window.to_date(1e16), None);
        assert_eq!(
            normalize_date(&RawCell::Number(1e16), &window, "N/A"),
            "10000000000000000"
        );
    }

    #[test]
    fn native_dates_format_directly() {
        let d = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(norm(RawCell::date(d)), "07/04/2024");
    }

    #[test]
    fn free_text_and_empty() {
        assert_eq!(norm(RawCell::text("  next Tuesday ")), "next Tuesday");
        assert_eq!(norm(RawCell::text("01/02/2024")), "01/02/2024");
        assert_eq!(norm(RawCell::Empty), "N/A");
        assert_eq!(norm(RawCell::text("\u{00A0}")), "N/A");
        assert_eq!(norm(RawCell::Number(f64::NAN)), "N/A");
    }
}
