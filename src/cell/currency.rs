use once_cell::sync::Lazy;
use regex::Regex;

use crate::grid::RawCell;

/// Longest numeric prefix, the way a lenient float parser reads `"12.5.3"` as 12.5.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)").expect("static regex"));

/// Strip everything but digits, `-` and `.`, then parse. Accounting-style
/// `(50.00)` is negative. Anything unparseable or non-finite is `0.0`.
pub fn normalize_currency(cell: &RawCell) -> f64 {
    match cell {
        RawCell::Number(n) if n.is_finite() => *n,
        RawCell::Text(s) => parse_currency_text(s),
        _ => 0.0,
    }
}

fn parse_currency_text(raw: &str) -> f64 {
    let t = raw.trim();
    let parenthesized = t.contains('(') && t.ends_with(')');

    let stripped: String = t
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();

    let value = LEADING_NUMBER
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    if parenthesized && value > 0.0 {
        -value
    } else {
        value
    }
}

/// Display form used for amounts: two decimals, comma thousands separators.
pub fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
