use crate::grid::RawCell;

/// Invisible or exotic spacing that office exports leave in names.
/// `char::is_whitespace` misses the zero-width ones.
fn is_spacing(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{200B}' | '\u{180E}' | '\u{FEFF}')
}

/// Any cell → trimmed string with every whitespace variant folded to `' '`.
pub fn normalize_text(cell: &RawCell) -> String {
    let raw = match cell {
        RawCell::Empty => return String::new(),
        RawCell::Text(s) => s.clone(),
        other => other.to_string(),
    };
    let folded: String = raw
        .chars()
        .map(|c| if is_spacing(c) { ' ' } else { c })
        .collect();
    folded.trim().to_string()
}

/// True for strings like `"12"`, `"-3.5"` or `"1,200"`: digits plus number
/// punctuation only. Such values are never accepted as a sponsor name.
pub fn is_purely_numeric(s: &str) -> bool {
    let s = s.trim();
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+' | ' '))
}

pub fn has_alphabetic(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}
