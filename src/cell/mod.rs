// src/cell/mod.rs
//
// Single-cell coercions. Everything here is pure and never fails: a cell that
// will not coerce gets the documented default instead.

pub mod account;
pub mod currency;
pub mod date_parser;
pub mod text;

pub use account::AccountPattern;
pub use currency::{format_amount, normalize_currency};
pub use date_parser::{normalize_date, DateSystem, SerialWindow};
pub use text::{has_alphabetic, is_purely_numeric, normalize_text};
