// src/extract/mod.rs
//
// Per-row field extraction. Fields without a distinctive format (dates,
// amounts) are read straight from their resolved column; the account number
// and sponsor go through an ordered list of strategies, first hit wins.

pub mod account;
pub mod sponsor;

use tracing::trace;

use crate::cell::{normalize_currency, normalize_date, normalize_text, AccountPattern, SerialWindow};
use crate::grid::{cell_at, RawCell};
use crate::schema::{ColumnRole, SheetLayout};

pub use account::AccountStrategy;
pub use sponsor::SponsorStrategy;

/// What a strategy gets to look at.
pub struct RowContext<'a> {
    pub row: &'a [RawCell],
    pub layout: &'a SheetLayout,
    pub pattern: &'a AccountPattern,
}

impl<'a> RowContext<'a> {
    pub fn cell(&self, role: ColumnRole) -> &'a RawCell {
        cell_at(self.row, self.layout.columns.index(role))
    }

    pub fn text(&self, role: ColumnRole) -> String {
        normalize_text(self.cell(role))
    }
}

/// One way of producing a field value from a row.
pub trait Strategy: Copy + std::fmt::Debug {
    fn attempt(&self, ctx: &RowContext<'_>) -> Option<String>;
}

/// Run `strategies` in order and return the first confident value.
pub fn first_hit<S: Strategy>(strategies: &[S], ctx: &RowContext<'_>) -> Option<String> {
    strategies.iter().find_map(|s| {
        let hit = s.attempt(ctx);
        if hit.is_some() {
            trace!(strategy = ?s, "strategy hit");
        }
        hit
    })
}

/// Sentinels and rules the extractor needs from the engine configuration.
pub struct ExtractRules<'a> {
    pub pattern: &'a AccountPattern,
    pub serial_window: &'a SerialWindow,
    pub account_strategies: &'a [AccountStrategy],
    pub sponsor_strategies: &'a [SponsorStrategy],
    pub account_sentinel: &'a str,
    pub sentinel: &'a str,
}

/// All fields of one row, before the builder decides whether it is a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub name: String,
    pub account_number: String,
    pub due_date: String,
    pub due_amount: f64,
    pub overdue_amount: f64,
    pub brochure_sales: f64,
    pub sponsor: String,
}

/// Upper-cased display name; empty when the name cell is blank.
pub fn extract_name(row: &[RawCell], layout: &SheetLayout) -> String {
    normalize_text(cell_at(row, layout.columns.index(ColumnRole::Name))).to_uppercase()
}

pub fn extract_fields(row: &[RawCell], layout: &SheetLayout, rules: &ExtractRules<'_>) -> ExtractedFields {
    let ctx = RowContext {
        row,
        layout,
        pattern: rules.pattern,
    };

    let account_number = first_hit(rules.account_strategies, &ctx)
        .unwrap_or_else(|| rules.account_sentinel.to_string());
    let sponsor =
        first_hit(rules.sponsor_strategies, &ctx).unwrap_or_else(|| rules.sentinel.to_string());

    ExtractedFields {
        name: extract_name(row, layout),
        account_number,
        due_date: normalize_date(ctx.cell(ColumnRole::DueDate), rules.serial_window, rules.sentinel),
        due_amount: normalize_currency(ctx.cell(ColumnRole::DueAmount)),
        overdue_amount: normalize_currency(ctx.cell(ColumnRole::OverdueAmount)),
        brochure_sales: normalize_currency(ctx.cell(ColumnRole::BrochureSales)),
        sponsor,
    }
}
