use serde::{Deserialize, Serialize};

use super::{RowContext, Strategy};
use crate::schema::ColumnRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStrategy {
    /// The cell in the resolved account column, if it fits the pattern.
    DeclaredColumn,
    /// The first cell anywhere in the row that fits the pattern. Layout
    /// drift moves the account cell around but never changes its shape.
    RowScan,
}

impl AccountStrategy {
    pub const DEFAULT_ORDER: [AccountStrategy; 2] =
        [AccountStrategy::DeclaredColumn, AccountStrategy::RowScan];
}

impl Strategy for AccountStrategy {
    fn attempt(&self, ctx: &RowContext<'_>) -> Option<String> {
        match self {
            AccountStrategy::DeclaredColumn => {
                ctx.pattern.match_cell(ctx.cell(ColumnRole::AccountNumber))
            }
            AccountStrategy::RowScan => ctx.row.iter().find_map(|c| ctx.pattern.match_cell(c)),
        }
    }
}
