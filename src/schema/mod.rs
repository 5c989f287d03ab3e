pub mod labels;
pub mod resolve;
pub mod types;

pub use labels::{default_labels, default_sponsor_markers, RoleLabels};
pub use resolve::{find_header_row, header_texts, resolve_layout};
pub use types::{ColumnEntry, ColumnMap, ColumnRole, Provenance, SheetLayout};
