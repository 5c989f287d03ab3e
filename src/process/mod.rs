// src/process/mod.rs

pub mod builder;
pub mod record;
pub mod search;

pub use builder::RosterEngine;
pub use record::{CanonicalRecord, Roster, RosterReport};
pub use search::{search, MIN_SEARCH_LEN, SEARCH_LIMIT};
