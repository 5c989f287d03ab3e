// src/config.rs

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::debug;

use crate::cell::{
    account::DEFAULT_ACCOUNT_PATTERN, date_parser::MAX_SERIAL, DateSystem, SerialWindow,
};
use crate::error::ConfigError;
use crate::extract::{AccountStrategy, SponsorStrategy};
use crate::schema::{default_labels, default_sponsor_markers, ColumnRole, RoleLabels};

/// Column positions of the standard master sheet, used when no header is found.
pub fn default_columns() -> BTreeMap<ColumnRole, usize> {
    BTreeMap::from([
        (ColumnRole::Name, 1),
        (ColumnRole::BrochureSales, 3),
        (ColumnRole::DueDate, 4),
        (ColumnRole::DueAmount, 5),
        (ColumnRole::OverdueAmount, 7),
        (ColumnRole::AccountNumber, 11),
        (ColumnRole::Sponsor, 14),
    ])
}

/// Every tunable of a normalization run. Any field left out of a YAML file
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many leading rows may hold the header.
    pub header_scan_rows: usize,
    pub default_columns: BTreeMap<ColumnRole, usize>,
    pub labels: BTreeMap<ColumnRole, RoleLabels>,
    /// A header row has a cell containing this word (and no sponsor marker)...
    pub name_marker: String,
    /// ...or a cell containing one of these compound labels.
    pub header_markers: Vec<String>,
    pub sponsor_markers: Vec<String>,
    pub account_pattern: String,
    /// Deployments differ here: "N/A" or "NOT FOUND".
    pub account_sentinel: String,
    pub sentinel: String,
    pub date_system: DateSystem,
    /// Exclusive bounds for treating a number as a serial date.
    pub serial_min: f64,
    pub serial_max: f64,
    /// Names shorter than this are not records.
    pub min_name_len: usize,
    pub account_strategies: Vec<AccountStrategy>,
    pub sponsor_strategies: Vec<SponsorStrategy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let window = SerialWindow::default();
        Self {
            header_scan_rows: 30,
            default_columns: default_columns(),
            labels: default_labels(),
            name_marker: "name".into(),
            header_markers: vec!["last, first name".into(), "member name".into()],
            sponsor_markers: default_sponsor_markers(),
            account_pattern: DEFAULT_ACCOUNT_PATTERN.into(),
            account_sentinel: "N/A".into(),
            sentinel: "N/A".into(),
            date_system: window.system,
            serial_min: window.min,
            serial_max: window.max,
            min_name_len: 3,
            account_strategies: AccountStrategy::DEFAULT_ORDER.to_vec(),
            sponsor_strategies: SponsorStrategy::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_yaml::from_str(s)?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(cfg)
    }

    pub fn serial_window(&self) -> SerialWindow {
        SerialWindow {
            system: self.date_system,
            min: self.serial_min,
            max: self.serial_max,
        }
    }

    /// Checks that do not need the regex compiled; `RosterEngine::new` runs
    /// these and then compiles the pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.serial_min, self.serial_max);
        let in_calendar = max <= MAX_SERIAL + 1.0;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max && in_calendar) {
            return Err(ConfigError::InvalidSerialRange { min, max });
        }
        if self.account_strategies.is_empty() {
            return Err(ConfigError::NoStrategies {
                field: "account_strategies",
            });
        }
        if self.sponsor_strategies.is_empty() {
            return Err(ConfigError::NoStrategies {
                field: "sponsor_strategies",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_yaml_keeps_defaults() -> Result<()> {
        let cfg = EngineConfig::from_yaml_str(
            "header_scan_rows: 5\naccount_sentinel: NOT FOUND\ndate_system: excel1904\n",
        )?;
        assert_eq!(cfg.header_scan_rows, 5);
        assert_eq!(cfg.account_sentinel, "NOT FOUND");
        assert_eq!(cfg.date_system, DateSystem::Excel1904);
        assert_eq!(cfg.default_columns[&ColumnRole::AccountNumber], 11);
        assert_eq!(cfg.sponsor_strategies.len(), 3);
        Ok(())
    }

    #[test]
    fn strategy_order_and_columns_from_yaml() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(
            tmp,
            "default_columns:\n  name: 0\n  sponsor: 9\naccount_strategies: [row_scan]\nsponsor_strategies: [right_of_last_account]"
        )?;
        let cfg = EngineConfig::load(tmp.path())?;
        assert_eq!(cfg.default_columns[&ColumnRole::Name], 0);
        assert_eq!(cfg.default_columns.get(&ColumnRole::DueDate), None);
        assert_eq!(cfg.account_strategies, vec![AccountStrategy::RowScan]);
        assert_eq!(
            cfg.sponsor_strategies,
            vec![SponsorStrategy::RightOfLastAccount]
        );
        Ok(())
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.serial_min = 70_000.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSerialRange { .. })
        ));

        let mut cfg = EngineConfig::default();
        cfg.serial_max = 1e17;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSerialRange { .. })
        ));

        let mut cfg = EngineConfig::default();
        cfg.sponsor_strategies.clear();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NoStrategies { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            EngineConfig::load("/no/such/roster.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
