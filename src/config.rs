use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::LoadError;
use crate::processing::ratio::TrendRatioPolicy;
use crate::state::period_series::Period;

/// Settings for a trends run, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub period: Period,
    pub ratio: TrendRatioPolicy,
    /// Decimal places shown in the statistics readout.
    pub readout_decimals: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            period: Period::default(),
            ratio: TrendRatioPolicy::default(),
            readout_decimals: 1,
        }
    }
}

impl TrendConfig {
    /// Parse and validate a config document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.ratio.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!("Config loaded from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendError;

    #[test]
    fn test_defaults() {
        let config = TrendConfig::default();
        assert_eq!(config.period, Period::Monthly);
        assert_eq!(config.ratio, TrendRatioPolicy::Upstream);
        assert_eq!(config.readout_decimals, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TrendConfig::from_json(r#"{"period": "weekly"}"#).unwrap();
        assert_eq!(config.period, Period::Weekly);
        assert_eq!(config.ratio, TrendRatioPolicy::Upstream);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "period": "daily",
            "ratio": {"kind": "fitted_change", "epsilon": 0.01},
            "readout_decimals": 2
        }"#;
        let config = TrendConfig::from_json(json).unwrap();
        assert_eq!(config.period, Period::Daily);
        assert_eq!(config.ratio, TrendRatioPolicy::FittedChange { epsilon: 0.01 });
        assert_eq!(config.readout_decimals, 2);
    }

    #[test]
    fn test_rejects_unknown_period() {
        assert!(TrendConfig::from_json(r#"{"period": "hourly"}"#).is_err());
    }

    #[test]
    fn test_rejects_non_positive_epsilon() {
        let json = r#"{"ratio": {"kind": "fitted_change", "epsilon": 0.0}}"#;
        assert!(matches!(
            TrendConfig::from_json(json),
            Err(LoadError::Trend(TrendError::InvalidInput { .. }))
        ));
        let json = r#"{"ratio": {"kind": "fitted_change", "epsilon": -0.5}}"#;
        assert!(TrendConfig::from_json(json).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trends.json");
        std::fs::write(&path, r#"{"readout_decimals": 3}"#).unwrap();
        assert_eq!(TrendConfig::load(&path).unwrap().readout_decimals, 3);
    }
}
