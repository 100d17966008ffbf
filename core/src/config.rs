use crate::error::{CommissionError, CommissionResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMISSION_RATE: f64 = 0.05;
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Commission rule. One flat rate for every level of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionConfig {
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_rate() -> f64 {
    DEFAULT_COMMISSION_RATE
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            rate:           DEFAULT_COMMISSION_RATE,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl CommissionConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    /// In tests, use CommissionConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: CommissionConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CommissionResult<()> {
        if !(0.0..=1.0).contains(&self.rate) {
            return Err(CommissionError::InvalidConfig {
                reason: format!("rate {} outside [0, 1]", self.rate),
            });
        }
        // rust_decimal carries at most 28 fractional digits; money needs far fewer.
        if self.decimal_places > 10 {
            return Err(CommissionError::InvalidConfig {
                reason: format!("decimal_places {} exceeds 10", self.decimal_places),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_five_percent_to_cents() {
        let c = CommissionConfig::default();
        assert_eq!(c.rate, 0.05);
        assert_eq!(c.decimal_places, 2);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let c: CommissionConfig = serde_json::from_str(r#"{"rate": 0.1}"#).unwrap();
        assert_eq!(c.rate, 0.1);
        assert_eq!(c.decimal_places, 2);

        let c: CommissionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, CommissionConfig::default());
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let c = CommissionConfig { rate: 1.5, ..CommissionConfig::default() };
        assert!(matches!(c.validate(), Err(CommissionError::InvalidConfig { .. })));

        let c = CommissionConfig { rate: f64::NAN, ..CommissionConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join(format!("commission-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"rate": 0.07, "decimal_places": 3}"#).unwrap();
        let c = CommissionConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(c.rate, 0.07);
        assert_eq!(c.decimal_places, 3);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CommissionConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
