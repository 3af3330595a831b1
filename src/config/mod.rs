use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::LedgerError,
};

/// Tunables for the derived-state engine. Defaults reproduce the stock rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub alerts: AlertThresholds,
    pub pulse: PulseSettings,
    /// Daily turnover at which a bucket's flow intensity saturates.
    pub daily_flow_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            alerts: AlertThresholds::default(),
            pulse: PulseSettings::default(),
            daily_flow_scale: 5_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertThresholds {
    /// `|amount|` strictly above this trips LargeTransaction.
    pub large_transaction: f64,
    /// Relative deviation from the category average that trips UnusualSpending.
    pub unusual_deviation: f64,
    /// Recent/previous income ratio below which IncomeDrop trips.
    pub income_drop_ratio: f64,
    /// Expense/income ratio above which BudgetExceeded trips.
    pub budget_ratio: f64,
    pub income_window_days: i64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            large_transaction: 1_000.0,
            unusual_deviation: 0.5,
            income_drop_ratio: 0.7,
            budget_ratio: 1.2,
            income_window_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PulseSettings {
    pub lifetime_secs: f64,
    /// Amount at which pulse intensity saturates at 1.0.
    pub intensity_scale: f64,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            lifetime_secs: 3.0,
            intensity_scale: 1_000.0,
        }
    }
}

impl PulseSettings {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::milliseconds((self.lifetime_secs.max(0.0) * 1_000.0).round() as i64)
    }
}

/// Loads and saves [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, json.as_bytes())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.currency = "EUR".into();
        config.alerts.large_transaction = 500.0;
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "alerts": { "budget_ratio": 1.5 } }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.alerts.budget_ratio, 1.5);
        assert_eq!(config.alerts.large_transaction, 1_000.0);
        assert_eq!(config.pulse.lifetime(), chrono::Duration::seconds(3));
    }
}
