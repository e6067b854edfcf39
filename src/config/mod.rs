use crate::core::aggregate::PayParams;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Effective configuration, after defaults and the user's file are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub rate_per_hour: f64,
    /// Fraction of gross pay that is kept, in (0, 1]. 0.80 means 20% withheld.
    pub net_rate: f64,
    /// Printed in the payment column of the monthly ledger.
    pub payment_method_label: String,
}

/// What a configuration file may contain. Every field is optional and
/// unknown keys (such as the old `ui` colour section) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(alias = "db_path")]
    pub database: Option<String>,
    pub rate_per_hour: Option<f64>,
    pub net_rate: Option<f64>,
    pub payment_method_label: Option<String>,
}

fn default_rate_per_hour() -> f64 {
    20.0
}
fn default_net_rate() -> f64 {
    0.80
}
fn default_payment_method_label() -> String {
    "Direct Deposit".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            rate_per_hour: default_rate_per_hour(),
            net_rate: default_net_rate(),
            payment_method_label: default_payment_method_label(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("worklogger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".worklogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("worklogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("worklogger.sqlite")
    }

    /// Overlay `partial` on top of `self`. Pure: no I/O, no validation.
    pub fn merge(self, partial: PartialConfig) -> Config {
        Config {
            database: partial.database.unwrap_or(self.database),
            rate_per_hour: partial.rate_per_hour.unwrap_or(self.rate_per_hour),
            net_rate: partial.net_rate.unwrap_or(self.net_rate),
            payment_method_label: partial
                .payment_method_label
                .unwrap_or(self.payment_method_label),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("database path must not be empty".into()));
        }
        if !self.rate_per_hour.is_finite() || self.rate_per_hour < 0.0 {
            return Err(AppError::Config(format!(
                "rate_per_hour must be a non-negative number, got {}",
                self.rate_per_hour
            )));
        }
        if !self.net_rate.is_finite() || self.net_rate <= 0.0 || self.net_rate > 1.0 {
            return Err(AppError::Config(format!(
                "net_rate must be a fraction in (0, 1], got {}",
                self.net_rate
            )));
        }
        Ok(())
    }

    /// Parse a YAML (or legacy JSON) document and merge it over the defaults.
    pub fn from_yaml_str(content: &str) -> AppResult<Config> {
        let partial: PartialConfig = if content.trim().is_empty() {
            PartialConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| AppError::Config(format!("invalid configuration file: {e}")))?
        };

        let mut cfg = Config::default().merge(partial);
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Config> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)
    }

    pub fn pay_params(&self) -> PayParams {
        PayParams {
            rate_per_hour: self.rate_per_hour,
            net_rate: self.net_rate,
        }
    }

    /// Initialize configuration directory, config file and database folder.
    /// In test mode the config file is left untouched.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            fs::write(Self::config_file(), self.to_yaml()?).map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = Path::new(&self.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_yaml_str("").unwrap();
        assert_eq!(cfg.rate_per_hour, 20.0);
        assert_eq!(cfg.net_rate, 0.80);
        assert_eq!(cfg.payment_method_label, "Direct Deposit");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = Config::from_yaml_str("rate_per_hour: 35.5\n").unwrap();
        assert_eq!(cfg.rate_per_hour, 35.5);
        assert_eq!(cfg.net_rate, 0.80);
        assert_eq!(cfg.database, Config::default().database);
    }

    #[test]
    fn merge_is_pure_overlay() {
        let base = Config {
            database: "/tmp/a.sqlite".into(),
            rate_per_hour: 10.0,
            net_rate: 0.5,
            payment_method_label: "Cash".into(),
        };
        let merged = base.clone().merge(PartialConfig {
            net_rate: Some(0.9),
            ..Default::default()
        });
        assert_eq!(merged.net_rate, 0.9);
        assert_eq!(merged.rate_per_hour, base.rate_per_hour);
        assert_eq!(merged.payment_method_label, "Cash");
    }

    #[test]
    fn legacy_json_config_is_accepted() {
        let json = r##"{
            "rate_per_hour": 25.0,
            "db_path": "/tmp/legacy/timelog.db",
            "window_title": "WorkLogger 2.0",
            "ui": { "bg_color": "#121212" }
        }"##;
        let cfg = Config::from_yaml_str(json).unwrap();
        assert_eq!(cfg.rate_per_hour, 25.0);
        assert_eq!(cfg.database, "/tmp/legacy/timelog.db");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for doc in ["net_rate: 0", "net_rate: 1.5", "rate_per_hour: -1", "database: ''"] {
            assert!(
                matches!(Config::from_yaml_str(doc), Err(AppError::Config(_))),
                "accepted {doc:?}"
            );
        }
    }
}
