//! TOML-based tool configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level tool configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with [`ToolConfig::from_toml_file`] or use
/// [`ToolConfig::default`] for the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Report and usage-log file locations.
    pub storage: StorageConfig,
    /// Electricity pricing used by the portfolio analysis.
    pub pricing: PricingConfig,
    /// Grid emission factors.
    pub emissions: EmissionsConfig,
    /// Market-data forecaster parameters.
    pub forecast: ForecastConfig,
}

/// Report and usage-log file locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Report store path (append-only text).
    pub report_path: String,
    /// Usage log path (CSV with `timestamp,kwh` header).
    pub usage_log_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            report_path: "report.txt".to_string(),
            usage_log_path: "energy_log.csv".to_string(),
        }
    }
}

/// Electricity pricing used by the portfolio analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Assumed unit price (EUR per kWh).
    pub price_per_kwh: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { price_per_kwh: 0.25 }
    }
}

/// Grid emission factors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionsConfig {
    /// Electricity emission factor (kg CO₂ per kWh).
    pub electricity_kg_per_kwh: f64,
}

impl Default for EmissionsConfig {
    fn default() -> Self {
        Self {
            electricity_kg_per_kwh: 0.233,
        }
    }
}

/// Market-data forecaster parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Trading pair symbol.
    pub symbol: String,
    /// Number of daily candles to request (clamped to 2..=1000 on fetch).
    pub days: usize,
    /// Fraction of rows used for training in the time-ordered split.
    pub train_ratio: f64,
    /// Daily-candles endpoint URL.
    pub endpoint: String,
    /// HTTP request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            symbol: "ETHUSDT".to_string(),
            days: 365,
            train_ratio: 0.8,
            endpoint: "https://api.binance.com/api/v3/klines".to_string(),
            timeout_secs: 20,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"forecast.train_ratio"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ToolConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.storage.report_path.is_empty() {
            errors.push(ConfigError {
                field: "storage.report_path".into(),
                message: "must not be empty".into(),
            });
        }
        if self.storage.usage_log_path.is_empty() {
            errors.push(ConfigError {
                field: "storage.usage_log_path".into(),
                message: "must not be empty".into(),
            });
        }
        if self.pricing.price_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "pricing.price_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if self.emissions.electricity_kg_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "emissions.electricity_kg_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let f = &self.forecast;
        if f.symbol.is_empty() {
            errors.push(ConfigError {
                field: "forecast.symbol".into(),
                message: "must not be empty".into(),
            });
        }
        if f.days < 2 {
            errors.push(ConfigError {
                field: "forecast.days".into(),
                message: "must be >= 2".into(),
            });
        }
        if !(f.train_ratio > 0.0 && f.train_ratio < 1.0) {
            errors.push(ConfigError {
                field: "forecast.train_ratio".into(),
                message: "must be in (0.0, 1.0)".into(),
            });
        }
        if f.endpoint.is_empty() {
            errors.push(ConfigError {
                field: "forecast.endpoint".into(),
                message: "must not be empty".into(),
            });
        }
        if f.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "forecast.timeout_secs".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
