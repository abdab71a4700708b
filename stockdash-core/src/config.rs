//! Configuration: indicator parameters and the dashboard file.
//!
//! Periods, spans and the annualization constant are policy, not formula
//! literals, so they live here. The dashboard file is TOML; every field has a
//! default so an empty file (or no file) is valid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("invalid indicator setting: {0}")]
    Invalid(String),
}

/// Indicator parameters used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// SMA window length.
    pub sma_period: usize,
    /// EMA span (alpha = 2 / (span + 1)).
    pub ema_span: usize,
    /// RSI smoothing span.
    pub rsi_span: usize,
    /// Trading periods per year for annualizing volatility.
    pub periods_per_year: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: 50,
            ema_span: 20,
            rsi_span: 14,
            periods_per_year: 252.0,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("sma_period", self.sma_period),
            ("ema_span", self.ema_span),
            ("rsi_span", self.rsi_span),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
            }
        }
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "periods_per_year must be positive, got {}",
                self.periods_per_year
            )));
        }
        Ok(())
    }
}

/// Which provider serves the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub csv_path: Option<PathBuf>,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            csv_path: None,
            max_retries: 3,
            timeout_secs: 30,
        }
    }
}

/// Default request: the symbol and start date the dashboard opens with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub symbol: String,
    pub start: NaiveDate,
    /// `None` means "today".
    pub end: Option<NaiveDate>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            symbol: "MSFT".to_string(),
            start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            end: None,
        }
    }
}

/// Display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_sma: bool,
    pub show_ema: bool,
    /// Trailing rows of the chart table printed in text mode.
    pub tail_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_sma: true,
            show_ema: true,
            tail_rows: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Whole dashboard configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub request: RequestDefaults,
    pub display: DisplayConfig,
    pub indicators: IndicatorConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.indicators.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
