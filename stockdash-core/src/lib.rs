//! stockdash core: daily price series in, indicators and summary metrics out.
//!
//! - Domain types (price series, enriched series)
//! - Data providers (Yahoo Finance, CSV import, synthetic)
//! - Indicators (SMA, EMA, RSI, log return)
//! - Summary metrics (total return, annualized volatility, last RSI)
//! - The pipeline that ties them together, plus request orchestration

pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod indicators;
pub mod metrics;
pub mod pipeline;

pub use analysis::{
    analyze, analyze_series, Analysis, AnalysisError, AnalysisRequest, RequestError,
};
pub use config::{DashboardConfig, IndicatorConfig};
pub use pipeline::{compute, HistoryWarning, PipelineError, PipelineOutput};
