//! The indicator pipeline.
//!
//! `compute` is a pure function: a validated price series in, an enriched
//! series plus summary metrics out. Passes run in a fixed order:
//! validation → SMA/EMA → RSI → log returns → summary.
//!
//! Outcomes are explicit:
//! - zero rows → `PipelineError::EmptyData`
//! - a non-positive or non-finite close → `PipelineError::DataQuality`,
//!   raised before any indicator runs
//! - short history → `HistoryWarning`s alongside a normal result

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, IndicatorConfig};
use crate::domain::{EnrichedRow, EnrichedSeries, PriceSeries};
use crate::indicators::{Ema, Indicator, LogReturn, Rsi, Sma};
use crate::metrics::SummaryMetrics;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("no price data to analyze")]
    EmptyData,

    #[error("invalid close {close} on {date} (row {index}): must be finite and positive")]
    DataQuality {
        index: usize,
        date: NaiveDate,
        close: f64,
    },

    #[error("invalid indicator configuration: {0}")]
    Config(String),
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Config(e.to_string())
    }
}

/// Output that is only warm-up values because the window is short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOutput {
    Sma,
    Rsi,
    TotalReturn,
    Volatility,
}

/// Non-fatal: the caller should render "no value" markers for `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryWarning {
    pub output: HistoryOutput,
    /// Rows needed for a meaningful value.
    pub required: usize,
    pub available: usize,
}

impl fmt::Display for HistoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.output {
            HistoryOutput::Sma => "moving average",
            HistoryOutput::Rsi => "RSI",
            HistoryOutput::TotalReturn => "total return",
            HistoryOutput::Volatility => "volatility",
        };
        write!(
            f,
            "insufficient history for {what}: need {} rows, have {}",
            self.required, self.available
        )
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub series: EnrichedSeries,
    pub summary: SummaryMetrics,
    pub warnings: Vec<HistoryWarning>,
}

/// Reject the first close that is not finite and positive.
pub fn validate_prices(series: &PriceSeries) -> Result<(), PipelineError> {
    match series
        .points()
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.close.is_finite() && p.close > 0.0))
    {
        Some((index, p)) => Err(PipelineError::DataQuality {
            index,
            date: p.date,
            close: p.close,
        }),
        None => Ok(()),
    }
}

/// Run every pass over `series`.
pub fn compute(
    series: &PriceSeries,
    config: &IndicatorConfig,
) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;
    if series.is_empty() {
        return Err(PipelineError::EmptyData);
    }
    validate_prices(series)?;

    let closes = series.closes();
    debug!(rows = closes.len(), ?config, "running indicator pipeline");

    let sma = Sma::new(config.sma_period).compute(&closes);
    let ema = Ema::new(config.ema_span).compute(&closes);
    let rsi = Rsi::new(config.rsi_span).compute(&closes);
    let log_returns = LogReturn.compute(&closes);

    let rows = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| EnrichedRow {
            date: p.date,
            close: p.close,
            sma: sma[i],
            ema: ema[i],
            rsi: rsi[i],
            log_return: log_returns[i],
        })
        .collect();
    let enriched = EnrichedSeries::from_rows(rows);

    let summary = SummaryMetrics::compute(&enriched, config.periods_per_year);
    let warnings = history_warnings(closes.len(), config);
    for w in &warnings {
        debug!(warning = %w, "short history");
    }

    Ok(PipelineOutput {
        series: enriched,
        summary,
        warnings,
    })
}

fn history_warnings(rows: usize, config: &IndicatorConfig) -> Vec<HistoryWarning> {
    // RSI is meaningful once `rsi_span` deltas have been smoothed
    [
        (HistoryOutput::Sma, config.sma_period),
        (HistoryOutput::Rsi, config.rsi_span + 1),
        (HistoryOutput::TotalReturn, 2),
        (HistoryOutput::Volatility, 3),
    ]
    .into_iter()
    .filter(|&(_, required)| rows < required)
    .map(|(output, required)| HistoryWarning {
        output,
        required,
        available: rows,
    })
    .collect()
}
