//! Summary metrics: pure functions over a finished enriched series.
//!
//! Every metric is `None` when the window is too short to define it, never
//! zero and never NaN.

use serde::{Deserialize, Serialize};

use crate::domain::EnrichedSeries;

/// Period-level scalars shown next to the charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_return: Option<f64>,
    pub last_rsi: Option<f64>,
    pub annualized_volatility: Option<f64>,
}

impl SummaryMetrics {
    pub fn compute(series: &EnrichedSeries, periods_per_year: f64) -> Self {
        let closes = series.closes();
        let log_returns: Vec<f64> = series.log_returns().into_iter().flatten().collect();
        Self {
            total_return: total_return(&closes),
            last_rsi: series.last().and_then(|r| r.rsi),
            annualized_volatility: annualized_volatility(&log_returns, periods_per_year),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: last / first - 1.
///
/// `None` for fewer than 2 closes.
pub fn total_return(closes: &[f64]) -> Option<f64> {
    match closes {
        [first, .., last] => Some(last / first - 1.0),
        _ => None,
    }
}

/// Sample standard deviation (n - 1 denominator).
///
/// `None` for fewer than 2 values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

/// Annualized volatility: sample std dev of periodic log returns × √periods_per_year.
pub fn annualized_volatility(log_returns: &[f64], periods_per_year: f64) -> Option<f64> {
    sample_std_dev(log_returns).map(|sd| sd * periods_per_year.sqrt())
}
