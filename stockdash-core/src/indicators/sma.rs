//! Simple Moving Average (SMA).
//!
//! Mean of the trailing `period` closes. Each window is summed directly so a
//! value never depends on rounding carried over from earlier windows.
//! Lookback: period - 1.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    /// `period` must be at least 1; `IndicatorConfig::validate` enforces this
    /// for configured pipelines.
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; closes.len()];
        for (i, window) in closes.windows(self.period).enumerate() {
            result[i + self.period - 1] = Some(window.iter().sum::<f64>() / self.period as f64);
        }
        result
    }
}
