//! Relative Strength Index (RSI).
//!
//! Gains and losses are smoothed with the non-adjusted EMA recurrence
//! (alpha = 2 / (span + 1)), seeded at row 0 where there is no prior close and
//! so no movement: gain = loss = 0.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: 1.
//! Edge cases: avg_loss == 0 → 100; avg_gain == avg_loss == 0 → 50.

use super::{ema_of_series, Indicator};

#[derive(Debug, Clone)]
pub struct Rsi {
    span: usize,
    name: String,
}

impl Rsi {
    pub fn new(span: usize) -> Self {
        Self {
            span,
            name: format!("rsi_{span}"),
        }
    }

    /// Smoothed (avg_gain, avg_loss) per row.
    pub fn averages(&self, closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = closes.len();
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let delta = closes[i] - closes[i - 1];
            gains[i] = delta.max(0.0);
            losses[i] = (-delta).max(0.0);
        }
        (
            ema_of_series(&gains, self.span),
            ema_of_series(&losses, self.span),
        )
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let (avg_gain, avg_loss) = self.averages(closes);
        avg_gain
            .iter()
            .zip(&avg_loss)
            .enumerate()
            .map(|(i, (&g, &l))| (i > 0).then(|| rsi_from_averages(g, l)))
            .collect()
    }
}

/// RSI from smoothed averages, resolving the zero-denominator cases.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
