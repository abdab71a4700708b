//! Exponential Moving Average (EMA).
//!
//! Recursive, non-adjusted form:
//! EMA[0] = close[0]; EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! with alpha = 2 / (span + 1).
//! Lookback: 0.

use super::Indicator;

/// Smoothing factor for a span: 2 / (span + 1).
pub fn smoothing_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Non-adjusted EMA of an arbitrary series, seeded by its first value.
///
/// Shared by [`Ema`] and the RSI gain/loss averages.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = smoothing_alpha(span);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = None;
    for &v in values {
        let ema = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        result.push(ema);
        prev = Some(ema);
    }
    result
}

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        ema_of_series(closes, self.span)
            .into_iter()
            .map(Some)
            .collect()
    }
}
