//! Indicator implementations.
//!
//! Indicators are pure functions: closing prices in, one value per row out.
//! Warm-up rows are `None`. Inputs are assumed finite and positive; the
//! pipeline validates prices before any indicator runs.

pub mod ema;
pub mod log_return;
pub mod rsi;
pub mod sma;

pub use ema::{ema_of_series, smoothing_alpha, Ema};
pub use log_return::LogReturn;
pub use rsi::{rsi_from_averages, Rsi};
pub use sma::Sma;

/// Trait for per-row indicators.
///
/// `compute` returns a vector of the same length as `closes`. The first
/// `lookback()` values are `None`.
///
/// No value at row t may depend on prices after row t.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading rows without a value.
    fn lookback(&self) -> usize;

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    /// Truncating the input must not change any earlier value.
    #[test]
    fn no_lookahead() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0)
            .collect();
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(10)),
            Box::new(Ema::new(20)),
            Box::new(Rsi::new(14)),
            Box::new(LogReturn),
        ];
        for ind in &indicators {
            let full = ind.compute(&closes);
            let truncated = ind.compute(&closes[..50]);
            assert_eq!(&full[..50], &truncated[..], "{} looks ahead", ind.name());
        }
    }

    #[test]
    fn lookback_rows_are_none() {
        let closes = vec![10.0; 30];
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(10)),
            Box::new(Ema::new(20)),
            Box::new(Rsi::new(14)),
            Box::new(LogReturn),
        ];
        for ind in &indicators {
            let out = ind.compute(&closes);
            assert!(
                out[..ind.lookback()].iter().all(Option::is_none),
                "{}",
                ind.name()
            );
            assert!(
                out[ind.lookback()..].iter().all(Option::is_some),
                "{}",
                ind.name()
            );
        }
    }
}
