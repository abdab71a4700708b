//! Log return: ln(close[t]) - ln(close[t-1]).
//! Lookback: 1.

use super::Indicator;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogReturn;

impl Indicator for LogReturn {
    fn name(&self) -> &str {
        "log_return"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; closes.len()];
        for i in 1..closes.len() {
            result[i] = Some(closes[i].ln() - closes[i - 1].ln());
        }
        result
    }
}
