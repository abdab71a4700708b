//! Dataset fingerprinting.
//!
//! A BLAKE3 digest over the dates and exact close bit patterns of a price
//! series. Identical inputs always produce identical fingerprints, so two
//! analyses can be compared without diffing their rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::PriceSeries;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesFingerprint(pub String);

impl SeriesFingerprint {
    pub fn of(symbol: &str, series: &PriceSeries) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(symbol.as_bytes());
        for point in series.points() {
            hasher.update(point.date.to_string().as_bytes());
            hasher.update(&point.close.to_le_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for SeriesFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
