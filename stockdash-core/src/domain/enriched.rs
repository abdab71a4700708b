//! EnrichedSeries, the pipeline's per-row output.
//!
//! Derived columns are `Option<f64>`: `None` means "no value" (warm-up or no
//! prior row). NaN never appears in a finished series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the enriched series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub log_return: Option<f64>,
}

/// Input closes plus aligned indicator columns, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSeries {
    rows: Vec<EnrichedRow>,
    #[serde(skip)]
    index: HashMap<NaiveDate, usize>,
}

impl EnrichedSeries {
    pub(crate) fn from_rows(rows: Vec<EnrichedRow>) -> Self {
        let index = rows.iter().enumerate().map(|(i, r)| (r.date, i)).collect();
        Self { rows, index }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    pub fn row(&self, date: NaiveDate) -> Option<&EnrichedRow> {
        self.index.get(&date).map(|&i| &self.rows[i])
    }

    pub fn last(&self) -> Option<&EnrichedRow> {
        self.rows.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }

    pub fn sma(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.sma).collect()
    }

    pub fn ema(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.ema).collect()
    }

    pub fn rsi(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.rsi).collect()
    }

    pub fn log_returns(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.log_return).collect()
    }
}
