//! PriceSeries, the pipeline's input.
//!
//! An ordered sequence of (date, close) records with a date → row lookup
//! table. Dates are strictly increasing; construction rejects anything else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::data::provider::RawBar;

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("duplicate date {date} at row {index}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("dates out of order at row {index}: {date} follows {previous}")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Daily closing prices, strictly increasing by date.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    index: HashMap<NaiveDate, usize>,
}

impl PriceSeries {
    /// Build a series, rejecting duplicate or out-of-order dates.
    ///
    /// Prices are not checked here; value validation belongs to the pipeline
    /// so that it can report data-quality problems distinctly.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        let mut index = HashMap::with_capacity(points.len());
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                let previous = points[i - 1].date;
                if point.date == previous {
                    return Err(SeriesError::DuplicateDate {
                        index: i,
                        date: point.date,
                    });
                }
                if point.date < previous {
                    return Err(SeriesError::OutOfOrder {
                        index: i,
                        date: point.date,
                        previous,
                    });
                }
            }
            index.insert(point.date, i);
        }
        Ok(Self { points, index })
    }

    /// Take the closing column of provider bars.
    pub fn from_bars(bars: &[RawBar]) -> Result<Self, SeriesError> {
        Self::new(
            bars.iter()
                .map(|b| PricePoint {
                    date: b.date,
                    close: b.close,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in row order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Row index for a date, if the series has one.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.index.get(&date).copied()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PricePoint> {
        self.index_of(date).map(|i| &self.points[i])
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
