//! Domain types for stockdash

pub mod enriched;
pub mod series;

pub use enriched::{EnrichedRow, EnrichedSeries};
pub use series::{PricePoint, PriceSeries, SeriesError};
