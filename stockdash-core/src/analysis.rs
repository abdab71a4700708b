//! Request → fetch → pipeline orchestration.
//!
//! `AnalysisRequest` is the explicit input (symbol and resolved date range);
//! `Analysis` is the explicit output handed to presentation.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::IndicatorConfig;
use crate::data::{DataError, DataProvider, DataSource};
use crate::domain::{EnrichedSeries, PriceSeries, SeriesError};
use crate::fingerprint::SeriesFingerprint;
use crate::metrics::SummaryMetrics;
use crate::pipeline::{self, HistoryWarning, PipelineError};

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("ticker symbol is empty")]
    EmptySymbol,

    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// One user request: a symbol over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisRequest {
    /// Trim and uppercase the symbol; require `start <= end`.
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Self, RequestError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(RequestError::EmptySymbol);
        }
        if start > end {
            return Err(RequestError::InvertedRange { start, end });
        }
        Ok(Self { symbol, start, end })
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("bad price series: {0}")]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AnalysisError {
    /// True when the provider had nothing for the symbol/range.
    pub fn is_empty_data(&self) -> bool {
        matches!(self, AnalysisError::Pipeline(PipelineError::EmptyData))
    }
}

/// Everything the presentation layer needs for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub request: AnalysisRequest,
    pub source: DataSource,
    pub fingerprint: SeriesFingerprint,
    pub summary: SummaryMetrics,
    pub warnings: Vec<HistoryWarning>,
    pub series: EnrichedSeries,
}

/// Run the pipeline over an already-fetched series.
pub fn analyze_series(
    request: &AnalysisRequest,
    source: DataSource,
    series: &PriceSeries,
    config: &IndicatorConfig,
) -> Result<Analysis, PipelineError> {
    let output = pipeline::compute(series, config)?;
    Ok(Analysis {
        request: request.clone(),
        source,
        fingerprint: SeriesFingerprint::of(&request.symbol, series),
        summary: output.summary,
        warnings: output.warnings,
        series: output.series,
    })
}

/// Fetch the request's bars from `provider` and run the pipeline.
pub fn analyze(
    provider: &dyn DataProvider,
    request: &AnalysisRequest,
    config: &IndicatorConfig,
) -> Result<Analysis, AnalysisError> {
    info!(
        symbol = %request.symbol,
        start = %request.start,
        end = %request.end,
        provider = provider.name(),
        "fetching prices"
    );
    let fetched = provider.fetch(&request.symbol, request.start, request.end)?;
    debug!(bars = fetched.bars.len(), "fetch complete");

    let series = PriceSeries::from_bars(&fetched.bars)?;
    Ok(analyze_series(request, fetched.source, &series, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FetchResult, RawBar, SyntheticProvider};

    struct FixedProvider(Vec<RawBar>);

    impl DataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(
            &self,
            symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<FetchResult, DataError> {
            Ok(FetchResult {
                symbol: symbol.to_string(),
                bars: self.0.clone(),
                source: DataSource::CsvImport,
            })
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> RawBar {
        RawBar {
            date: date(1, d),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1,
            adj_close: close,
        }
    }

    #[test]
    fn request_normalizes_symbol() {
        let req = AnalysisRequest::new("  msft ", date(1, 1), date(2, 1)).unwrap();
        assert_eq!(req.symbol, "MSFT");
    }

    #[test]
    fn request_rejects_empty_symbol_and_inverted_range() {
        assert_eq!(
            AnalysisRequest::new("   ", date(1, 1), date(2, 1)),
            Err(RequestError::EmptySymbol)
        );
        assert!(matches!(
            AnalysisRequest::new("SPY", date(2, 1), date(1, 1)),
            Err(RequestError::InvertedRange { .. })
        ));
    }

    #[test]
    fn empty_fetch_is_empty_data() {
        let req = AnalysisRequest::new("NOPE", date(1, 1), date(2, 1)).unwrap();
        let provider = FixedProvider(Vec::new());
        let err = analyze(&provider, &req, &IndicatorConfig::default()).unwrap_err();
        assert!(err.is_empty_data());
    }

    #[test]
    fn unordered_bars_are_a_series_error() {
        let req = AnalysisRequest::new("X", date(1, 1), date(2, 1)).unwrap();
        let provider = FixedProvider(vec![bar(3, 1.0), bar(2, 1.0)]);
        let err = analyze(&provider, &req, &IndicatorConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Series(_)));
    }

    #[test]
    fn nan_close_from_provider_is_data_quality() {
        let req = AnalysisRequest::new("X", date(1, 1), date(2, 1)).unwrap();
        let provider = FixedProvider(vec![bar(2, 10.0), bar(3, f64::NAN)]);
        let err = analyze(&provider, &req, &IndicatorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Pipeline(PipelineError::DataQuality { index: 1, .. })
        ));
    }

    #[test]
    fn synthetic_end_to_end() {
        let req = AnalysisRequest::new("spy", date(1, 1), date(6, 30)).unwrap();
        let analysis = analyze(&SyntheticProvider, &req, &IndicatorConfig::default()).unwrap();
        assert_eq!(analysis.request.symbol, "SPY");
        assert_eq!(analysis.source, DataSource::Synthetic);
        assert!(analysis.series.len() > 100);
        assert!(analysis.warnings.is_empty());
        assert!(analysis.summary.total_return.is_some());
        assert!(analysis.summary.annualized_volatility.is_some());
        assert!(analysis.summary.last_rsi.is_some());
    }
}
