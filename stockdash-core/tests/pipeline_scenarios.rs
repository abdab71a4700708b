//! End-to-end scenarios for the indicator pipeline, driven through the public
//! API the CLI uses.

use chrono::NaiveDate;
use stockdash_core::data::{CsvProvider, DataSource};
use stockdash_core::domain::{PricePoint, PriceSeries};
use stockdash_core::pipeline::{compute, HistoryOutput, PipelineError};
use stockdash_core::{analyze, AnalysisRequest, IndicatorConfig};

fn series(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: base + chrono::Duration::days(i as i64),
                close,
            })
            .collect(),
    )
    .unwrap()
}

fn approx(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() < eps,
        "actual={actual}, expected={expected}"
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + (i as f64 * 0.21).sin() * 7.0 + i as f64 * 0.05)
        .collect();
    let s = series(&closes);
    let config = IndicatorConfig::default();
    let a = serde_json::to_string(&compute(&s, &config).unwrap()).unwrap();
    let b = serde_json::to_string(&compute(&s, &config).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn row_count_and_order_preserved() {
    let closes = [10.0, 10.5, 9.75, 11.0, 10.25, 12.0, 11.5];
    let s = series(&closes);
    let out = compute(&s, &IndicatorConfig::default()).unwrap();
    assert_eq!(out.series.len(), closes.len());
    assert_eq!(out.series.closes(), closes.to_vec());
    let input_dates: Vec<NaiveDate> = s.points().iter().map(|p| p.date).collect();
    assert_eq!(out.series.dates(), input_dates);
}

#[test]
fn ema_seeding_property() {
    let out = compute(&series(&[87.0, 93.0, 91.0]), &IndicatorConfig::default()).unwrap();
    let rows = out.series.rows();
    assert_eq!(rows[0].ema, Some(87.0));
    approx(
        rows[1].ema.unwrap(),
        (2.0 / 21.0) * 93.0 + (19.0 / 21.0) * 87.0,
        1e-12,
    );
}

#[test]
fn rsi_is_100_on_rising_prices() {
    let closes: Vec<f64> = (0..15).map(|i| 20.0 + i as f64).collect();
    let out = compute(&series(&closes), &IndicatorConfig::default()).unwrap();
    let rsi = out.series.rsi();
    assert_eq!(rsi[0], None);
    for v in &rsi[1..] {
        assert_eq!(*v, Some(100.0));
    }
}

#[test]
fn sma_window_with_sixty_constant_rows() {
    let out = compute(&series(&[250.0; 60]), &IndicatorConfig::default()).unwrap();
    let sma = out.series.sma();
    assert!(sma[..49].iter().all(Option::is_none));
    assert_eq!(sma[49], Some(250.0));
}

#[test]
fn total_return_is_ten_percent() {
    let out = compute(&series(&[100.0, 110.0]), &IndicatorConfig::default()).unwrap();
    approx(out.summary.total_return.unwrap(), 0.10, 1e-12);
}

#[test]
fn volatility_of_oscillating_prices() {
    let out = compute(
        &series(&[100.0, 105.0, 100.0, 105.0, 100.0]),
        &IndicatorConfig::default(),
    )
    .unwrap();
    let r = (105.0_f64 / 100.0).ln();
    // mean 0, sample variance 4r²/3
    let expected = (4.0 * r * r / 3.0).sqrt() * 252.0_f64.sqrt();
    approx(out.summary.annualized_volatility.unwrap(), expected, 1e-9);
}

#[test]
fn empty_input_returns_sentinel() {
    let result = compute(&series(&[]), &IndicatorConfig::default());
    assert_eq!(result, Err(PipelineError::EmptyData));
}

#[test]
fn zero_or_negative_price_is_a_data_quality_error() {
    let config = IndicatorConfig::default();
    for bad in [0.0, -12.5] {
        let result = compute(&series(&[100.0, 101.0, bad, 99.0]), &config);
        match result {
            Err(PipelineError::DataQuality { index, close, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(close, bad);
            }
            other => panic!("expected DataQuality, got {other:?}"),
        }
    }
}

#[test]
fn short_series_warns_but_succeeds() {
    let out = compute(&series(&[5.0, 5.5, 6.0]), &IndicatorConfig::default()).unwrap();
    let outputs: Vec<HistoryOutput> = out.warnings.iter().map(|w| w.output).collect();
    assert_eq!(outputs, vec![HistoryOutput::Sma, HistoryOutput::Rsi]);
    assert!(out.summary.annualized_volatility.is_some());
}

#[test]
fn enriched_rows_are_looked_up_by_date() {
    let s = series(&[10.0, 11.0, 12.0]);
    let out = compute(&s, &IndicatorConfig::default()).unwrap();
    let date = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
    let row = out.series.row(date).unwrap();
    assert_eq!(row.close, 11.0);
    assert!(row.log_return.is_some());
    let before_start = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
    assert!(out.series.row(before_start).is_none());
}

#[test]
fn csv_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("msft.csv");
    let mut contents = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for i in 0..70 {
        let close = 300.0 + i as f64;
        contents.push_str(&format!(
            "{},{close},{close},{close},{close},{close},1000\n",
            base + chrono::Duration::days(i)
        ));
    }
    std::fs::write(&path, contents).unwrap();

    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let request = AnalysisRequest::new("msft", base, end).unwrap();
    let provider = CsvProvider::new(&path);
    let analysis = analyze(&provider, &request, &IndicatorConfig::default()).unwrap();

    assert_eq!(analysis.source, DataSource::CsvImport);
    assert_eq!(analysis.series.len(), 70);
    assert_eq!(analysis.summary.last_rsi, Some(100.0));
    let total_return = analysis.summary.total_return.unwrap();
    approx(total_return, 369.0 / 300.0 - 1.0, 1e-12);
    assert!(analysis.warnings.is_empty());
}

#[test]
fn csv_range_without_rows_is_empty_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p.csv");
    std::fs::write(&path, "date,close\n2020-03-02,10\n").unwrap();
    let request = AnalysisRequest::new(
        "X",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    )
    .unwrap();
    let provider = CsvProvider::new(&path);
    let err = analyze(&provider, &request, &IndicatorConfig::default()).unwrap_err();
    assert!(err.is_empty_data());
}
