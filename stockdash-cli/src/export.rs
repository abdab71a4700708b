//! Enriched series export (CSV).

use anyhow::{Context, Result};
use std::path::Path;
use stockdash_core::config::IndicatorConfig;
use stockdash_core::domain::EnrichedSeries;

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write every row; undefined values are empty cells.
pub fn write_series_csv(
    path: &Path,
    series: &EnrichedSeries,
    indicators: &IndicatorConfig,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV {}", path.display()))?;

    writer.write_record([
        "date".to_string(),
        "close".to_string(),
        format!("sma_{}", indicators.sma_period),
        format!("ema_{}", indicators.ema_span),
        format!("rsi_{}", indicators.rsi_span),
        "log_return".to_string(),
    ])?;

    for row in series.rows() {
        writer.write_record([
            row.date.to_string(),
            row.close.to_string(),
            cell(row.sma),
            cell(row.ema),
            cell(row.rsi),
            cell(row.log_return),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write CSV {}", path.display()))?;
    Ok(())
}
