//! Presentation: metric tiles, chart columns, and the text dashboard.
//!
//! Everything here is a pure function of an `Analysis` so it can be tested
//! without a terminal.

use chrono::NaiveDate;
use stockdash_core::config::{DisplayConfig, IndicatorConfig};
use stockdash_core::domain::EnrichedSeries;
use stockdash_core::metrics::SummaryMetrics;
use stockdash_core::Analysis;

/// Shown in place of an undefined value.
pub const NO_VALUE: &str = "n/a";

pub const EMPTY_DATA_MESSAGE: &str = "Could not retrieve data for this ticker/date range.";

/// Fraction as a percentage with two decimals: 0.1 → "10.00%".
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NO_VALUE.to_string(),
    }
}

/// Plain number with two decimals.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => NO_VALUE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
}

pub fn metric_tiles(summary: &SummaryMetrics, indicators: &IndicatorConfig) -> Vec<MetricTile> {
    vec![
        MetricTile {
            label: "Total Return".to_string(),
            value: format_percent(summary.total_return),
        },
        MetricTile {
            label: format!("Current {}-Day RSI", indicators.rsi_span),
            value: format_number(summary.last_rsi),
        },
        MetricTile {
            label: "Annualized Volatility".to_string(),
            value: format_percent(summary.annualized_volatility),
        },
    ]
}

/// One named line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Date axis plus one or more aligned columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: &'static str,
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<ChartColumn>,
}

/// Close, then SMA and EMA when their toggles are on.
pub fn trend_chart(
    series: &EnrichedSeries,
    display: &DisplayConfig,
    indicators: &IndicatorConfig,
) -> Chart {
    let mut columns = vec![ChartColumn {
        name: "close".to_string(),
        values: series.closes().into_iter().map(Some).collect(),
    }];
    if display.show_sma {
        columns.push(ChartColumn {
            name: format!("sma_{}", indicators.sma_period),
            values: series.sma(),
        });
    }
    if display.show_ema {
        columns.push(ChartColumn {
            name: format!("ema_{}", indicators.ema_span),
            values: series.ema(),
        });
    }
    Chart {
        title: "Price and Trend",
        dates: series.dates(),
        columns,
    }
}

pub fn momentum_chart(series: &EnrichedSeries, indicators: &IndicatorConfig) -> Chart {
    Chart {
        title: "Momentum (RSI)",
        dates: series.dates(),
        columns: vec![ChartColumn {
            name: format!("rsi_{}", indicators.rsi_span),
            values: series.rsi(),
        }],
    }
}

/// Last `tail` rows of a chart as a fixed-width table.
pub fn render_chart(chart: &Chart, tail: usize) -> String {
    let mut out = format!("### {}\n", chart.title);
    out.push_str(&format!("{:<12}", "date"));
    for col in &chart.columns {
        out.push_str(&format!("{:>12}", col.name));
    }
    out.push('\n');

    let start = chart.dates.len().saturating_sub(tail);
    for (i, date) in chart.dates.iter().enumerate().skip(start) {
        out.push_str(&format!("{:<12}", date.to_string()));
        for col in &chart.columns {
            out.push_str(&format!("{:>12}", format_number(col.values[i])));
        }
        out.push('\n');
    }
    out
}

/// The full text dashboard for one analysis.
pub fn render_text(
    analysis: &Analysis,
    display: &DisplayConfig,
    indicators: &IndicatorConfig,
) -> String {
    let req = &analysis.request;
    let mut out = format!(
        "Analysis for {} ({} to {}, {} rows)\n\n",
        req.symbol,
        req.start,
        req.end,
        analysis.series.len()
    );

    let tiles = metric_tiles(&analysis.summary, indicators);
    for tile in &tiles {
        out.push_str(&format!("{:<26}", tile.label));
    }
    out.push('\n');
    for tile in &tiles {
        out.push_str(&format!("{:<26}", tile.value));
    }
    out.push_str("\n\n");

    for warning in &analysis.warnings {
        out.push_str(&format!("note: {warning}\n"));
    }
    if !analysis.warnings.is_empty() {
        out.push('\n');
    }

    out.push_str(&render_chart(
        &trend_chart(&analysis.series, display, indicators),
        display.tail_rows,
    ));
    out.push('\n');
    out.push_str(&render_chart(
        &momentum_chart(&analysis.series, indicators),
        display.tail_rows,
    ));
    out.push_str("*Note: RSI above 70 is overbought, below 30 is oversold.\n\n");
    out.push_str(&format!("fingerprint: {}\n", analysis.fingerprint.short()));
    out
}
