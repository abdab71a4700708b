//! CSV import provider.
//!
//! Reads daily bars from a local file with a header row. Column names are
//! matched case-insensitively and spaces become underscores, so both
//! `date,open,high,low,close,volume` and Yahoo's `Date,Open,High,Low,Close,Adj Close,Volume`
//! exports load. Only `date` and `close` are required.

use super::provider::{clip_and_sort, DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
    adj_close: Option<f64>,
}

impl From<CsvRow> for RawBar {
    fn from(row: CsvRow) -> Self {
        let close = row.close.unwrap_or(f64::NAN);
        RawBar {
            date: row.date,
            open: row.open.unwrap_or(f64::NAN),
            high: row.high.unwrap_or(f64::NAN),
            low: row.low.unwrap_or(f64::NAN),
            close,
            volume: row.volume.map(|v| v.max(0.0) as u64).unwrap_or(0),
            adj_close: row.adj_close.unwrap_or(close),
        }
    }
}

/// Provider backed by a single CSV file. The symbol argument only labels the
/// result; the file is the source.
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_bars(&self) -> Result<Vec<RawBar>, DataError> {
        let io_err = |e: &dyn std::fmt::Display| DataError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| io_err(&e))?;

        let headers: csv::StringRecord = reader
            .headers()
            .map_err(|e| io_err(&e))?
            .iter()
            .map(|h| h.to_ascii_lowercase().replace(' ', "_"))
            .collect();
        reader.set_headers(headers);

        let mut bars = Vec::new();
        for (i, record) in reader.deserialize::<CsvRow>().enumerate() {
            let row = record.map_err(|e| DataError::Csv {
                // header is line 1
                row: i + 2,
                reason: e.to_string(),
            })?;
            bars.push(RawBar::from(row));
        }
        Ok(bars)
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let bars = clip_and_sort(self.read_bars()?, start, end);
        debug!(symbol, path = %self.path.display(), bars = bars.len(), "loaded csv");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn loads_sorted_and_clipped() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-04,3,3,3,3,300\n\
             2024-01-02,1,1,1,1,100\n\
             2024-01-03,2,2,2,2,200\n\
             2024-01-10,9,9,9,9,900\n",
        );
        let provider = CsvProvider::new(file.path());
        let result = provider.fetch("TEST", jan(1), jan(5)).unwrap();
        let closes: Vec<f64> = result.bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(result.bars[0].volume, 100);
    }

    #[test]
    fn accepts_yahoo_export_headers() {
        let file = write_csv(
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.5,10.25,1000\n",
        );
        let bars = CsvProvider::new(file.path())
            .fetch("MSFT", jan(1), jan(31))
            .unwrap()
            .bars;
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.5);
        assert_eq!(bars[0].adj_close, 10.25);
    }

    #[test]
    fn close_only_file_loads() {
        let file = write_csv("date,close\n2024-01-02,42\n");
        let bars = CsvProvider::new(file.path())
            .fetch("X", jan(1), jan(31))
            .unwrap()
            .bars;
        assert_eq!(bars[0].close, 42.0);
        assert!(bars[0].open.is_nan());
    }

    #[test]
    fn empty_cell_becomes_nan_close() {
        let file = write_csv("date,close\n2024-01-02,\n");
        let bars = CsvProvider::new(file.path())
            .fetch("X", jan(1), jan(31))
            .unwrap()
            .bars;
        assert!(bars[0].close.is_nan());
    }

    #[test]
    fn bad_date_reports_row() {
        let file = write_csv("date,close\n2024-01-02,1\nnot-a-date,2\n");
        let err = CsvProvider::new(file.path())
            .fetch("X", jan(1), jan(31))
            .unwrap_err();
        assert!(matches!(err, DataError::Csv { row: 3, .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CsvProvider::new("/definitely/not/here.csv")
            .fetch("X", jan(1), jan(31))
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
