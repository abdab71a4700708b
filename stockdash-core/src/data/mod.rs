//! Retrieval adapters: the provider trait and its implementations.
//!
//! The pipeline only consumes the closing column; providers hand back full
//! daily bars so the CLI can report what it fetched.

pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use csv_import::CsvProvider;
pub use provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
