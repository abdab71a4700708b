//! stockdash CLI: fetch a symbol's daily prices and print its indicator dashboard.
//!
//! Commands:
//! - `analyze`: run the pipeline for one symbol/date range and print tiles + charts
//! - `config`: print the default configuration file

mod export;
mod present;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use stockdash_core::config::{DashboardConfig, ProviderConfig, ProviderKind};
use stockdash_core::data::{CsvProvider, DataProvider, SyntheticProvider, YahooProvider};
use stockdash_core::pipeline::PipelineError;
use stockdash_core::{analyze, AnalysisError, AnalysisRequest};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stockdash",
    about = "stockdash: daily price trend, momentum and risk dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Yahoo,
    Csv,
    Synthetic,
}

impl From<SourceArg> for ProviderKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Yahoo => ProviderKind::Yahoo,
            SourceArg::Csv => ProviderKind::Csv,
            SourceArg::Synthetic => ProviderKind::Synthetic,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Request and display flags. Each one that is set wins over the config file.
#[derive(Debug, Default, Args)]
struct RequestArgs {
    /// Ticker symbol (e.g., AAPL). Case-insensitive. Defaults to the config's symbol.
    symbol: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to the config's start date.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Hide the simple moving average in the trend chart.
    #[arg(long, default_value_t = false)]
    no_sma: bool,

    /// Hide the exponential moving average in the trend chart.
    #[arg(long, default_value_t = false)]
    no_ema: bool,

    /// Where prices come from.
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// CSV file for `--source csv`.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Rows of each chart table to print in text mode.
    #[arg(long)]
    tail: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one ticker over a date range.
    Analyze {
        #[command(flatten)]
        request: RequestArgs,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the enriched series to this CSV file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Print the default configuration file.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            request,
            config,
            format,
            export,
        } => {
            let mut dashboard = match &config {
                Some(path) => DashboardConfig::from_file(path)?,
                None => DashboardConfig::default(),
            };
            init_tracing(&dashboard.logging.level);
            if let Some(path) = &config {
                debug!(path = %path.display(), "loaded config");
            }

            apply_overrides(&mut dashboard, request);
            run_analyze(&dashboard, format, export)
        }
        Commands::Config => {
            print!("{}", DashboardConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

/// Merge command-line flags into the loaded configuration. A `--no-*` flag can
/// only hide a chart line; it never re-enables one the file turned off.
fn apply_overrides(dashboard: &mut DashboardConfig, args: RequestArgs) {
    if let Some(symbol) = args.symbol {
        dashboard.request.symbol = symbol;
    }
    if let Some(start) = args.start {
        dashboard.request.start = start;
    }
    if args.end.is_some() {
        dashboard.request.end = args.end;
    }
    dashboard.display.show_sma &= !args.no_sma;
    dashboard.display.show_ema &= !args.no_ema;
    if let Some(source) = args.source {
        dashboard.provider.kind = source.into();
    }
    if args.csv.is_some() {
        dashboard.provider.csv_path = args.csv;
    }
    if let Some(tail) = args.tail {
        dashboard.display.tail_rows = tail;
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_provider(config: &ProviderConfig) -> Result<Box<dyn DataProvider>> {
    Ok(match config.kind {
        ProviderKind::Yahoo => Box::new(YahooProvider::new(
            config.max_retries,
            Duration::from_secs(config.timeout_secs),
        )?),
        ProviderKind::Csv => {
            let path = config
                .csv_path
                .clone()
                .context("a CSV path is required with --source csv (use --csv <PATH>)")?;
            Box::new(CsvProvider::new(path))
        }
        ProviderKind::Synthetic => Box::new(SyntheticProvider::new()),
    })
}

fn run_analyze(
    dashboard: &DashboardConfig,
    format: OutputFormat,
    export: Option<PathBuf>,
) -> Result<()> {
    let end = dashboard
        .request
        .end
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let request = AnalysisRequest::new(&dashboard.request.symbol, dashboard.request.start, end)?;
    let provider = build_provider(&dashboard.provider)?;

    let analysis = match analyze(provider.as_ref(), &request, &dashboard.indicators) {
        Ok(analysis) => analysis,
        Err(e) if e.is_empty_data() => {
            eprintln!("{}", present::EMPTY_DATA_MESSAGE);
            std::process::exit(1);
        }
        Err(AnalysisError::Pipeline(e @ PipelineError::DataQuality { .. })) => {
            eprintln!("Data quality problem for {}: {e}", request.symbol);
            std::process::exit(2);
        }
        Err(e) => return Err(e).context(format!("analysis failed for {}", request.symbol)),
    };
    info!(
        rows = analysis.series.len(),
        fingerprint = %analysis.fingerprint.short(),
        "analysis complete"
    );

    match format {
        OutputFormat::Text => print!(
            "{}",
            present::render_text(&analysis, &dashboard.display, &dashboard.indicators)
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    if let Some(path) = export {
        export::write_series_csv(&path, &analysis.series, &dashboard.indicators)?;
        if format == OutputFormat::Text {
            println!("Series saved to: {}", path.display());
        }
    }

    Ok(())
}
