use clap::Parser;
use hkipo_rs::{HeaderStyle, PipelineConfig, run};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hkipo",
    version,
    about = "Consolidate HKEX new listing reports into one IPO dataset"
)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Report export to read (repeatable, read in order)
    #[arg(short = 'i', long = "input")]
    inputs: Vec<PathBuf>,

    /// Directory relative inputs are resolved against
    #[arg(long = "base-dir")]
    base_dir: Option<PathBuf>,

    /// Read NLR{year}_Chi.xlsx for each year in FIRST..=LAST, e.g. 2020..=2024
    #[arg(long = "years", value_parser = parse_years)]
    years: Option<(i32, i32)>,

    /// Output path; .xlsx writes a workbook, anything else CSV
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Title lines preceding the header line in each report
    #[arg(long = "header-row")]
    header_row: Option<usize>,

    /// Output header language
    #[arg(long = "headers", value_enum)]
    headers: Option<HeaderStyle>,

    /// Skip first-day price lookups
    #[arg(long = "no-prices")]
    no_prices: bool,

    /// Timeout per price lookup, in seconds
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,
}

fn parse_years(s: &str) -> Result<(i32, i32), String> {
    let (first, last) = s
        .split_once("..=")
        .or_else(|| s.split_once('-'))
        .unwrap_or((s, s));
    let first: i32 = first
        .trim()
        .parse()
        .map_err(|e| format!("bad year '{first}': {e}"))?;
    let last: i32 = last
        .trim()
        .parse()
        .map_err(|e| format!("bad year '{last}': {e}"))?;
    if first > last {
        return Err(format!("empty year range {first}..={last}"));
    }
    Ok((first, last))
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig, hkipo_rs::IpoError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some((first, last)) = self.years {
            config
                .inputs
                .extend((first..=last).map(hkipo_rs::config::report_file_name));
        }
        config.inputs.extend(self.inputs);
        if let Some(dir) = self.base_dir {
            config = config.base_dir(dir);
        }
        if let Some(out) = self.output {
            config = config.output(out);
        }
        if let Some(n) = self.header_row {
            config = config.header_row(n);
        }
        if let Some(style) = self.headers {
            config = config.header_style(style);
        }
        if self.no_prices {
            config = config.fetch_prices(false);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(done) => {
            let s = done.summary;
            tracing::info!(
                records = done.records.len(),
                rows = s.rows,
                primary = s.primary_rows,
                secondary = s.secondary_rows,
                unmarked = s.unmarked_rows,
                failed_lookups = s.failed_lookups,
                "consolidation finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "consolidation aborted");
            ExitCode::FAILURE
        }
    }
}
