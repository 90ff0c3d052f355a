//! Pipeline configuration: which reports to read and where to write.

use crate::core::{IpoError, YfClient};
use crate::sheet::HeaderStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "HK_IPO_Full_Dataset.xlsx";

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_header_row() -> usize {
    1
}

fn default_fetch_prices() -> bool {
    true
}

/// Settings for one consolidation run.
///
/// Deserializable from JSON; every field except `inputs` has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    /// Directory relative input paths are resolved against.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Report exports, read in this order.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Title lines preceding the header line in each report.
    #[serde(default = "default_header_row")]
    pub header_row: usize,
    #[serde(default)]
    pub header_style: HeaderStyle,
    /// Look up first-day prices; when off, price cells stay empty.
    #[serde(default = "default_fetch_prices")]
    pub fetch_prices: bool,
    /// Overall timeout per price lookup.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Override of the chart endpoint base, e.g. for a local mock.
    #[serde(default)]
    pub chart_base_url: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            inputs: Vec::new(),
            output: default_output(),
            header_row: default_header_row(),
            header_style: HeaderStyle::default(),
            fetch_prices: default_fetch_prices(),
            timeout_secs: None,
            chart_base_url: None,
        }
    }
}

impl PipelineConfig {
    pub fn new<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// The yearly Chinese new listing reports, `NLR{year}_Chi.xlsx`, under `base_dir`.
    pub fn yearly_reports(
        base_dir: impl Into<PathBuf>,
        years: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Self::new(years.into_iter().map(report_file_name))
        }
    }

    /// Parses a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, IpoError> {
        serde_json::from_str(text).map_err(|e| IpoError::Config(format!("json parse error: {e}")))
    }

    /// Reads a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IpoError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(path.into());
        self
    }

    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    #[must_use]
    pub fn header_row(mut self, lines: usize) -> Self {
        self.header_row = lines;
        self
    }

    #[must_use]
    pub fn header_style(mut self, style: HeaderStyle) -> Self {
        self.header_style = style;
        self
    }

    #[must_use]
    pub fn fetch_prices(mut self, yes: bool) -> Self {
        self.fetch_prices = yes;
        self
    }

    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout_secs = Some(dur.as_secs());
        self
    }

    #[must_use]
    pub fn chart_base_url(mut self, url: impl Into<String>) -> Self {
        self.chart_base_url = Some(url.into());
        self
    }

    /// Input paths with `base_dir` applied to the relative ones.
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.inputs
            .iter()
            .map(|p| match &self.base_dir {
                Some(dir) if p.is_relative() => dir.join(p),
                _ => p.clone(),
            })
            .collect()
    }

    /// # Errors
    ///
    /// `Config` when there is nothing to read.
    pub fn validate(&self) -> Result<(), IpoError> {
        if self.inputs.is_empty() {
            return Err(IpoError::Config("no input files configured".into()));
        }
        Ok(())
    }

    /// The market-data client these settings describe.
    pub fn client(&self) -> Result<YfClient, IpoError> {
        let mut builder = YfClient::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(base) = &self.chart_base_url {
            builder = builder.base_chart(Url::parse(base)?);
        }
        builder.build()
    }
}

/// File name of a year's Chinese new listing report workbook.
pub fn report_file_name(year: i32) -> PathBuf {
    PathBuf::from(format!("NLR{year}_Chi.xlsx"))
}
