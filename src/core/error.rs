use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Market-data failures (`Http`, `Url`, `Status`, `Data`, `InvalidDates`) are
/// recoverable: the pipeline downgrades them to empty price cells. Everything
/// else aborts the pass.
#[derive(Debug, Error)]
pub enum IpoError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// An invalid date range was provided for a historical data request (start must be before end).
    #[error("invalid date range: start must be before end")]
    InvalidDates,

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tabular file could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A spreadsheet workbook could not be opened or read.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// The output workbook could not be written.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// A required column is absent from the header or from a row.
    #[error("missing column '{column}' in {source_label} line {line}")]
    MissingColumn {
        /// Header label of the column.
        column: String,
        /// File the row came from.
        source_label: String,
        /// 1-based line number within the file.
        line: u64,
    },

    /// A listing date cell could not be parsed.
    #[error("invalid listing date '{value}' in {source_label} line {line}")]
    InvalidDate {
        /// The raw cell text.
        value: String,
        /// File the row came from.
        source_label: String,
        /// 1-based line number within the file.
        line: u64,
    },

    /// An international `(b)` row arrived before any Hong Kong `(a)` row.
    #[error("tranche row (b) in {source_label} line {line} has no preceding listing row")]
    OrphanSecondary {
        /// File the row came from.
        source_label: String,
        /// 1-based line number within the file.
        line: u64,
    },

    /// The pipeline configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IpoError {
    /// Returns `true` when the error must abort a consolidation pass.
    ///
    /// Market-data lookup failures are not fatal; they only leave the
    /// first-day price cells of one record empty.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            IpoError::Http(_)
                | IpoError::Url(_)
                | IpoError::Status { .. }
                | IpoError::Data(_)
                | IpoError::InvalidDates
        )
    }
}
