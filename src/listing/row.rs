use crate::core::IpoError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The input columns read from a new listing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    CompanyName,
    StockCode,
    ListingDate,
    Sponsor,
    ReportingAccountant,
    PropertyValuer,
    FundRaised,
}

impl Column {
    /// Header label used by the Chinese edition of the report (first line only).
    pub const fn label(self) -> &'static str {
        match self {
            Column::CompanyName => "上市時公司名稱",
            Column::StockCode => "股份代號",
            Column::ListingDate => "上市日期",
            Column::Sponsor => "保薦人",
            Column::ReportingAccountant => "申報會計師",
            Column::PropertyValuer => "物業估值師",
            Column::FundRaised => "集資額",
        }
    }

    /// Header label used by the English edition of the report.
    pub const fn english_label(self) -> &'static str {
        match self {
            Column::CompanyName => "Company Name",
            Column::StockCode => "Stock Code",
            Column::ListingDate => "Date of Listing",
            Column::Sponsor => "Sponsor",
            Column::ReportingAccountant => "Reporting Accountant",
            Column::PropertyValuer => "Property Valuer",
            Column::FundRaised => "Funds Raised",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reduces a header cell to its first line, trimmed and lowercased.
///
/// Report headers carry a line-broken qualifier, e.g. `"集資額\n(HK$)"`.
fn normalize_label(raw: &str) -> String {
    raw.lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Column labels of one input file, shared by all of its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            // first occurrence wins on duplicate labels
            index.entry(normalize_label(label)).or_insert(i);
        }
        Self { labels, index }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `column`, matching either report edition's label.
    pub fn position(&self, column: Column) -> Option<usize> {
        self.index
            .get(&normalize_label(column.label()))
            .or_else(|| self.index.get(&normalize_label(column.english_label())))
            .copied()
    }
}

/// One data row of a report, with named-column access.
#[derive(Debug, Clone)]
pub struct InputRow {
    header: Arc<Header>,
    source: Arc<str>,
    line: u64,
    cells: Vec<String>,
    /// Typed date cells, by column; empty for text-only sources.
    dates: Vec<Option<NaiveDate>>,
}

impl InputRow {
    pub fn new(
        header: Arc<Header>,
        source: impl Into<Arc<str>>,
        line: u64,
        cells: Vec<String>,
    ) -> Self {
        Self {
            header,
            source: source.into(),
            line,
            cells,
            dates: Vec::new(),
        }
    }

    /// Attaches the cells a workbook stored as dates, aligned with `cells`.
    pub fn with_dates(mut self, dates: Vec<Option<NaiveDate>>) -> Self {
        self.dates = dates;
        self
    }

    /// Label of the file the row was read from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 1-based line number within the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Trimmed text of `column`.
    ///
    /// # Errors
    ///
    /// `MissingColumn` when the header has no such column or the row is too
    /// short to contain it.
    pub fn get(&self, column: Column) -> Result<&str, IpoError> {
        self.header
            .position(column)
            .and_then(|i| self.cells.get(i))
            .map(|cell| cell.trim())
            .ok_or_else(|| self.missing(column.label()))
    }

    /// The typed date stored in `column`, if the source carried one.
    pub fn date(&self, column: Column) -> Option<NaiveDate> {
        self.header
            .position(column)
            .and_then(|i| self.dates.get(i).copied().flatten())
    }

    /// Trimmed text of the tranche marker, the last-but-one column.
    ///
    /// A ragged row that stops short of the marker yields an empty marker.
    ///
    /// # Errors
    ///
    /// `MissingColumn` when the header itself has fewer than two columns.
    pub fn marker(&self) -> Result<&str, IpoError> {
        let pos = self
            .header
            .len()
            .checked_sub(2)
            .ok_or_else(|| self.missing("tranche marker"))?;
        Ok(self.cells.get(pos).map_or("", |cell| cell.trim()))
    }

    pub(crate) fn missing(&self, column: &str) -> IpoError {
        IpoError::MissingColumn {
            column: column.to_string(),
            source_label: self.source.to_string(),
            line: self.line,
        }
    }
}
