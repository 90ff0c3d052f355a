use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Exchange ticker code, zero-padded to four characters for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StockCode(String);

impl StockCode {
    /// Parses a code cell. Numeric exports such as `"700.0"` lose the
    /// fractional suffix; codes wider than four characters are kept as-is.
    ///
    /// Returns `None` for an empty cell.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let raw = match raw.strip_suffix(".0") {
            Some(int) if !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit()) => int,
            _ => raw,
        };
        if raw.is_empty() {
            return None;
        }
        Some(Self(zero_pad(raw, 4)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Five-character form used in HKEXnews document paths.
    pub fn url_code(&self) -> String {
        zero_pad(&self.0, 5)
    }

    /// Yahoo Finance symbol on the Hong Kong exchange, e.g. `0700.HK`.
    pub fn yahoo_symbol(&self) -> String {
        format!("{}.HK", self.0)
    }
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn zero_pad(s: &str, width: usize) -> String {
    format!("{s:0>width$}")
}

/// Amount raised in one tranche, as it appears in the report (HK$).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FundRaised {
    raw: String,
}

impl FundRaised {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The amount as a decimal, ignoring thousands separators.
    pub fn amount(&self) -> Option<Decimal> {
        let cleaned: String = self
            .raw
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        Decimal::from_str(&cleaned).ok()
    }
}

impl fmt::Display for FundRaised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(d) => write!(f, "{d}"),
            None => f.write_str(&self.raw),
        }
    }
}


const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a listing date cell in any of the layouts the report exports use.
pub fn parse_listing_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}
