use super::fields::{FundRaised, StockCode, parse_listing_date};
use super::row::{Column, InputRow};
use crate::core::IpoError;
use crate::enrich::DocumentUrls;
use chrono::{Datelike, NaiveDate};

/// One real-world listing, as described by its Hong Kong tranche row.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyListing {
    pub name: String,
    pub code: StockCode,
    pub listing_date: NaiveDate,
    pub sponsor: String,
    pub reporting_accountant: String,
    pub property_valuer: String,
    /// Amount raised by the tranche on this row.
    pub fund_raised: FundRaised,
    pub year: i32,
    pub document_urls: DocumentUrls,
}

impl CompanyListing {
    /// Extracts the identity fields of a listing row and derives its year
    /// and document links.
    ///
    /// # Errors
    ///
    /// `MissingColumn` for an absent column or empty code cell,
    /// `InvalidDate` for an unparseable listing date. A date typed by the
    /// workbook is taken as is.
    pub fn from_row(row: &InputRow) -> Result<Self, IpoError> {
        let code = StockCode::parse(row.get(Column::StockCode)?)
            .ok_or_else(|| row.missing(Column::StockCode.label()))?;

        let raw_date = row.get(Column::ListingDate)?;
        let listing_date = match row.date(Column::ListingDate) {
            Some(date) => date,
            None => parse_listing_date(raw_date).ok_or_else(|| IpoError::InvalidDate {
                value: raw_date.to_string(),
                source_label: row.source().to_string(),
                line: row.line(),
            })?,
        };
        let year = listing_date.year();

        Ok(Self {
            name: row.get(Column::CompanyName)?.to_string(),
            document_urls: DocumentUrls::build(&code, year),
            code,
            listing_date,
            sponsor: row.get(Column::Sponsor)?.to_string(),
            reporting_accountant: row.get(Column::ReportingAccountant)?.to_string(),
            property_valuer: row.get(Column::PropertyValuer)?.to_string(),
            fund_raised: FundRaised::new(row.get(Column::FundRaised)?),
            year,
        })
    }
}
