//! Report rows, tranche markers and the carry-forward merge.

mod fields;
mod marker;
mod merger;
mod record;
mod row;

pub use fields::{FundRaised, StockCode, parse_listing_date};
pub use marker::TrancheMarker;
pub use merger::{CarryForward, MergedListing, Merger};
pub use record::CompanyListing;
pub use row::{Column, Header, InputRow};
