//! hkipo-rs: consolidate HKEX new listing reports into one IPO dataset.
//!
//! The crate reads the yearly new listing report exports, merges each
//! listing's Hong Kong `(a)` and international `(b)` tranche rows into a
//! single record, derives the HKEXnews document links and, optionally,
//! looks up the first trading day's open/high/close from Yahoo Finance.
//!
//! ```no_run
//! # use hkipo_rs::{PipelineConfig, run};
//! # #[tokio::main]
//! # async fn main() -> Result<(), hkipo_rs::IpoError> {
//! let config = PipelineConfig::yearly_reports("reports", 2020..=2024)
//!     .output("HK_IPO_Full_Dataset.xlsx");
//! let done = run(&config).await?;
//! println!("wrote {} listings", done.records.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod enrich;
pub mod history;
pub mod listing;
pub mod pipeline;
pub mod sheet;

pub use config::PipelineConfig;
pub use crate::core::{IpoError, YfClient, YfClientBuilder};
pub use enrich::{DocumentUrls, Enricher, FirstDayPriceSource, FirstDayPrices};
pub use history::{DailyBar, HistoryBuilder};
pub use listing::{
    CarryForward, Column, CompanyListing, FundRaised, Header, InputRow, MergedListing, Merger,
    StockCode, TrancheMarker,
};
pub use pipeline::{Consolidation, Consolidator, OutputRecord, RunSummary, run};
pub use sheet::{HeaderStyle, SheetReader, SheetWriter};
