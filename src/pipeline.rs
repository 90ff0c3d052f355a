//! The single forward pass: merge tranche rows, enrich, collect, write.

use crate::config::PipelineConfig;
use crate::core::IpoError;
use crate::enrich::{DocumentUrls, Enricher, FirstDayPrices, downgrade};
use crate::listing::{FundRaised, InputRow, MergedListing, Merger, StockCode, TrancheMarker};
use crate::sheet::{SheetWriter, read_all};
use chrono::NaiveDate;

/// One row of the consolidated dataset: a listing with both tranches.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub name: String,
    pub code: StockCode,
    pub listing_date: NaiveDate,
    /// Not present in the source reports; always empty.
    pub price_range: String,
    /// Not present in the source reports; always empty.
    pub final_price: String,
    /// Amount raised by the Hong Kong `(a)` tranche.
    pub initial_hk_allocation_ratio: FundRaised,
    /// Amount raised by the international `(b)` tranche.
    pub initial_intl_allocation: FundRaised,
    pub group_a_rate: String,
    pub group_b_rate: String,
    pub public_subscription_multiple: String,
    pub intl_subscription_multiple: String,
    pub clawback_triggered: String,
    pub special_clawback_triggered: String,
    pub greenshoe_used: String,
    pub open_price: Option<f64>,
    pub high_price: Option<f64>,
    pub close_price: Option<f64>,
    pub document_urls: DocumentUrls,
}

impl OutputRecord {
    /// Output columns in file order.
    pub const COLUMNS: [&'static str; 19] = [
        "name",
        "code",
        "listing_date",
        "price_range",
        "final_price",
        "initial_hk_allocation_ratio",
        "initial_intl_allocation",
        "group_a_rate",
        "group_b_rate",
        "public_subscription_multiple",
        "intl_subscription_multiple",
        "clawback_triggered",
        "special_clawback_triggered",
        "greenshoe_used",
        "open_price",
        "high_price",
        "close_price",
        "prospectus_url",
        "allotment_url",
    ];

    pub fn new(merged: MergedListing, prices: FirstDayPrices) -> Self {
        let MergedListing {
            company,
            hk_fund_raised,
            intl_fund_raised,
        } = merged;
        Self {
            name: company.name,
            code: company.code,
            listing_date: company.listing_date,
            price_range: String::new(),
            final_price: String::new(),
            initial_hk_allocation_ratio: hk_fund_raised,
            initial_intl_allocation: intl_fund_raised,
            group_a_rate: String::new(),
            group_b_rate: String::new(),
            public_subscription_multiple: String::new(),
            intl_subscription_multiple: String::new(),
            clawback_triggered: String::new(),
            special_clawback_triggered: String::new(),
            greenshoe_used: String::new(),
            open_price: prices.open,
            high_price: prices.high,
            close_price: prices.close,
            document_urls: company.document_urls,
        }
    }

    pub fn prices(&self) -> FirstDayPrices {
        FirstDayPrices {
            open: self.open_price,
            high: self.high_price,
            close: self.close_price,
        }
    }

    /// Cell text in [`OutputRecord::COLUMNS`] order; missing prices are empty.
    pub fn to_cells(&self) -> [String; 19] {
        let price = |p: Option<f64>| p.map(|v| v.to_string()).unwrap_or_default();
        [
            self.name.clone(),
            self.code.to_string(),
            self.listing_date.format("%Y-%m-%d").to_string(),
            self.price_range.clone(),
            self.final_price.clone(),
            self.initial_hk_allocation_ratio.to_string(),
            self.initial_intl_allocation.to_string(),
            self.group_a_rate.clone(),
            self.group_b_rate.clone(),
            self.public_subscription_multiple.clone(),
            self.intl_subscription_multiple.clone(),
            self.clawback_triggered.clone(),
            self.special_clawback_triggered.clone(),
            self.greenshoe_used.clone(),
            price(self.open_price),
            price(self.high_price),
            price(self.close_price),
            self.document_urls.prospectus.clone(),
            self.document_urls.allotment.clone(),
        ]
    }
}

/// Counters collected over one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub primary_rows: usize,
    pub secondary_rows: usize,
    pub unmarked_rows: usize,
    pub lookups: usize,
    pub failed_lookups: usize,
}

/// Result of a pass: the records in input order plus its counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Consolidation {
    pub records: Vec<OutputRecord>,
    pub summary: RunSummary,
}

/// Drives the merge and enrichment over an ordered row sequence.
#[derive(Debug, Clone, Default)]
pub struct Consolidator {
    enricher: Enricher,
}

impl Consolidator {
    pub fn new(enricher: Enricher) -> Self {
        Self { enricher }
    }

    /// Emits one record per `(b)` row, in input order.
    ///
    /// Lookups run one at a time; a failed market-data lookup leaves that
    /// record's price cells empty and the pass continues.
    ///
    /// # Errors
    ///
    /// Any row error (missing column, bad date, orphan `(b)` row) or a fatal
    /// lookup error aborts the pass and discards the records collected so far.
    pub async fn process<I>(&self, rows: I) -> Result<Consolidation, IpoError>
    where
        I: IntoIterator<Item = InputRow>,
    {
        let mut merger = Merger::new();
        let mut records = Vec::new();
        let mut summary = RunSummary::default();

        for row in rows {
            summary.rows += 1;
            let marker = TrancheMarker::of(&row)?;
            match marker {
                TrancheMarker::Primary => summary.primary_rows += 1,
                TrancheMarker::Secondary => summary.secondary_rows += 1,
                TrancheMarker::Unmarked => summary.unmarked_rows += 1,
            }

            let Some(merged) = merger.apply(marker, &row)? else {
                continue;
            };

            let company = &merged.company;
            let prices = if self.enricher.is_enabled() {
                summary.lookups += 1;
                let result = self
                    .enricher
                    .lookup(&company.code, company.listing_date)
                    .await;
                if result.as_ref().is_err_and(|e| !e.is_fatal()) {
                    summary.failed_lookups += 1;
                }
                downgrade(&company.code, result)?
            } else {
                FirstDayPrices::empty()
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(
                code = %company.code,
                name = %company.name,
                source = row.source(),
                line = row.line(),
                "merged listing"
            );
            records.push(OutputRecord::new(merged, prices));
        }

        Ok(Consolidation { records, summary })
    }
}

/// Reads every configured input, consolidates, and writes the output file.
///
/// Nothing is written unless the whole pass succeeds.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, err, fields(inputs = config.inputs.len()))
)]
pub async fn run(config: &PipelineConfig) -> Result<Consolidation, IpoError> {
    config.validate()?;
    let rows = read_all(&config.input_paths(), config.header_row)?;

    let enricher = if config.fetch_prices {
        Enricher::new(config.client()?)
    } else {
        Enricher::disabled()
    };
    let done = Consolidator::new(enricher).process(rows).await?;

    SheetWriter::new(&config.output, config.header_style).write(&done.records)?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        output = %config.output.display(),
        records = done.records.len(),
        rows = done.summary.rows,
        failed_lookups = done.summary.failed_lookups,
        "dataset written"
    );
    Ok(done)
}
