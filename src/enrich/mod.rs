//! Record enrichment: HKEXnews document links and first-day prices.

mod prices;
mod urls;

pub use prices::{FirstDayPriceSource, FirstDayPrices, PriceFuture, first_session_window};
pub use urls::{DocumentUrls, HKEXNEWS_HOST};

use crate::core::IpoError;
use crate::listing::StockCode;
use chrono::NaiveDate;
use std::sync::Arc;

/// Best-effort first-day price lookups.
///
/// [`Enricher::lookup`] surfaces the lookup's outcome; [`Enricher::enrich`]
/// applies the pipeline's policy of replacing recoverable failures with
/// empty prices.
#[derive(Clone, Default)]
pub struct Enricher {
    source: Option<Arc<dyn FirstDayPriceSource>>,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Enricher {
    pub fn new(source: impl FirstDayPriceSource + 'static) -> Self {
        Self {
            source: Some(Arc::new(source)),
        }
    }

    /// An enricher that never performs lookups.
    pub fn disabled() -> Self {
        Self { source: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Queries the source. A disabled enricher returns empty prices.
    ///
    /// # Errors
    ///
    /// Whatever the source reports; the lookup is not retried.
    pub async fn lookup(
        &self,
        code: &StockCode,
        listing_date: NaiveDate,
    ) -> Result<FirstDayPrices, IpoError> {
        match &self.source {
            Some(source) => source.first_day_prices(code, listing_date).await,
            None => Ok(FirstDayPrices::empty()),
        }
    }

    /// First-day prices, or empty prices if the lookup fails with a
    /// market-data error.
    ///
    /// # Errors
    ///
    /// Errors for which [`IpoError::is_fatal`] holds are passed through.
    pub async fn enrich(
        &self,
        code: &StockCode,
        listing_date: NaiveDate,
    ) -> Result<FirstDayPrices, IpoError> {
        downgrade(code, self.lookup(code, listing_date).await)
    }
}

/// Replaces a non-fatal lookup failure with empty prices.
pub(crate) fn downgrade(
    _code: &StockCode,
    result: Result<FirstDayPrices, IpoError>,
) -> Result<FirstDayPrices, IpoError> {
    match result {
        Ok(prices) => Ok(prices),
        Err(err) if err.is_fatal() => Err(err),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                symbol = %_code.yahoo_symbol(),
                error = %_err,
                "first-day price lookup failed"
            );
            Ok(FirstDayPrices::empty())
        }
    }
}
