use crate::core::{IpoError, YfClient};
use crate::history::{DailyBar, HistoryBuilder};
use crate::listing::StockCode;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Asia::Hong_Kong;
use std::future::Future;
use std::pin::Pin;

/// Open, high and close of the first trading session.
///
/// `None` cells are written out as empty strings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FirstDayPrices {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub close: Option<f64>,
}

impl FirstDayPrices {
    /// The placeholder used when no lookup was made or the lookup failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_none() && self.high.is_none() && self.close.is_none()
    }
}

impl From<&DailyBar> for FirstDayPrices {
    fn from(bar: &DailyBar) -> Self {
        Self {
            open: Some(bar.open),
            high: Some(bar.high),
            close: Some(bar.close),
        }
    }
}

/// Boxed future returned by [`FirstDayPriceSource`].
pub type PriceFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FirstDayPrices, IpoError>> + Send + 'a>>;

/// Anything that can report a listing's first-day prices.
///
/// Implemented by [`YfClient`]; tests substitute their own sources.
pub trait FirstDayPriceSource: Send + Sync {
    /// Looks up the first session in `[listing_date, listing_date + 2 days)`.
    fn first_day_prices<'a>(
        &'a self,
        code: &'a StockCode,
        listing_date: NaiveDate,
    ) -> PriceFuture<'a>;
}

/// The `[listing_date, listing_date + 2 days)` window, anchored at midnight
/// Hong Kong time.
pub fn first_session_window(listing_date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_midnight = listing_date.and_time(NaiveTime::MIN);
    // Hong Kong observes no DST, so local midnight is never ambiguous.
    let start = Hong_Kong
        .from_local_datetime(&local_midnight)
        .earliest()
        .map_or_else(|| local_midnight.and_utc(), |dt| dt.with_timezone(&Utc));
    (start, start + Duration::days(2))
}

impl FirstDayPriceSource for YfClient {
    fn first_day_prices<'a>(
        &'a self,
        code: &'a StockCode,
        listing_date: NaiveDate,
    ) -> PriceFuture<'a> {
        Box::pin(async move {
            let symbol = code.yahoo_symbol();
            let (start, end) = first_session_window(listing_date);
            let bars = HistoryBuilder::new(self, symbol.as_str())
                .between(start, end)
                .fetch()
                .await?;
            bars.first()
                .map(FirstDayPrices::from)
                .ok_or_else(|| IpoError::Data(format!("no bars for {symbol} from {listing_date}")))
        })
    }
}
