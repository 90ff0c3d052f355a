//! Daily price history from the Yahoo chart endpoint.

mod fetch;
mod model;
pub(crate) mod wire;

pub use model::DailyBar;

use crate::core::{IpoError, YfClient};
use fetch::{Fetched, fetch_chart};

/// A builder for fetching daily bars of a single symbol over a fixed window.
///
/// ```no_run
/// # use hkipo_rs::{HistoryBuilder, YfClient};
/// # use chrono::{TimeZone, Utc};
/// # #[tokio::main]
/// # async fn main() -> Result<(), hkipo_rs::IpoError> {
/// let client = YfClient::builder().build()?;
/// let start = Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap();
/// let bars = HistoryBuilder::new(&client, "0012.HK")
///     .between(start, start + chrono::Duration::days(2))
///     .fetch()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    client: YfClient,
    symbol: String,
    period: Option<(i64, i64)>,
    auto_adjust: bool,
}

impl HistoryBuilder {
    /// Creates a new `HistoryBuilder` for a given symbol.
    pub fn new(client: &YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            period: None,
            auto_adjust: true,
        }
    }

    /// Sets the absolute window `[start, end)` of the request.
    #[must_use]
    pub fn between(
        mut self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        self.period = Some((start.timestamp(), end.timestamp()));
        self
    }

    /// Sets whether prices are scaled by the adjusted close. (Default: `true`)
    #[must_use]
    pub fn auto_adjust(mut self, yes: bool) -> Self {
        self.auto_adjust = yes;
        self
    }

    /// Executes the request and returns the complete bars in session order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDates` for an empty window, `Data` when no window was
    /// set or the payload is malformed, `Status` for a non-2xx response and
    /// `Http` for transport failures.
    pub async fn fetch(self) -> Result<Vec<DailyBar>, IpoError> {
        let period = self
            .period
            .ok_or_else(|| IpoError::Data("no period set".into()))?;
        let fetched = fetch_chart(&self.client, &self.symbol, period).await?;
        Ok(assemble_bars(&fetched, self.auto_adjust))
    }
}

/// Zips the column-oriented chart payload into bars, dropping sessions with
/// any missing OHLC value.
fn assemble_bars(fetched: &Fetched, auto_adjust: bool) -> Vec<DailyBar> {
    let q = &fetched.quote;
    let at = |v: &Vec<Option<f64>>, i: usize| v.get(i).copied().flatten();

    fetched
        .ts
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let (open, high, low, close) =
                (at(&q.open, i)?, at(&q.high, i)?, at(&q.low, i)?, at(&q.close, i)?);

            let factor = if auto_adjust {
                at(&fetched.adjclose, i)
                    .filter(|_| close != 0.0)
                    .map_or(1.0, |adj| adj / close)
            } else {
                1.0
            };

            Some(DailyBar {
                ts,
                open: open * factor,
                high: high * factor,
                low: low * factor,
                close: close * factor,
                volume: q.volume.get(i).copied().flatten(),
            })
        })
        .collect()
}
