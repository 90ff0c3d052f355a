use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// One daily trading session.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    /// Session start as a Unix timestamp (seconds).
    pub ts: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl DailyBar {
    /// Session start in UTC, if the timestamp is representable.
    pub fn datetime_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.ts, 0).single()
    }

    /// Calendar date of the session in the given exchange time zone.
    pub fn session_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.datetime_utc()
            .map(|dt| dt.with_timezone(tz).date_naive())
    }
}
