// ── Usage sample window ──

use chrono::{DateTime, Datelike, Days, NaiveTime, Utc};
use serde::Serialize;

/// Day-aligned `[start, end)` interval for usage sample queries.
///
/// Both bounds sit on 00:00:00 UTC: `end` is the start of the current day,
/// `start` is `days` calendar days earlier. This is "yesterday" for
/// `days = 1`, not the trailing 24 hours, so the covered span ends up to a
/// day before the moment of invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl UsageWindow {
    /// Window of `days` whole days ending at midnight UTC of `now`'s date.
    ///
    /// Returns `None` if `days` reaches past the representable date range.
    pub fn days_back_from(now: DateTime<Utc>, days: u32) -> Option<Self> {
        let today = now.date_naive();
        let start = today.checked_sub_days(Days::new(u64::from(days)))?;
        Some(Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end: today.and_time(NaiveTime::MIN).and_utc(),
        })
    }

    /// Lower bound for `created_at__gt`.
    pub fn created_after(&self) -> String {
        query_timestamp(self.start)
    }

    /// Upper bound for `created_at__lt`.
    pub fn created_before(&self) -> String {
        query_timestamp(self.end)
    }
}

/// `2024-3-9T00:00:00.000000+00:00`: month and day are not zero-padded,
/// microseconds and offset are always present.
fn query_timestamp(at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}T00:00:00.000000+00:00",
        at.year(),
        at.month(),
        at.day()
    )
}
