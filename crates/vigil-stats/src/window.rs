//! Reporting window evaluation.
//!
//! `daily` uses calendar-day semantics in the caller's timezone: dashboards
//! reset at midnight. The longer cadences use rolling trailing-day windows.
//! That asymmetry is long-standing observed behavior and is preserved as-is.

use chrono::{DateTime, Duration, TimeZone, Utc};

use vigil_core::enums::Cadence;

/// Whether `ts` falls inside the reporting window for `cadence`, evaluated
/// against `now`.
///
/// `now` carries the timezone that defines "today" for the daily cadence;
/// the rolling cadences compare instants directly. Callers must exclude
/// records without a normalized timestamp before reaching this point.
#[must_use]
pub fn in_window<Tz: TimeZone>(cadence: Cadence, now: &DateTime<Tz>, ts: DateTime<Utc>) -> bool {
    let trailing_days = match cadence {
        Cadence::Daily => {
            return ts.with_timezone(&now.timezone()).date_naive() == now.date_naive();
        }
        Cadence::Monthly => 31,
        Cadence::Quarterly => 90,
        Cadence::Annual => 365,
    };
    ts >= now.with_timezone(&Utc) - Duration::days(trailing_days)
}
