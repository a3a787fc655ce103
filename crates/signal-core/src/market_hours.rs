//! US equity session clock.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::US::Eastern;

/// Regular session open, minutes after midnight Eastern (09:30).
pub const REGULAR_OPEN_MINUTES: u32 = 9 * 60 + 30;

/// Regular session close, minutes after midnight Eastern (16:00).
pub const REGULAR_CLOSE_MINUTES: u32 = 16 * 60;

/// Fraction of the regular session elapsed at `now`, in [0, 1].
///
/// Pre-market is 0.0, after the close is 1.0. Weekends report 1.0 so the
/// full-day average stays the volume baseline.
pub fn day_progress(now: DateTime<Utc>) -> f64 {
    let now_et = now.with_timezone(&Eastern);

    if matches!(now_et.weekday(), Weekday::Sat | Weekday::Sun) {
        return 1.0;
    }

    let seconds = f64::from(now_et.hour() * 3600 + now_et.minute() * 60 + now_et.second());
    let open = f64::from(REGULAR_OPEN_MINUTES * 60);
    let close = f64::from(REGULAR_CLOSE_MINUTES * 60);

    ((seconds - open) / (close - open)).clamp(0.0, 1.0)
}

/// Trading calendar date (Eastern) for `now`.
pub fn market_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Eastern).date_naive()
}

/// Whether `now` falls inside the regular session.
pub fn is_regular_session(now: DateTime<Utc>) -> bool {
    let now_et = now.with_timezone(&Eastern);
    if matches!(now_et.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let minutes = now_et.hour() * 60 + now_et.minute();
    (REGULAR_OPEN_MINUTES..REGULAR_CLOSE_MINUTES).contains(&minutes)
}
