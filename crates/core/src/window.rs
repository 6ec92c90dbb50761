//! Reporting window and local-date helpers for the dashboard's time zone.
//!
//! The dashboard reports on orders created since the start of the previous
//! calendar day, as observed in a fixed zone (Santiago by default).

use chrono::{Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::types::Timestamp;

/// Zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Santiago;

/// Calendar date of `now` in `tz`.
pub fn local_date(now: Timestamp, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Start of the previous calendar day in `tz`, as a UTC instant.
///
/// Santiago switches to daylight time at local midnight, so 00:00 does not
/// exist on that day. In that case the first valid local instant of the day
/// is used. An ambiguous midnight resolves to the earlier instant.
pub fn lookback_start(now: Timestamp, tz: Tz) -> Timestamp {
    let today = local_date(now, tz);
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .unwrap_or(today);
    start_of_day(yesterday, tz)
}

/// First instant of `date` in `tz`, as a UTC instant.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> Timestamp {
    let mut local: NaiveDateTime = date.and_time(NaiveTime::MIN);
    // DST gaps are at most a couple of hours; step forward until the local
    // time maps to a real instant.
    for _ in 0..=4 * 60 {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => local += chrono::Duration::minutes(1),
        }
    }
    // No zone has a gap this long; fall back to reading the date as UTC.
    date.and_time(NaiveTime::MIN).and_utc()
}

/// File name for the spreadsheet export, stamped with the local date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ce_orders_{}.xlsx", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
