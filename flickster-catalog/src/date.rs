//! Date-bucket canonicalization.
//!
//! A date bucket is the epoch-millisecond timestamp of local midnight for the
//! day a record was fetched. The fetcher writes it and the store filters on it,
//! so both sides must derive it from the same function.

use chrono::{DateTime, Local, NaiveTime, TimeZone};

/// Round `at` down to midnight in its own time zone, as epoch milliseconds.
///
/// On the rare day where local midnight does not exist (DST gap at 00:00),
/// the earliest valid instant of that day is used.
pub fn nearest_day<Tz: TimeZone>(at: &DateTime<Tz>) -> i64 {
    let tz = at.timezone();
    let midnight = at.date_naive().and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp_millis(),
        None => {
            // Skip forward through the gap one hour at a time.
            let mut probe = midnight;
            for _ in 0..24 {
                probe += chrono::Duration::hours(1);
                if let Some(start) = tz.from_local_datetime(&probe).earliest() {
                    return start.timestamp_millis();
                }
            }
            at.timestamp_millis()
        }
    }
}

/// Today's date bucket in the local time zone.
pub fn today() -> i64 {
    nearest_day(&Local::now())
}
