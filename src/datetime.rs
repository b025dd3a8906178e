//! Date & time helpers

use jiff::civil::{Date, DateTime, Time};

/// Combine a form date and time into a single civil date-time.
///
/// A missing date yields `None`; a missing time defaults to midnight.
pub fn join_date_time(date: Option<Date>, time: Option<Time>) -> Option<DateTime> {
    date.map(|date| date.to_datetime(time.unwrap_or(Time::midnight())))
}
