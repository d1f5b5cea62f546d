//! # Trailing Time Window
//!
//! Restricts readings to the calendar days leading up to "today".
//!
//! All comparisons happen in the feed's civil time: a reading's epoch
//! seconds are shifted by the fixed feed offset and compared against
//! midnight boundaries of that same offset. With a three-day window and
//! `today = 2024-06-16` the window is
//!
//! ```text
//! (2024-06-13 00:00, 2024-06-16 00:00)   both ends exclusive
//! ```
//!
//! so a reading stamped exactly on either midnight is dropped.

use crate::WaveReading;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// An exclusive interval of civil time in a fixed offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    /// Lower bound (exclusive), civil time
    pub start: NaiveDateTime,
    /// Upper bound (exclusive), civil time
    pub end: NaiveDateTime,
    /// Offset readings are converted into before comparing
    pub offset: FixedOffset,
}

impl TimeWindow {
    /// The `days` calendar days before `today`, ending at `today` 00:00.
    pub fn trailing(today: NaiveDate, days: u64, offset: FixedOffset) -> Self {
        let end = today.and_time(NaiveTime::MIN);
        let start = end
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDateTime::MIN);
        TimeWindow { start, end, offset }
    }

    /// Whether `epoch_seconds` falls strictly inside the window.
    pub fn contains(&self, epoch_seconds: i64) -> bool {
        match civil_time(epoch_seconds, self.offset) {
            Some(local) => self.start < local && local < self.end,
            None => false,
        }
    }

    /// Keep only readings inside the window, preserving their order.
    pub fn filter(&self, readings: Vec<WaveReading>) -> Vec<WaveReading> {
        readings
            .into_iter()
            .filter(|r| self.contains(r.epoch_seconds))
            .collect()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} .. {}) {}", self.start, self.end, self.offset)
    }
}

/// Civil time of an epoch timestamp in `offset`; `None` if out of range.
pub fn civil_time(epoch_seconds: i64, offset: FixedOffset) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(epoch_seconds, 0).map(|utc| utc.with_timezone(&offset).naive_local())
}
