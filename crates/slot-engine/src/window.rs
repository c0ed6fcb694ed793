//! Time-of-day windows and the midnight-aware containment test.
//!
//! A window is a pair of wall-clock times inside one calendar day. An `end` of
//! `00:00` means "until the end of the day", so `23:00–00:00` is a valid
//! one-hour window. The only window allowed to start *and* end at midnight is
//! [`TimeWindow::full_day`].

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::slot::Slot;

/// A validated `[start, end)` interval within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Build a window, rejecting `start >= end` unless `end` is midnight.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidTimeWindow` for empty or inverted windows,
    /// including `00:00–00:00` (use [`TimeWindow::full_day`] for that).
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        let ends_at_midnight = end == NaiveTime::MIN && start != NaiveTime::MIN;
        if start < end || ends_at_midnight {
            Ok(Self { start, end })
        } else {
            Err(EngineError::InvalidTimeWindow { start, end })
        }
    }

    /// The 24-hour window `00:00–00:00`.
    pub fn full_day() -> Self {
        Self {
            start: NaiveTime::MIN,
            end: NaiveTime::MIN,
        }
    }

    /// Parse a window from two `"HH:MM"` (or `"HH:MM:SS"`) strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    /// Inclusive start time.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Exclusive end time; `00:00` is the end of the day.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether this is the `00:00–00:00` window covering the whole day.
    pub fn is_full_day(&self) -> bool {
        self.start == NaiveTime::MIN && self.end == NaiveTime::MIN
    }

    /// Length of the window, 24 hours for the full day.
    pub fn duration(&self) -> Duration {
        let (start, end) = self.span_on(NaiveDate::MIN);
        end - start
    }

    /// Anchor the window to `day`, pushing `end` into the next day when it does
    /// not come after `start`.
    pub fn span_on(&self, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        normalize(day, self.start, self.end)
    }

    /// Whether `slot` lies entirely inside this window on the slot's own day.
    ///
    /// Both intervals are normalized onto one timeline before comparing, so a
    /// `23:00–00:00` slot fits a `22:00–00:00` window.
    pub fn contains(&self, slot: &Slot) -> bool {
        let (slot_start, slot_end) = slot.span();
        let (window_start, window_end) = self.span_on(slot.day);
        slot_start >= window_start && slot_end <= window_end
    }
}

/// Combine a day with a start/end time pair; `end <= start` wraps past midnight.
pub(crate) fn normalize(
    day: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let start_dt = day.and_time(start);
    let mut end_dt = day.and_time(end);
    if end <= start {
        end_dt += Duration::days(1);
    }
    (start_dt, end_dt)
}

/// Parse a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
/// Returns `EngineError::InvalidTime` if neither format matches.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn window_ending_at_midnight_spans_to_next_day() {
        let window = TimeWindow::new(t(23, 0), t(0, 0)).unwrap();
        assert_eq!(window.duration(), Duration::hours(1));
        assert!(!window.is_full_day());
    }

    #[test]
    fn full_day_is_twenty_four_hours() {
        assert_eq!(TimeWindow::full_day().duration(), Duration::hours(24));
    }

    #[test]
    fn parse_accepts_seconds() {
        let window = TimeWindow::parse("09:00:00", "12:30").unwrap();
        assert_eq!(window.start(), t(9, 0));
        assert_eq!(window.end(), t(12, 30));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            parse_time("9am"),
            Err(EngineError::InvalidTime("9am".to_string()))
        );
    }
}
