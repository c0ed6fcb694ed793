//! Error types for slot-engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid time window: {start} - {end}")]
    InvalidTimeWindow { start: NaiveTime, end: NaiveTime },

    #[error("Weekday set must not be empty")]
    EmptyWeekdays,

    #[error("Invalid weekday index: {0} (expected 0=Monday..6=Sunday)")]
    InvalidWeekday(u8),

    #[error("Time window list must not be empty")]
    EmptyTimeWindows,

    #[error("Slot duration must be between 1 minute and 24 hours, got {0} minutes")]
    InvalidSlotDuration(i64),

    #[error("Invalid day bounds: {start} - {end} (end must be later than start or 00:00)")]
    InvalidDayBounds { start: NaiveTime, end: NaiveTime },

    #[error("Selected slot set must not be empty")]
    EmptySelection,

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
