//! Domain time policy: the universal slot grid shared by every specialist.
//!
//! The policy knows the slot length and the day boundaries. It knows nothing
//! about specialists, rules, exceptions, or bookings.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::window::parse_time;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Slot length plus day boundaries.
///
/// A `day_end` of `00:00` means the end of the day, so `00:00–00:00` is the
/// full 24-hour grid. Every slot starts on the day it is generated for; only
/// the last one may end exactly at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainTimePolicy {
    slot_duration: Duration,
    day_start: NaiveTime,
    day_end: NaiveTime,
}

impl DomainTimePolicy {
    /// # Errors
    /// - `EngineError::InvalidSlotDuration` unless the duration is between one
    ///   minute and 24 hours.
    /// - `EngineError::InvalidDayBounds` if `day_end` is not after `day_start`
    ///   and is not midnight.
    pub fn new(day_start: NaiveTime, day_end: NaiveTime, slot_duration: Duration) -> Result<Self> {
        if slot_duration < Duration::minutes(1) || slot_duration > Duration::days(1) {
            return Err(EngineError::InvalidSlotDuration(slot_duration.num_minutes()));
        }
        if day_end <= day_start && day_end != NaiveTime::MIN {
            return Err(EngineError::InvalidDayBounds {
                start: day_start,
                end: day_end,
            });
        }
        Ok(Self {
            slot_duration,
            day_start,
            day_end,
        })
    }

    /// Same as [`DomainTimePolicy::new`] with the slot length in minutes.
    pub fn with_minutes(day_start: NaiveTime, day_end: NaiveTime, minutes: i64) -> Result<Self> {
        if !(1..=MINUTES_PER_DAY).contains(&minutes) {
            return Err(EngineError::InvalidSlotDuration(minutes));
        }
        Self::new(day_start, day_end, Duration::minutes(minutes))
    }

    /// Length of every slot.
    pub fn slot_duration(&self) -> Duration {
        self.slot_duration
    }

    /// Start of the first slot of each day.
    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    /// Day boundary; `00:00` is the end of the day.
    pub fn day_end(&self) -> NaiveTime {
        self.day_end
    }

    /// Slots of one calendar day in chronological order.
    ///
    /// The iterator is a pure function of `day` and the policy: calling this
    /// again yields the same sequence. Only whole slots are produced; a
    /// remainder shorter than `slot_duration` at the end of the day is dropped.
    pub fn iter_day_slots(&self, day: NaiveDate) -> DaySlots {
        let cursor = day.and_time(self.day_start);
        let mut boundary = day.and_time(self.day_end);
        if self.day_end == NaiveTime::MIN {
            boundary += Duration::days(1);
        }
        DaySlots {
            cursor,
            boundary,
            step: self.slot_duration,
        }
    }
}

impl Default for DomainTimePolicy {
    /// One-hour slots around the clock.
    fn default() -> Self {
        Self {
            slot_duration: Duration::hours(1),
            day_start: NaiveTime::MIN,
            day_end: NaiveTime::MIN,
        }
    }
}

/// Iterator over `(start, end)` pairs of one day's grid.
#[derive(Debug, Clone)]
pub struct DaySlots {
    cursor: NaiveDateTime,
    boundary: NaiveDateTime,
    step: Duration,
}

impl Iterator for DaySlots {
    type Item = (NaiveTime, NaiveTime);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.cursor + self.step;
        if end > self.boundary {
            return None;
        }
        let item = (self.cursor.time(), end.time());
        self.cursor = end;
        Some(item)
    }
}

/// Serializable policy settings, e.g. loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub slot_duration_minutes: i64,
    /// `"HH:MM"`.
    pub day_start: String,
    /// `"HH:MM"`; `"00:00"` means the end of the day.
    pub day_end: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            slot_duration_minutes: 60,
            day_start: "00:00".to_string(),
            day_end: "00:00".to_string(),
        }
    }
}

impl TryFrom<PolicyConfig> for DomainTimePolicy {
    type Error = EngineError;

    fn try_from(config: PolicyConfig) -> Result<Self> {
        DomainTimePolicy::with_minutes(
            parse_time(&config.day_start)?,
            parse_time(&config.day_end)?,
            config.slot_duration_minutes,
        )
    }
}
