//! Slot value type and the client-side slot key.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::window::normalize;

/// One discrete bookable interval on a calendar day.
///
/// `end` may be `00:00` for the last slot of a day, meaning midnight of the
/// following day. Slots are plain values: equal fields mean equal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Slot {
    /// Build a slot on `day`; no validation is done.
    pub fn new(day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// The slot as absolute local instants, with `end` wrapped past midnight
    /// when it does not come after `start`.
    pub fn span(&self) -> (NaiveDateTime, NaiveDateTime) {
        normalize(self.day, self.start, self.end)
    }

    /// The day and start a client would select this slot by.
    pub fn key(&self) -> SlotKey {
        SlotKey {
            day: self.day,
            start: self.start,
        }
    }
}

/// What a client picks: a day and a start time. Slot length comes from the
/// domain time policy, never from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: NaiveDate,
    pub start: NaiveTime,
}

impl SlotKey {
    /// Select the slot starting at `start` on `day`.
    pub fn new(day: NaiveDate, start: NaiveTime) -> Self {
        Self { day, start }
    }
}

impl From<NaiveDateTime> for SlotKey {
    fn from(local: NaiveDateTime) -> Self {
        Self {
            day: local.date(),
            start: local.time(),
        }
    }
}
