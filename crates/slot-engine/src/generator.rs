//! Per-specialist availability over a date range.
//!
//! Combines the domain grid ([`DomainTimePolicy`]) with a specialist's
//! [`AvailabilitySchedule`]. For each day the schedule yields working windows
//! (exceptions first, then the rule), and each window keeps only the grid slots
//! that fit in it completely. A slot straddling a window boundary is dropped,
//! never truncated.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::exception::days_between;
use crate::policy::DomainTimePolicy;
use crate::schedule::AvailabilitySchedule;
use crate::slot::Slot;

/// Available slots of a single day. An empty list means the specialist is not
/// working that day, which is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityDay {
    pub day: NaiveDate,
    pub slots: Vec<Slot>,
}

/// Available slots over an inclusive date range, one entry per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub days: Vec<AvailabilityDay>,
}

impl Availability {
    /// All slots, day by day.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.days.iter().flat_map(|d| d.slots.iter())
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.days.into_iter().flat_map(|d| d.slots).collect()
    }

    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.slots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }
}

/// Generates a specialist's available slots on the fly.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityGenerator<'a> {
    policy: &'a DomainTimePolicy,
    schedule: &'a AvailabilitySchedule,
}

impl<'a> AvailabilityGenerator<'a> {
    pub fn new(policy: &'a DomainTimePolicy, schedule: &'a AvailabilitySchedule) -> Self {
        Self { policy, schedule }
    }

    /// Available slots for every day in `[date_from, date_to]`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidRange` if `date_from > date_to`.
    pub fn generate(&self, date_from: NaiveDate, date_to: NaiveDate) -> Result<Availability> {
        let days: Vec<AvailabilityDay> = days_between(date_from, date_to)?
            .map(|day| self.generate_day(day))
            .collect();
        let availability = Availability { days };

        debug!(
            %date_from,
            %date_to,
            slots = availability.slot_count(),
            "generated availability"
        );
        Ok(availability)
    }

    /// Available slots for a single day.
    pub fn generate_day(&self, day: NaiveDate) -> AvailabilityDay {
        let windows = self.schedule.windows_on(day);
        if windows.is_empty() {
            return AvailabilityDay {
                day,
                slots: Vec::new(),
            };
        }
        // Walk the grid once so overlapping windows cannot emit a slot twice
        // and the day stays in chronological order.
        let slots = self
            .policy
            .iter_day_slots(day)
            .map(|(start, end)| Slot::new(day, start, end))
            .filter(|slot| windows.iter().any(|w| w.contains(slot)))
            .collect();
        AvailabilityDay { day, slots }
    }
}
