//! Filter a pre-generated universal slot set down to one specialist's slots.
//!
//! The filter never generates slots and knows nothing about date ranges: it
//! keeps each candidate whose day has a working window that fully contains it.
//! Containment is tested on normalized instants (see [`TimeWindow::contains`]),
//! so windows and slots ending at midnight compare correctly.
//!
//! [`TimeWindow::contains`]: crate::window::TimeWindow::contains

use tracing::debug;

use crate::schedule::AvailabilitySchedule;
use crate::slot::Slot;

#[derive(Debug, Clone, Copy)]
pub struct AvailabilitySlotFilter<'a> {
    schedule: &'a AvailabilitySchedule,
}

impl<'a> AvailabilitySlotFilter<'a> {
    pub fn new(schedule: &'a AvailabilitySchedule) -> Self {
        Self { schedule }
    }

    /// The subset of `candidates` allowed by the schedule, in input order.
    pub fn filter(&self, candidates: &[Slot]) -> Vec<Slot> {
        let allowed: Vec<Slot> = candidates
            .iter()
            .filter(|slot| self.allows(slot))
            .copied()
            .collect();

        debug!(
            candidates = candidates.len(),
            allowed = allowed.len(),
            "filtered domain slots"
        );
        allowed
    }

    pub fn allows(&self, slot: &Slot) -> bool {
        self.schedule
            .windows_on(slot.day)
            .iter()
            .any(|window| window.contains(slot))
    }
}
