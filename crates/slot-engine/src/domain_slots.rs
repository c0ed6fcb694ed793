//! The universal slot set: every slot of the domain grid over a date range.
//!
//! Computed once and shared read-only across many specialists, who each filter
//! it with their own schedule (see [`crate::filter`]).

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::policy::DomainTimePolicy;
use crate::slot::Slot;

/// Generate domain slots for `days_ahead` consecutive days starting at
/// `date_from`, in chronological order. Zero days yields an empty set.
pub fn generate_domain_slots(
    policy: &DomainTimePolicy,
    date_from: NaiveDate,
    days_ahead: u32,
) -> Vec<Slot> {
    let slots: Vec<Slot> = (0..days_ahead)
        .map(|offset| date_from + Duration::days(i64::from(offset)))
        .flat_map(|day| {
            policy
                .iter_day_slots(day)
                .map(move |(start, end)| Slot::new(day, start, end))
        })
        .collect();

    debug!(%date_from, days_ahead, slots = slots.len(), "generated domain slots");
    slots
}
