//! Pipelines that sequence the engine's components.
//!
//! Every pipeline is stateless per call: it borrows its inputs, returns fresh
//! values, and stops before matching if an earlier stage fails.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain_slots::generate_domain_slots;
use crate::error::Result;
use crate::filter::AvailabilitySlotFilter;
use crate::generator::AvailabilityGenerator;
use crate::matcher::{MatchResult, SlotMatcher};
use crate::policy::DomainTimePolicy;
use crate::schedule::AvailabilitySchedule;
use crate::slot::Slot;

/// Generate one specialist's availability over a range, then match it.
#[derive(Debug, Clone, Copy)]
pub struct GenerateAndMatch<'a> {
    policy: &'a DomainTimePolicy,
    schedule: &'a AvailabilitySchedule,
    matcher: &'a SlotMatcher,
}

impl<'a> GenerateAndMatch<'a> {
    pub fn new(
        policy: &'a DomainTimePolicy,
        schedule: &'a AvailabilitySchedule,
        matcher: &'a SlotMatcher,
    ) -> Self {
        Self {
            policy,
            schedule,
            matcher,
        }
    }

    /// # Errors
    /// Returns `EngineError::InvalidRange` if `date_from > date_to`; the matcher
    /// does not run in that case.
    pub fn execute(&self, date_from: NaiveDate, date_to: NaiveDate) -> Result<MatchResult> {
        let availability =
            AvailabilityGenerator::new(self.policy, self.schedule).generate(date_from, date_to)?;
        Ok(self.matcher.match_availability(&availability))
    }
}

/// Filter a shared universal slot set by one specialist's schedule, then match.
#[derive(Debug, Clone, Copy)]
pub struct FilterAndMatch<'a> {
    schedule: &'a AvailabilitySchedule,
    matcher: &'a SlotMatcher,
}

impl<'a> FilterAndMatch<'a> {
    pub fn new(schedule: &'a AvailabilitySchedule, matcher: &'a SlotMatcher) -> Self {
        Self { schedule, matcher }
    }

    pub fn execute(&self, domain_slots: &[Slot]) -> MatchResult {
        let allowed = AvailabilitySlotFilter::new(self.schedule).filter(domain_slots);
        self.matcher.match_slots(&allowed)
    }
}

/// A specialist's displayable schedule: the domain grid for `days_ahead` days
/// from `date_from`, filtered by the specialist's rule and exceptions.
pub fn specialist_schedule(
    policy: &DomainTimePolicy,
    schedule: &AvailabilitySchedule,
    date_from: NaiveDate,
    days_ahead: u32,
) -> Vec<Slot> {
    let domain_slots = generate_domain_slots(policy, date_from, days_ahead);
    AvailabilitySlotFilter::new(schedule).filter(&domain_slots)
}

/// One specialist that overlapped with the client's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistMatch<I> {
    pub id: I,
    pub result: MatchResult,
}

/// Run filter-and-match for many specialists against one universal slot set.
///
/// Only specialists with at least one matched slot are returned, in input
/// order. Ordering by relevance is left to the caller.
pub fn match_specialists<'s, I>(
    domain_slots: &[Slot],
    specialists: impl IntoIterator<Item = (I, &'s AvailabilitySchedule)>,
    matcher: &SlotMatcher,
) -> Vec<SpecialistMatch<I>> {
    let mut considered = 0usize;
    let matches: Vec<SpecialistMatch<I>> = specialists
        .into_iter()
        .inspect(|_| considered += 1)
        .filter_map(|(id, schedule)| {
            let result = FilterAndMatch::new(schedule, matcher).execute(domain_slots);
            result.has_match().then_some(SpecialistMatch { id, result })
        })
        .collect();

    debug!(considered, matched = matches.len(), "matched specialists");
    matches
}
