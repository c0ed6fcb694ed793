//! One specialist's rule together with its exceptions.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::trace;

use crate::exception::{AvailabilityException, AvailabilityOverride};
use crate::rule::WeeklyAvailabilityRule;
use crate::window::TimeWindow;

/// Resolves the working windows of any day: exceptions first (the first one
/// given for a day wins), then the rule, otherwise closed.
#[derive(Debug, Clone)]
pub struct AvailabilitySchedule {
    rule: WeeklyAvailabilityRule,
    exceptions: Vec<AvailabilityException>,
    /// Index of the first exception for each day.
    by_day: HashMap<NaiveDate, usize>,
}

impl AvailabilitySchedule {
    pub fn new(rule: WeeklyAvailabilityRule, exceptions: Vec<AvailabilityException>) -> Self {
        let mut by_day = HashMap::with_capacity(exceptions.len());
        for (index, exception) in exceptions.iter().enumerate() {
            by_day.entry(exception.day()).or_insert(index);
        }
        Self {
            rule,
            exceptions,
            by_day,
        }
    }

    pub fn rule(&self) -> &WeeklyAvailabilityRule {
        &self.rule
    }

    pub fn exceptions(&self) -> &[AvailabilityException] {
        &self.exceptions
    }

    /// The override in force for `day`, if any exception targets it.
    pub fn override_for(&self, day: NaiveDate) -> AvailabilityOverride<'_> {
        self.by_day
            .get(&day)
            .map_or(AvailabilityOverride::NotApplicable, |&index| {
                self.exceptions[index].override_for(day)
            })
    }

    /// Working windows for `day` after exception priority is applied.
    pub fn windows_on(&self, day: NaiveDate) -> &[TimeWindow] {
        match self.override_for(day) {
            AvailabilityOverride::Closed => {
                trace!(%day, "closed by exception");
                &[]
            }
            AvailabilityOverride::Windows(windows) => {
                trace!(%day, windows = windows.len(), "windows overridden by exception");
                windows
            }
            AvailabilityOverride::NotApplicable => self.rule.windows_for(day),
        }
    }
}
