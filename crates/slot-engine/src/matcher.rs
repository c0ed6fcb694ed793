//! Intersect a specialist's allowed slots with the slots a client selected.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::generator::Availability;
use crate::slot::{Slot, SlotKey};

/// Outcome of one match call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Allowed slots the client also selected, in the order they were offered.
    pub matched_slots: Vec<Slot>,
    /// Diagnostic labels describing the criteria applied, e.g. `selected_slots:3`.
    pub applied_criteria: Vec<String>,
}

impl MatchResult {
    pub fn has_match(&self) -> bool {
        !self.matched_slots.is_empty()
    }
}

/// Matches allowed slots against a fixed, non-empty set of client selections.
///
/// Membership is a hash lookup on `(day, start)`; a slot's end time is not part
/// of the key.
#[derive(Debug, Clone)]
pub struct SlotMatcher {
    selected: HashSet<SlotKey>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SlotMatcher {
    /// # Errors
    /// `EngineError::EmptySelection` if `selected` yields no keys. A client with
    /// no time preference should bypass matching altogether.
    pub fn new(selected: impl IntoIterator<Item = SlotKey>) -> Result<Self> {
        let selected: HashSet<SlotKey> = selected.into_iter().collect();
        if selected.is_empty() {
            return Err(EngineError::EmptySelection);
        }
        Ok(Self {
            selected,
            date_range: None,
        })
    }

    /// Additionally require matched slots to fall in `[date_from, date_to]`.
    ///
    /// # Errors
    /// `EngineError::InvalidRange` if `date_from > date_to`.
    pub fn with_date_range(mut self, date_from: NaiveDate, date_to: NaiveDate) -> Result<Self> {
        if date_from > date_to {
            return Err(EngineError::InvalidRange {
                from: date_from,
                to: date_to,
            });
        }
        self.date_range = Some((date_from, date_to));
        Ok(self)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, key: &SlotKey) -> bool {
        self.selected.contains(key)
    }

    pub fn match_slots(&self, allowed: &[Slot]) -> MatchResult {
        self.collect(allowed.iter())
    }

    pub fn match_availability(&self, availability: &Availability) -> MatchResult {
        self.collect(availability.slots())
    }

    fn collect<'s>(&self, allowed: impl Iterator<Item = &'s Slot>) -> MatchResult {
        let matched_slots: Vec<Slot> = allowed
            .filter(|slot| self.in_range(slot.day) && self.selected.contains(&slot.key()))
            .copied()
            .collect();

        let mut applied_criteria = vec![format!("selected_slots:{}", self.selected.len())];
        if let Some((from, to)) = self.date_range {
            applied_criteria.push(format!("date_range:{}–{}", from, to));
        }

        debug!(
            selected = self.selected.len(),
            matched = matched_slots.len(),
            "matched slots"
        );
        MatchResult {
            matched_slots,
            applied_criteria,
        }
    }

    fn in_range(&self, day: NaiveDate) -> bool {
        self.date_range
            .is_none_or(|(from, to)| day >= from && day <= to)
    }
}
