//! Date-specific overrides of a weekly rule.
//!
//! An exception either closes a day (vacation, sick leave, holiday) or replaces
//! its working windows (a shortened day such as 31 December 09:00–15:00).
//! Exceptions always take priority over the rule.

use chrono::NaiveDate;

use crate::error::{EngineError, Result};
use crate::window::TimeWindow;

/// What an exception says about a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityOverride<'a> {
    /// The exception is for another day; fall through to the next source.
    NotApplicable,
    /// The day is closed regardless of the rule.
    Closed,
    /// The day's windows are exactly these, regardless of the rule.
    Windows(&'a [TimeWindow]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExceptionKind {
    Closed,
    Windows(Vec<TimeWindow>),
}

/// An override bound to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityException {
    day: NaiveDate,
    kind: ExceptionKind,
}

impl AvailabilityException {
    /// Close `day` entirely.
    pub fn closed(day: NaiveDate) -> Self {
        Self {
            day,
            kind: ExceptionKind::Closed,
        }
    }

    /// Replace the windows of `day`.
    ///
    /// # Errors
    /// `EngineError::EmptyTimeWindows` if `windows` is empty.
    pub fn windows(day: NaiveDate, windows: Vec<TimeWindow>) -> Result<Self> {
        if windows.is_empty() {
            return Err(EngineError::EmptyTimeWindows);
        }
        Ok(Self {
            day,
            kind: ExceptionKind::Windows(windows),
        })
    }

    /// One closure per day of the inclusive range `[from, to]`.
    pub fn closed_range(from: NaiveDate, to: NaiveDate) -> Result<Vec<Self>> {
        Ok(days_between(from, to)?.map(Self::closed).collect())
    }

    /// One window override per day of the inclusive range `[from, to]`.
    pub fn windows_range(
        from: NaiveDate,
        to: NaiveDate,
        windows: Vec<TimeWindow>,
    ) -> Result<Vec<Self>> {
        days_between(from, to)?
            .map(|day| Self::windows(day, windows.clone()))
            .collect()
    }

    /// The calendar day this exception replaces.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Whether the day is closed rather than given override windows.
    pub fn is_closure(&self) -> bool {
        matches!(self.kind, ExceptionKind::Closed)
    }

    /// How this exception affects `day`; `NotApplicable` for any other day.
    pub fn override_for(&self, day: NaiveDate) -> AvailabilityOverride<'_> {
        if day != self.day {
            return AvailabilityOverride::NotApplicable;
        }
        match &self.kind {
            ExceptionKind::Closed => AvailabilityOverride::Closed,
            ExceptionKind::Windows(windows) => AvailabilityOverride::Windows(windows),
        }
    }
}

/// Inclusive day iterator.
///
/// # Errors
/// `EngineError::InvalidRange` if `from > to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Result<impl Iterator<Item = NaiveDate>> {
    if from > to {
        return Err(EngineError::InvalidRange { from, to });
    }
    Ok(from.iter_days().take_while(move |day| *day <= to))
}
