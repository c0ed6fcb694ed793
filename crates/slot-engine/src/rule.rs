//! A specialist's recurring weekly working hours.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, Result};
use crate::window::TimeWindow;

/// Active weekdays plus the windows worked on each of them.
///
/// The same windows apply to every active weekday. An optional validity period
/// limits the rule to `[active_from, active_until]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAvailabilityRule {
    /// Bit `n` set means weekday `n` (0 = Monday) is a working day.
    weekdays: u8,
    time_windows: Vec<TimeWindow>,
    active_from: Option<NaiveDate>,
    active_until: Option<NaiveDate>,
}

impl WeeklyAvailabilityRule {
    /// # Errors
    /// - `EngineError::EmptyWeekdays` if `weekdays` yields nothing.
    /// - `EngineError::EmptyTimeWindows` if `time_windows` is empty.
    pub fn new(
        weekdays: impl IntoIterator<Item = Weekday>,
        time_windows: Vec<TimeWindow>,
    ) -> Result<Self> {
        let mask = weekdays
            .into_iter()
            .fold(0u8, |mask, wd| mask | (1 << wd.num_days_from_monday()));
        if mask == 0 {
            return Err(EngineError::EmptyWeekdays);
        }
        if time_windows.is_empty() {
            return Err(EngineError::EmptyTimeWindows);
        }
        Ok(Self {
            weekdays: mask,
            time_windows,
            active_from: None,
            active_until: None,
        })
    }

    /// Build a rule from weekday indices where 0 = Monday and 6 = Sunday.
    ///
    /// # Errors
    /// `EngineError::InvalidWeekday` for any index above 6, plus the errors of
    /// [`WeeklyAvailabilityRule::new`].
    pub fn from_indices(indices: &[u8], time_windows: Vec<TimeWindow>) -> Result<Self> {
        let weekdays = indices
            .iter()
            .map(|&i| weekday_from_index(i))
            .collect::<Result<Vec<_>>>()?;
        Self::new(weekdays, time_windows)
    }

    /// Restrict the rule to an inclusive validity period. `None` leaves that
    /// side open.
    ///
    /// # Errors
    /// `EngineError::InvalidRange` if both bounds are given and inverted.
    pub fn with_validity(
        mut self,
        active_from: Option<NaiveDate>,
        active_until: Option<NaiveDate>,
    ) -> Result<Self> {
        if let (Some(from), Some(to)) = (active_from, active_until) {
            if from > to {
                return Err(EngineError::InvalidRange { from, to });
            }
        }
        self.active_from = active_from;
        self.active_until = active_until;
        Ok(self)
    }

    pub fn applies_to(&self, day: NaiveDate) -> bool {
        let in_period = self.active_from.is_none_or(|from| day >= from)
            && self.active_until.is_none_or(|until| day <= until);
        in_period && self.weekdays & (1 << day.weekday().num_days_from_monday()) != 0
    }

    /// Working windows for `day`; empty when the rule does not cover it.
    pub fn windows_for(&self, day: NaiveDate) -> &[TimeWindow] {
        if self.applies_to(day) {
            &self.time_windows
        } else {
            &[]
        }
    }

    /// Covered weekdays, Monday first.
    pub fn weekdays(&self) -> Vec<Weekday> {
        (0..7u8)
            .filter(|i| self.weekdays & (1 << i) != 0)
            .filter_map(|i| weekday_from_index(i).ok())
            .collect()
    }

    /// Windows applied on every covered weekday.
    pub fn time_windows(&self) -> &[TimeWindow] {
        &self.time_windows
    }
}

/// Map 0..=6 to Monday..=Sunday.
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    match index {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        other => Err(EngineError::InvalidWeekday(other)),
    }
}
