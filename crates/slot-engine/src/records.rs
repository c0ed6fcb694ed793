//! Serializable configuration records and their mapping to engine values.
//!
//! These mirror what a persistence layer hands over for one specialist: the
//! active weekly rule and the active exceptions. Exceptions are stored as date
//! ranges and expand into one per-day [`AvailabilityException`] each.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::exception::AvailabilityException;
use crate::rule::WeeklyAvailabilityRule;
use crate::schedule::AvailabilitySchedule;
use crate::window::TimeWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// `"HH:MM"`.
    pub start: String,
    /// `"HH:MM"`; `"00:00"` means end of day.
    pub end: String,
}

impl WindowRecord {
    pub fn to_window(&self) -> Result<TimeWindow> {
        TimeWindow::parse(&self.start, &self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// 0 = Monday .. 6 = Sunday.
    pub weekdays: Vec<u8>,
    #[serde(default)]
    pub windows: Vec<WindowRecord>,
    /// Work around the clock on the active weekdays; excludes `windows`.
    #[serde(default)]
    pub full_day: bool,
    #[serde(default)]
    pub active_from: Option<NaiveDate>,
    #[serde(default)]
    pub active_until: Option<NaiveDate>,
}

impl RuleRecord {
    pub fn to_rule(&self) -> Result<WeeklyAvailabilityRule> {
        let windows = match (self.full_day, self.windows.is_empty()) {
            (true, true) => vec![TimeWindow::full_day()],
            (true, false) => {
                return Err(EngineError::InvalidRecord(
                    "rule cannot be full_day and list windows".to_string(),
                ))
            }
            (false, _) => to_windows(&self.windows)?,
        };
        WeeklyAvailabilityRule::from_indices(&self.weekdays, windows)?
            .with_validity(self.active_from, self.active_until)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKindRecord {
    /// Day off: vacation, sick leave, holiday.
    Unavailable,
    /// Special day with its own windows.
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub kind: ExceptionKindRecord,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default)]
    pub windows: Vec<WindowRecord>,
}

impl ExceptionRecord {
    /// Expand the record into one exception per day of its range.
    pub fn to_exceptions(&self) -> Result<Vec<AvailabilityException>> {
        match self.kind {
            ExceptionKindRecord::Unavailable if !self.windows.is_empty() => {
                Err(EngineError::InvalidRecord(
                    "unavailable exception cannot carry windows".to_string(),
                ))
            }
            ExceptionKindRecord::Unavailable => {
                AvailabilityException::closed_range(self.date_from, self.date_to)
            }
            ExceptionKindRecord::Override => AvailabilityException::windows_range(
                self.date_from,
                self.date_to,
                to_windows(&self.windows)?,
            ),
        }
    }
}

/// Everything the engine needs to know about one specialist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistRecord {
    pub id: String,
    /// IANA zone of the specialist's local calendar; `None` means the caller's
    /// own zone.
    #[serde(default)]
    pub timezone: Option<String>,
    pub rule: RuleRecord,
    #[serde(default)]
    pub exceptions: Vec<ExceptionRecord>,
}

impl SpecialistRecord {
    /// # Errors
    /// Any validation error of the rule, an exception, or the timezone.
    pub fn to_profile(&self) -> Result<SpecialistProfile> {
        let rule = self.rule.to_rule()?;
        let mut exceptions = Vec::new();
        for record in &self.exceptions {
            exceptions.extend(record.to_exceptions()?);
        }
        let timezone = self.timezone.as_deref().map(parse_timezone).transpose()?;
        Ok(SpecialistProfile {
            id: self.id.clone(),
            timezone,
            schedule: AvailabilitySchedule::new(rule, exceptions),
        })
    }
}

/// A validated specialist: identity, zone, and schedule.
#[derive(Debug, Clone)]
pub struct SpecialistProfile {
    pub id: String,
    pub timezone: Option<Tz>,
    pub schedule: AvailabilitySchedule,
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

fn to_windows(records: &[WindowRecord]) -> Result<Vec<TimeWindow>> {
    records.iter().map(WindowRecord::to_window).collect()
}
