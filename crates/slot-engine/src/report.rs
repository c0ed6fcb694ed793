//! JSON-friendly view of a [`MatchResult`] for API consumers.

use serde::{Deserialize, Serialize};

use crate::matcher::MatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSlotDto {
    /// `YYYY-MM-DD`, local to the specialist.
    pub day: String,
    /// `HH:MM`, local to the specialist.
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub status: MatchStatus,
    pub matched_slots: Vec<MatchedSlotDto>,
    pub applied_criteria: Vec<String>,
}

impl From<&MatchResult> for MatchReport {
    fn from(result: &MatchResult) -> Self {
        let status = if result.has_match() {
            MatchStatus::Matched
        } else {
            MatchStatus::NoMatch
        };
        Self {
            status,
            matched_slots: result
                .matched_slots
                .iter()
                .map(|slot| MatchedSlotDto {
                    day: slot.day.format("%Y-%m-%d").to_string(),
                    start_time: slot.start.format("%H:%M").to_string(),
                })
                .collect(),
            applied_criteria: result.applied_criteria.clone(),
        }
    }
}
