//! # slot-engine
//!
//! Availability and slot matching for specialist scheduling.
//!
//! The engine answers one question: which discrete slots can a specialist be
//! booked for, and which of those did a client ask for? It layers a shared
//! domain time grid, a weekly working-hours rule, date-specific exceptions, and
//! finally the client's selected slots. Everything is a pure computation over
//! value types; nothing is persisted and no I/O happens here.
//!
//! ## Modules
//!
//! - [`policy`] — Domain time grid (slot length, day boundaries)
//! - [`window`] — Validated time-of-day windows, midnight-aware containment
//! - [`slot`] — `Slot` values and client `SlotKey`s
//! - [`rule`] — Weekly availability rule
//! - [`exception`] — Per-day closures and window overrides
//! - [`schedule`] — Rule + exceptions with exception priority
//! - [`domain_slots`] — Universal slot set over a date range
//! - [`generator`] — One specialist's availability over a date range
//! - [`filter`] — Universal slot set → one specialist's allowed slots
//! - [`matcher`] — Allowed slots ∩ client selection
//! - [`usecase`] — Generate-and-match, filter-and-match, bulk search
//! - [`records`] — Serializable configuration records
//! - [`localize`] — Timezone conversion at the engine boundary
//! - [`report`] — API-facing match report
//! - [`error`] — Error types

pub mod domain_slots;
pub mod error;
pub mod exception;
pub mod filter;
pub mod generator;
pub mod localize;
pub mod matcher;
pub mod policy;
pub mod records;
pub mod report;
pub mod rule;
pub mod schedule;
pub mod slot;
pub mod usecase;
pub mod window;

pub use domain_slots::generate_domain_slots;
pub use error::EngineError;
pub use exception::{AvailabilityException, AvailabilityOverride};
pub use filter::AvailabilitySlotFilter;
pub use generator::{Availability, AvailabilityDay, AvailabilityGenerator};
pub use matcher::{MatchResult, SlotMatcher};
pub use policy::{DomainTimePolicy, PolicyConfig};
pub use rule::WeeklyAvailabilityRule;
pub use schedule::AvailabilitySchedule;
pub use slot::{Slot, SlotKey};
pub use usecase::{match_specialists, specialist_schedule, FilterAndMatch, GenerateAndMatch};
pub use window::TimeWindow;
