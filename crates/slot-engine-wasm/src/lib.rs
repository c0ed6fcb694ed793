//! WASM bindings for slot-engine.
//!
//! Exposes the domain slot grid, per-specialist schedules and slot matching to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use slot_engine::localize::selection_keys;
use slot_engine::records::{parse_timezone, SpecialistProfile, SpecialistRecord};
use slot_engine::report::MatchReport;
use slot_engine::window::parse_time;
use slot_engine::{
    generate_domain_slots, specialist_schedule, AvailabilityGenerator, DomainTimePolicy,
    GenerateAndMatch, PolicyConfig, Slot, SlotKey, SlotMatcher,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    day: String,
    start: String,
    end: String,
}

impl From<&Slot> for SlotDto {
    fn from(slot: &Slot) -> Self {
        Self {
            day: slot.day.format("%Y-%m-%d").to_string(),
            start: slot.start.format("%H:%M").to_string(),
            end: slot.end.format("%H:%M").to_string(),
        }
    }
}

#[derive(Serialize)]
struct AvailabilityDayDto {
    day: String,
    slots: Vec<SlotDto>,
}

/// A client selection in the specialist's local calendar.
#[derive(Serialize, Deserialize)]
struct SlotKeyDto {
    /// `YYYY-MM-DD`
    day: String,
    /// `HH:MM`
    start: String,
}

impl From<&SlotKey> for SlotKeyDto {
    fn from(key: &SlotKey) -> Self {
        Self {
            day: key.day.format("%Y-%m-%d").to_string(),
            start: key.start.format("%H:%M").to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Parse an optional policy JSON object; `None` means the default grid.
fn parse_policy(policy_json: Option<String>) -> Result<DomainTimePolicy, JsValue> {
    let config = match policy_json {
        Some(json) => serde_json::from_str::<PolicyConfig>(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid policy JSON: {}", e)))?,
        None => PolicyConfig::default(),
    };
    DomainTimePolicy::try_from(config).map_err(js_err)
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_specialist(json: &str) -> Result<SpecialistProfile, JsValue> {
    let record: SpecialistRecord = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid specialist JSON: {}", e)))?;
    record.to_profile().map_err(js_err)
}

fn parse_keys(json: &str) -> Result<Vec<SlotKey>, JsValue> {
    let dtos: Vec<SlotKeyDto> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid selection JSON: {}", e)))?;
    dtos.iter()
        .map(|dto| Ok(SlotKey::new(parse_date(&dto.day)?, parse_time(&dto.start).map_err(js_err)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// The universal slot set for `days_ahead` days from `date_from`.
///
/// Returns a JSON array of `{day, start, end}` objects.
///
/// # Arguments
/// - `policy_json` -- Optional `{slot_duration_minutes, day_start, day_end}`
/// - `date_from` -- First day (`YYYY-MM-DD`)
/// - `days_ahead` -- Number of days
#[wasm_bindgen(js_name = "generateDomainSlots")]
pub fn generate_domain_slots_js(
    policy_json: Option<String>,
    date_from: &str,
    days_ahead: u32,
) -> Result<String, JsValue> {
    let policy = parse_policy(policy_json)?;
    let slots = generate_domain_slots(&policy, parse_date(date_from)?, days_ahead);
    to_json(&slots.iter().map(SlotDto::from).collect::<Vec<_>>())
}

/// One specialist's displayable slots for `days_ahead` days from `date_from`.
#[wasm_bindgen(js_name = "specialistSchedule")]
pub fn specialist_schedule_js(
    policy_json: Option<String>,
    specialist_json: &str,
    date_from: &str,
    days_ahead: u32,
) -> Result<String, JsValue> {
    let policy = parse_policy(policy_json)?;
    let profile = parse_specialist(specialist_json)?;
    let slots = specialist_schedule(&policy, &profile.schedule, parse_date(date_from)?, days_ahead);
    to_json(&slots.iter().map(SlotDto::from).collect::<Vec<_>>())
}

/// Availability grouped by day for the inclusive range `[date_from, date_to]`.
///
/// Returns a JSON array of `{day, slots}` objects, one per day, empty days
/// included.
#[wasm_bindgen(js_name = "generateAvailability")]
pub fn generate_availability(
    policy_json: Option<String>,
    specialist_json: &str,
    date_from: &str,
    date_to: &str,
) -> Result<String, JsValue> {
    let policy = parse_policy(policy_json)?;
    let profile = parse_specialist(specialist_json)?;
    let availability = AvailabilityGenerator::new(&policy, &profile.schedule)
        .generate(parse_date(date_from)?, parse_date(date_to)?)
        .map_err(js_err)?;

    let dtos: Vec<AvailabilityDayDto> = availability
        .days
        .iter()
        .map(|day| AvailabilityDayDto {
            day: day.day.format("%Y-%m-%d").to_string(),
            slots: day.slots.iter().map(SlotDto::from).collect(),
        })
        .collect();
    to_json(&dtos)
}

/// Convert absolute client timestamps into selections in the specialist's zone.
///
/// `instants_json` is a JSON array of RFC 3339 strings. Returns a JSON array of
/// `{day, start}` objects.
#[wasm_bindgen(js_name = "selectionKeys")]
pub fn selection_keys_js(instants_json: &str, specialist_timezone: &str) -> Result<String, JsValue> {
    let raw: Vec<String> = serde_json::from_str(instants_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid instants JSON: {}", e)))?;
    let instants = raw
        .iter()
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let tz = parse_timezone(specialist_timezone).map_err(js_err)?;

    let keys = selection_keys(&instants, tz);
    to_json(&keys.iter().map(SlotKeyDto::from).collect::<Vec<_>>())
}

/// Generate one specialist's availability and intersect it with a selection.
///
/// `selected_json` is a JSON array of `{day, start}` objects local to the
/// specialist. Returns a match report:
/// `{status, matched_slots: [{day, start_time}], applied_criteria}`.
#[wasm_bindgen(js_name = "matchSpecialist")]
pub fn match_specialist(
    policy_json: Option<String>,
    specialist_json: &str,
    selected_json: &str,
    date_from: &str,
    date_to: &str,
) -> Result<String, JsValue> {
    let policy = parse_policy(policy_json)?;
    let profile = parse_specialist(specialist_json)?;
    let matcher = SlotMatcher::new(parse_keys(selected_json)?).map_err(js_err)?;

    let result = GenerateAndMatch::new(&policy, &profile.schedule, &matcher)
        .execute(parse_date(date_from)?, parse_date(date_to)?)
        .map_err(js_err)?;
    to_json(&MatchReport::from(&result))
}
