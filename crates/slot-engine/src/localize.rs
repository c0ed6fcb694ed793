//! Timezone boundary between absolute instants and the engine's local
//! `(day, time)` space.
//!
//! The engine itself is timezone-naive. Client selections arrive as absolute
//! timestamps and must be expressed in the *specialist's* zone before matching;
//! slots leave the engine as local wall-clock values and are re-expressed in
//! the viewer's zone only for display.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::policy::DomainTimePolicy;
use crate::slot::{Slot, SlotKey};

/// How to treat local times that fall in a DST gap.
///
/// Ambiguous local times (the repeated hour when clocks go back) always resolve
/// to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Drop slots whose local start does not exist.
    Skip,
    /// Move to the first valid instant after the gap.
    #[default]
    ShiftForward,
}

/// Express a client's chosen instant as a key in the specialist's calendar.
pub fn selection_key<Z: TimeZone>(instant: &DateTime<Z>, specialist_tz: Tz) -> SlotKey {
    SlotKey::from(instant.with_timezone(&specialist_tz).naive_local())
}

pub fn selection_keys<Z: TimeZone>(instants: &[DateTime<Z>], specialist_tz: Tz) -> Vec<SlotKey> {
    instants
        .iter()
        .map(|instant| selection_key(instant, specialist_tz))
        .collect()
}

/// Resolve a local wall-clock time in `tz` to an instant.
pub fn resolve_local(local: NaiveDateTime, tz: Tz, dst: DstPolicy) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => match dst {
            DstPolicy::Skip => None,
            // Gaps are whole multiples of 15 minutes and never longer than a day.
            DstPolicy::ShiftForward => (1..=96)
                .map(|step| local + Duration::minutes(15 * step))
                .find_map(|candidate| tz.from_local_datetime(&candidate).earliest()),
        },
    }
}

/// The start of `slot` (local to `specialist_tz`) as seen from `viewer_tz`.
pub fn slot_start_in(
    slot: &Slot,
    specialist_tz: Tz,
    viewer_tz: Tz,
    dst: DstPolicy,
) -> Option<DateTime<Tz>> {
    resolve_local(slot.day.and_time(slot.start), specialist_tz, dst)
        .map(|instant| instant.with_timezone(&viewer_tz))
}

/// The client-facing grid: slot starts for `days_ahead` days from `now`'s date
/// in `now`'s zone, skipping slots that already began. Days with no remaining
/// slot are omitted.
pub fn upcoming_grid(
    policy: &DomainTimePolicy,
    now: DateTime<Tz>,
    days_ahead: u32,
) -> BTreeMap<NaiveDate, Vec<DateTime<Tz>>> {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut grid = BTreeMap::new();

    for offset in 0..days_ahead {
        let day = today + Duration::days(i64::from(offset));
        let starts: Vec<DateTime<Tz>> = policy
            .iter_day_slots(day)
            .filter_map(|(start, _)| resolve_local(day.and_time(start), tz, DstPolicy::Skip))
            .filter(|start| *start >= now)
            .collect();
        if !starts.is_empty() {
            grid.insert(day, starts);
        }
    }
    grid
}
