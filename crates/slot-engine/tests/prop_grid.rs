//! Property-based tests for the slot grid, filtering and matching.
//!
//! These check invariants that must hold for any valid policy and schedule,
//! not just the hand-picked cases in the other test files.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use slot_engine::{
    generate_domain_slots, AvailabilityException, AvailabilityGenerator, AvailabilitySchedule,
    AvailabilitySlotFilter, DomainTimePolicy, SlotKey, SlotMatcher, TimeWindow,
    WeeklyAvailabilityRule,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Slot lengths that divide a full day evenly.
fn arb_dividing_minutes() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(15i64),
        Just(20),
        Just(30),
        Just(45),
        Just(60),
        Just(90),
        Just(120),
        Just(240),
    ]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Minutes after midnight; 1440 stands for the end of the day.
fn minute_to_time(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt((minute / 60) % 24, minute % 60, 0).unwrap()
}

/// A valid window on a quarter-hour grid, midnight end and full day included.
fn arb_window() -> impl Strategy<Value = TimeWindow> {
    (0u32..96)
        .prop_flat_map(|start| (Just(start), (start + 1)..=96))
        .prop_map(|(start, end)| {
            if start == 0 && end == 96 {
                TimeWindow::full_day()
            } else {
                TimeWindow::new(minute_to_time(start * 15), minute_to_time(end * 15)).unwrap()
            }
        })
}

fn arb_schedule() -> impl Strategy<Value = AvailabilitySchedule> {
    (
        proptest::collection::btree_set(0u8..7, 1..=7),
        proptest::collection::vec(arb_window(), 1..=3),
        0i64..7,
        proptest::option::of(proptest::collection::vec(arb_window(), 1..=2)),
    )
        .prop_map(|(weekdays, windows, exception_offset, override_windows)| {
            let weekdays: Vec<u8> = weekdays.into_iter().collect();
            let rule = WeeklyAvailabilityRule::from_indices(&weekdays, windows).unwrap();
            let day = start_day() + Duration::days(exception_offset);
            let exception = match override_windows {
                Some(windows) => AvailabilityException::windows(day, windows).unwrap(),
                None => AvailabilityException::closed(day),
            };
            AvailabilitySchedule::new(rule, vec![exception])
        })
}

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: A dividing slot length tiles the full day exactly
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn full_day_grid_is_complete(
        minutes in arb_dividing_minutes(),
        date_from in arb_date(),
        days in 1u32..=10,
    ) {
        let policy = DomainTimePolicy::with_minutes(NaiveTime::MIN, NaiveTime::MIN, minutes).unwrap();
        let slots = generate_domain_slots(&policy, date_from, days);

        let per_day = (1440 / minutes) as usize;
        prop_assert_eq!(slots.len(), per_day * days as usize);

        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1], "not strictly ordered: {:?} {:?}", pair[0], pair[1]);
        }
        for day_slots in slots.chunks(per_day) {
            prop_assert_eq!(day_slots[0].start, NaiveTime::MIN);
            prop_assert_eq!(day_slots[per_day - 1].end, NaiveTime::MIN);
            for pair in day_slots.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Every grid slot has the policy's length and stays on its day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn grid_slots_have_policy_length(
        minutes in 1i64..=300,
        (start, end) in (0u32..96).prop_flat_map(|start| (Just(start), (start + 1)..=96)),
        date_from in arb_date(),
    ) {
        let policy = DomainTimePolicy::with_minutes(
            minute_to_time(start * 15),
            minute_to_time(end * 15),
            minutes,
        )
        .unwrap();

        let slots = generate_domain_slots(&policy, date_from, 2);
        for slot in &slots {
            let (from, to) = slot.span();
            prop_assert_eq!(to - from, Duration::minutes(minutes));
            prop_assert_eq!(from.date(), slot.day);
        }
        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1], "not chronological: {:?} {:?}", pair[0], pair[1]);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Bounds that would spill past midnight are rejected
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn wrapped_bounds_are_rejected(
        (end, start) in (1u32..96).prop_flat_map(|end| (Just(end), end..96)),
        minutes in 1i64..=300,
    ) {
        let result = DomainTimePolicy::with_minutes(
            minute_to_time(start * 15),
            minute_to_time(end * 15),
            minutes,
        );
        prop_assert!(result.is_err());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Filtering the universal set equals generating per specialist
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn filter_agrees_with_generator(
        minutes in arb_dividing_minutes(),
        schedule in arb_schedule(),
    ) {
        let policy = DomainTimePolicy::with_minutes(NaiveTime::MIN, NaiveTime::MIN, minutes).unwrap();

        let generated = AvailabilityGenerator::new(&policy, &schedule)
            .generate(start_day(), start_day() + Duration::days(6))
            .unwrap()
            .into_slots();
        let filtered = AvailabilitySlotFilter::new(&schedule)
            .filter(&generate_domain_slots(&policy, start_day(), 7));

        prop_assert_eq!(generated, filtered);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Allowed slots lie inside a window of their day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn allowed_slots_fit_their_day_windows(
        minutes in arb_dividing_minutes(),
        schedule in arb_schedule(),
    ) {
        let policy = DomainTimePolicy::with_minutes(NaiveTime::MIN, NaiveTime::MIN, minutes).unwrap();
        let domain = generate_domain_slots(&policy, start_day(), 7);

        let allowed = AvailabilitySlotFilter::new(&schedule).filter(&domain);

        for slot in &allowed {
            let windows = schedule.windows_on(slot.day);
            prop_assert!(windows.iter().any(|w| w.contains(slot)), "{:?} escaped", slot);
        }
        let candidates: HashSet<_> = domain.iter().collect();
        prop_assert!(allowed.iter().all(|slot| candidates.contains(slot)));
    }
}

// ---------------------------------------------------------------------------
// Property 6: Matches are exactly the allowed slots the client selected
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn matches_are_selected_allowed_slots(
        schedule in arb_schedule(),
        picks in proptest::collection::vec((0i64..7, 0u32..24), 1..=12),
    ) {
        let policy = DomainTimePolicy::default();
        let domain = generate_domain_slots(&policy, start_day(), 7);
        let allowed = AvailabilitySlotFilter::new(&schedule).filter(&domain);

        let keys: Vec<SlotKey> = picks
            .iter()
            .map(|(offset, hour)| {
                SlotKey::new(
                    start_day() + Duration::days(*offset),
                    NaiveTime::from_hms_opt(*hour, 0, 0).unwrap(),
                )
            })
            .collect();
        let selected: HashSet<SlotKey> = keys.iter().copied().collect();
        let result = SlotMatcher::new(keys).unwrap().match_slots(&allowed);

        let expected: Vec<_> = allowed
            .iter()
            .filter(|slot| selected.contains(&slot.key()))
            .copied()
            .collect();
        prop_assert_eq!(&result.matched_slots, &expected);
        prop_assert_eq!(result.has_match(), !expected.is_empty());
    }
}
