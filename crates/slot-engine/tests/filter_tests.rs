//! Tests for filtering the universal slot set by a specialist's schedule.

use chrono::{NaiveDate, NaiveTime};
use slot_engine::{
    generate_domain_slots, AvailabilityException, AvailabilityGenerator, AvailabilitySchedule,
    AvailabilitySlotFilter, DomainTimePolicy, Slot, TimeWindow, WeeklyAvailabilityRule,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn w(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
    TimeWindow::new(t(start.0, start.1), t(end.0, end.1)).unwrap()
}

fn slot(day: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Slot {
    Slot::new(day, t(start.0, start.1), t(end.0, end.1))
}

fn schedule(windows: Vec<TimeWindow>, exceptions: Vec<AvailabilityException>) -> AvailabilitySchedule {
    let rule = WeeklyAvailabilityRule::from_indices(&[0, 1, 2, 3, 4, 5, 6], windows).unwrap();
    AvailabilitySchedule::new(rule, exceptions)
}

const DAY: (i32, u32, u32) = (2026, 1, 22);

fn day() -> NaiveDate {
    d(DAY.0, DAY.1, DAY.2)
}

// ── Boundary containment ────────────────────────────────────────────────────

#[test]
fn slot_ending_at_window_start_is_excluded() {
    let schedule = schedule(vec![w((9, 0), (18, 0))], vec![]);
    let filter = AvailabilitySlotFilter::new(&schedule);

    assert!(!filter.allows(&slot(day(), (8, 0), (9, 0))));
}

#[test]
fn slot_starting_at_window_start_is_included() {
    let schedule = schedule(vec![w((9, 0), (18, 0))], vec![]);
    let filter = AvailabilitySlotFilter::new(&schedule);

    assert!(filter.allows(&slot(day(), (9, 0), (10, 0))));
}

#[test]
fn slot_ending_at_window_end_is_included() {
    let schedule = schedule(vec![w((9, 0), (18, 0))], vec![]);
    let filter = AvailabilitySlotFilter::new(&schedule);

    assert!(filter.allows(&slot(day(), (17, 0), (18, 0))));
    assert!(!filter.allows(&slot(day(), (17, 30), (18, 30))));
}

// ── Midnight crossing ───────────────────────────────────────────────────────

#[test]
fn late_window_admits_slot_ending_at_midnight() {
    let schedule = schedule(vec![w((23, 0), (0, 0))], vec![]);
    let filter = AvailabilitySlotFilter::new(&schedule);

    assert!(filter.allows(&slot(day(), (23, 0), (0, 0))));
}

#[test]
fn late_window_rejects_slot_starting_before_it() {
    let schedule = schedule(vec![w((23, 0), (0, 0))], vec![]);
    let filter = AvailabilitySlotFilter::new(&schedule);

    assert!(!filter.allows(&slot(day(), (22, 0), (23, 0))));
}

#[test]
fn daytime_window_rejects_slot_ending_at_midnight() {
    // Naively, 23:00-00:00 has end < 18:00 and would slip through.
    let schedule = schedule(vec![w((9, 0), (18, 0))], vec![]);
    let filter = AvailabilitySlotFilter::new(&schedule);

    assert!(!filter.allows(&slot(day(), (23, 0), (0, 0))));
}

#[test]
fn full_day_window_admits_every_slot() {
    let schedule = schedule(vec![TimeWindow::full_day()], vec![]);
    let domain = generate_domain_slots(&DomainTimePolicy::default(), day(), 1);

    let allowed = AvailabilitySlotFilter::new(&schedule).filter(&domain);
    assert_eq!(allowed, domain);
}

// ── Rule and exception priority ─────────────────────────────────────────────

#[test]
fn closed_day_filters_everything_that_day() {
    let schedule = schedule(
        vec![w((9, 0), (18, 0))],
        vec![AvailabilityException::closed(day())],
    );
    let domain = generate_domain_slots(&DomainTimePolicy::default(), day(), 2);

    let allowed = AvailabilitySlotFilter::new(&schedule).filter(&domain);

    assert_eq!(allowed.len(), 9);
    assert!(allowed.iter().all(|s| s.day == d(2026, 1, 23)));
}

#[test]
fn override_day_uses_replacement_windows() {
    let schedule = schedule(
        vec![w((9, 0), (18, 0))],
        vec![AvailabilityException::windows(day(), vec![w((19, 0), (21, 0))]).unwrap()],
    );
    let domain = generate_domain_slots(&DomainTimePolicy::default(), day(), 1);

    let allowed = AvailabilitySlotFilter::new(&schedule).filter(&domain);

    assert_eq!(
        allowed,
        vec![slot(day(), (19, 0), (20, 0)), slot(day(), (20, 0), (21, 0))]
    );
}

#[test]
fn filter_keeps_input_order_and_does_not_mutate_candidates() {
    let schedule = schedule(vec![w((9, 0), (12, 0))], vec![]);
    let candidates = vec![
        slot(day(), (11, 0), (12, 0)),
        slot(day(), (7, 0), (8, 0)),
        slot(day(), (9, 0), (10, 0)),
    ];
    let before = candidates.clone();

    let allowed = AvailabilitySlotFilter::new(&schedule).filter(&candidates);

    assert_eq!(
        allowed,
        vec![slot(day(), (11, 0), (12, 0)), slot(day(), (9, 0), (10, 0))]
    );
    assert_eq!(candidates, before);
}

#[test]
fn empty_candidates_yield_empty_result() {
    let schedule = schedule(vec![w((9, 0), (12, 0))], vec![]);
    assert!(AvailabilitySlotFilter::new(&schedule).filter(&[]).is_empty());
}

#[test]
fn filter_agrees_with_generator_over_a_week() {
    let policy = DomainTimePolicy::with_minutes(t(0, 0), t(0, 0), 30).unwrap();
    let rule = WeeklyAvailabilityRule::from_indices(
        &[0, 2, 4],
        vec![w((8, 0), (11, 30)), w((22, 0), (0, 0))],
    )
    .unwrap();
    let schedule = AvailabilitySchedule::new(
        rule,
        vec![
            AvailabilityException::closed(d(2026, 1, 21)),
            AvailabilityException::windows(d(2026, 1, 24), vec![w((10, 0), (13, 0))]).unwrap(),
        ],
    );

    let generated = AvailabilityGenerator::new(&policy, &schedule)
        .generate(d(2026, 1, 19), d(2026, 1, 25))
        .unwrap()
        .into_slots();
    let filtered = AvailabilitySlotFilter::new(&schedule)
        .filter(&generate_domain_slots(&policy, d(2026, 1, 19), 7));

    assert_eq!(generated, filtered);
}
