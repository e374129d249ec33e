use super::common::*;
use crate::scheduling::slots::config::RestrictedWindowsConfig;
use crate::scheduling::slots::windows::{
    bookable_window, booking_slots, window_is_restricted, ServiceKind,
};
use chrono::Duration;

#[test]
fn standard_kind_accepts_only_four_hour_windows() {
    let day = date(2026, 8, 10);
    assert!(bookable_window(&window(day, 8, 12, &[1]), ServiceKind::Standard));
    assert!(!bookable_window(&window(day, 8, 20, &[1]), ServiceKind::Standard));
    assert!(!bookable_window(&window(day, 8, 11, &[1]), ServiceKind::Standard));
}

#[test]
fn full_day_kind_accepts_only_twelve_hour_windows() {
    let day = date(2026, 8, 10);
    assert!(bookable_window(&window(day, 8, 20, &[1]), ServiceKind::FullDay));
    assert!(!bookable_window(&window(day, 8, 12, &[1]), ServiceKind::FullDay));
}

#[test]
fn closed_or_exhausted_windows_are_rejected() {
    let day = date(2026, 8, 10);

    let mut closed = window(day, 8, 12, &[1]);
    closed.is_available = false;
    assert!(!bookable_window(&closed, ServiceKind::Standard));

    let mut exhausted = window(day, 8, 12, &[1]);
    exhausted.available_capacity_hours = Some(1.5);
    assert!(!bookable_window(&exhausted, ServiceKind::Standard));

    // Windows that do not report capacity hours pass on availability alone.
    let mut unreported = window(day, 8, 12, &[1]);
    unreported.available_capacity_hours = None;
    assert!(bookable_window(&unreported, ServiceKind::Standard));
}

#[test]
fn standard_window_yields_overlapping_two_hour_slots() {
    let day = date(2026, 8, 10);
    let parent = window(day, 8, 12, &[1]);
    let slots = booking_slots(&parent, ServiceKind::Standard);

    let bounds: Vec<(u32, u32)> = slots
        .iter()
        .map(|slot| {
            (
                (slot.start - at(day, 0)).num_hours() as u32,
                (slot.end - at(day, 0)).num_hours() as u32,
            )
        })
        .collect();
    assert_eq!(bounds, vec![(8, 10), (9, 11), (10, 12)]);

    for slot in &slots {
        assert!(slot.start >= parent.start && slot.end <= parent.end);
        assert_eq!(slot.end - slot.start, Duration::hours(2));
        assert_eq!(slot.window, parent);
    }
}

#[test]
fn off_hour_window_start_aligns_slots_to_whole_hours() {
    let day = date(2026, 8, 10);
    let mut parent = window(day, 8, 12, &[1]);
    parent.start += Duration::minutes(30);
    parent.end += Duration::minutes(30);

    let slots = booking_slots(&parent, ServiceKind::Standard);
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start, at(day, 9));
    assert_eq!(slots[1].start, at(day, 10));
    for slot in &slots {
        assert!(slot.start >= parent.start && slot.end <= parent.end);
    }
}

#[test]
fn full_day_window_yields_one_spanning_slot() {
    let day = date(2026, 8, 10);
    let parent = window(day, 8, 20, &[1]);
    let slots = booking_slots(&parent, ServiceKind::FullDay);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, parent.start);
    assert_eq!(slots[0].end, parent.end);
}

#[test]
fn rural_mid_day_windows_suppressed_without_anchor_job() {
    let day = date(2026, 8, 10);
    let resolver = resolver();
    let config = RestrictedWindowsConfig::default();
    let mid_day = window(day, 10, 14, &[1]);

    assert!(window_is_restricted(
        &mid_day,
        Some("Hill Country"),
        &[],
        &resolver,
        &config
    ));

    // A same-day job already in the zone (matched by city) unlocks the window.
    let anchor = job(9, day, 8, 10, None, Some("Dripping Springs"), Some(4));
    assert!(!window_is_restricted(
        &mid_day,
        Some("Hill Country"),
        &[anchor],
        &resolver,
        &config
    ));
}

#[test]
fn restriction_ignores_other_zones_and_hours() {
    let day = date(2026, 8, 10);
    let resolver = resolver();
    let config = RestrictedWindowsConfig::default();

    let mid_day = window(day, 10, 14, &[1]);
    assert!(!window_is_restricted(
        &mid_day,
        Some("3 - Central"),
        &[],
        &resolver,
        &config
    ));
    assert!(!window_is_restricted(&mid_day, None, &[], &resolver, &config));

    let morning = window(day, 8, 12, &[1]);
    assert!(!window_is_restricted(
        &morning,
        Some("Hill Country"),
        &[],
        &resolver,
        &config
    ));
}
