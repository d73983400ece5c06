//! Integration test: outcomes with no transition-table row.

use rover_common::mode::ModeId;
use rover_common::mode::OutcomeCode::*;
use rover_scheduler::config::UnmappedPolicy;

use super::support::{Event, Harness, assert_lifecycle_ordering};

/// Boot, enable, start driving, then report an outcome DriveLine does not
/// understand.
fn drive_then_unmapped(policy: UnmappedPolicy) -> (Harness, Option<ModeId>, u64) {
    let harness = Harness::new(0);
    harness.push(&[
        InitializationComplete,
        SystemEnabled,
        RecordingComplete,
        SystemEnabled,
    ]);
    let mut scheduler = harness.scheduler(policy);
    scheduler.run_cycles(6);
    let current = scheduler.current_mode();
    let unmapped = scheduler.stats().unmapped_outcomes;
    (harness, current, unmapped)
}

#[test]
fn hold_keeps_driving() {
    let (harness, current, unmapped) = drive_then_unmapped(UnmappedPolicy::Hold);
    assert_eq!(current, Some(ModeId::DriveLine));
    assert_eq!(unmapped, 1);

    let events = harness.events();
    assert_lifecycle_ordering(&events);
    assert!(!events.contains(&Event::Cleanup(ModeId::DriveLine)));
}

#[test]
fn disable_falls_back_to_safe_mode() {
    let (harness, current, unmapped) = drive_then_unmapped(UnmappedPolicy::Disable);
    assert_eq!(current, Some(ModeId::Disabled));
    assert_eq!(unmapped, 1);

    let events = harness.events();
    assert_lifecycle_ordering(&events);
    let cleanup = events
        .iter()
        .position(|e| *e == Event::Cleanup(ModeId::DriveLine))
        .unwrap();
    assert_eq!(events[cleanup + 1], Event::Init(ModeId::Disabled));
}

#[test]
fn unmapped_is_distinct_from_no_change() {
    let harness = Harness::new(0);
    harness.push(&[NoChange, NoChange, LineComplete]);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(2);
    assert_eq!(scheduler.stats().unmapped_outcomes, 0);
    scheduler.cycle();
    assert_eq!(scheduler.stats().unmapped_outcomes, 1);
    assert_eq!(scheduler.current_mode(), Some(ModeId::Initialize));
}
