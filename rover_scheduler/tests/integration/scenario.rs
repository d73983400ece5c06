//! Integration test: full mission sequence.
//!
//! Boot → enable → record → drive a line → relocate → drive → disable, with
//! exactly one cleanup/init pair per mode change.

use rover_common::mode::ModeId::*;
use rover_common::mode::OutcomeCode::*;
use rover_scheduler::config::UnmappedPolicy;

use super::support::{Event, Harness, assert_lifecycle_ordering};

#[test]
fn mission_sequence_visits_expected_modes() {
    let harness = Harness::new(0);
    harness.push(&[
        InitializationComplete,
        SystemEnabled,
        RecordingComplete,
        LineComplete,
        TrajectoryComplete,
        SystemDisabled,
    ]);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);

    let mut visited = Vec::new();
    for _ in 0..7 {
        scheduler.cycle();
        visited.push(scheduler.current_mode().unwrap());
    }

    assert_eq!(
        visited,
        vec![Initialize, Disabled, Record, DriveLine, Relocate, DriveLine, Disabled]
    );
    assert_eq!(scheduler.pending_mode(), Some(Disabled));
    assert_eq!(scheduler.stats().transitions, 7);
    assert_eq!(scheduler.stats().unmapped_outcomes, 0);
}

#[test]
fn mission_sequence_lifecycle_calls_are_exact() {
    let harness = Harness::new(0);
    harness.push(&[
        InitializationComplete,
        SystemEnabled,
        RecordingComplete,
        LineComplete,
        TrajectoryComplete,
        SystemDisabled,
    ]);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(7);

    let expected = vec![
        Event::Init(Initialize),
        Event::Run(Initialize),
        Event::Cleanup(Initialize),
        Event::Init(Disabled),
        Event::Run(Disabled),
        Event::Cleanup(Disabled),
        Event::Init(Record),
        Event::Run(Record),
        Event::Cleanup(Record),
        Event::Init(DriveLine),
        Event::Run(DriveLine),
        Event::Cleanup(DriveLine),
        Event::Init(Relocate),
        Event::Run(Relocate),
        Event::Cleanup(Relocate),
        Event::Init(DriveLine),
        Event::Run(DriveLine),
        Event::Cleanup(DriveLine),
        Event::Init(Disabled),
        Event::Run(Disabled),
    ];
    let events = harness.events();
    assert_eq!(events, expected);
    assert_lifecycle_ordering(&events);
}

#[test]
fn no_change_cycles_do_not_reinit() {
    let harness = Harness::new(0);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(3);
    harness.push(&[InitializationComplete]);
    scheduler.run_cycles(3);

    let events = harness.events();
    let inits = events.iter().filter(|e| matches!(e, Event::Init(_))).count();
    let runs = events.iter().filter(|e| matches!(e, Event::Run(_))).count();
    assert_eq!(inits, 2);
    assert_eq!(runs, 6);
    assert_eq!(scheduler.current_mode(), Some(Disabled));
}
