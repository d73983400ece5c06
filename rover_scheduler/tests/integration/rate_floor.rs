//! Integration test: period floor between cycle starts.

use std::time::{Duration, Instant};

use rover_common::mode::OutcomeCode;
use rover_common::tick::{MonotonicTicks, TickSource};
use rover_scheduler::Scheduler;
use rover_scheduler::config::{SchedulerConfig, SimulationConfig, UnmappedPolicy};
use rover_scheduler::sim::build_registry;

use super::support::{Harness, PERIOD_MS};

fn gaps(starts: &[u32]) -> Vec<u32> {
    starts.windows(2).map(|w| w[1].wrapping_sub(w[0])).collect()
}

#[test]
fn first_cycle_starts_immediately() {
    let harness = Harness::new(5_000);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.cycle();
    assert_eq!(harness.run_starts(), vec![5_000]);
}

#[test]
fn gaps_respect_period_with_cheap_bodies() {
    let harness = Harness::new(0);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(50);

    let gaps = gaps(&harness.run_starts());
    assert_eq!(gaps.len(), 49);
    assert!(gaps.iter().all(|g| *g >= PERIOD_MS), "gaps: {gaps:?}");
    assert_eq!(scheduler.stats().min_gap_ms, PERIOD_MS);
    assert_eq!(scheduler.stats().overruns, 0);
}

#[test]
fn gaps_respect_period_across_transitions() {
    let harness = Harness::new(0);
    harness.run_cost_ms.set(4);
    harness.push(&[
        OutcomeCode::InitializationComplete,
        OutcomeCode::SystemEnabled,
        OutcomeCode::RecordingComplete,
        OutcomeCode::LineComplete,
    ]);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(10);

    let gaps = gaps(&harness.run_starts());
    assert!(gaps.iter().all(|g| *g == PERIOD_MS), "gaps: {gaps:?}");
}

#[test]
fn slow_body_is_not_padded_and_counts_as_overrun() {
    let harness = Harness::new(0);
    harness.run_cost_ms.set(PERIOD_MS + 5);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(4);

    let gaps = gaps(&harness.run_starts());
    assert!(gaps.iter().all(|g| *g == PERIOD_MS + 5), "gaps: {gaps:?}");
    assert_eq!(scheduler.stats().overruns, 4);
    assert_eq!(scheduler.stats().max_body_ms, PERIOD_MS + 5);
}

#[test]
fn period_holds_across_tick_rollover() {
    let harness = Harness::new(u32::MAX - 15);
    let mut scheduler = harness.scheduler(UnmappedPolicy::Hold);
    scheduler.run_cycles(6);

    let gaps = gaps(&harness.run_starts());
    assert!(gaps.iter().all(|g| *g == PERIOD_MS), "gaps: {gaps:?}");
    assert!(harness.ticks.now_ms() < 100);
}

#[test]
fn real_clock_gaps_never_short() {
    const REAL_PERIOD_MS: u32 = 5;
    let period = Duration::from_millis(u64::from(REAL_PERIOD_MS));
    let registry = build_registry(&SimulationConfig::default()).unwrap();
    let config = SchedulerConfig {
        loop_period_ms: REAL_PERIOD_MS,
        unmapped_outcome: UnmappedPolicy::Hold,
        stats_log_interval: 0,
    };
    let mut scheduler = Scheduler::new(registry, MonotonicTicks::new(), &config).unwrap();

    // 11 cycles, 10 throttled gaps.
    let started = Instant::now();
    scheduler.run_cycles(11);
    let elapsed = started.elapsed();
    assert!(elapsed >= period * 10, "elapsed {elapsed:?}");
    assert!(scheduler.stats().min_gap_ms >= REAL_PERIOD_MS);

    // `before` precedes the first cycle's start; the second starts at least
    // one period after it.
    for _ in 0..10 {
        let before = Instant::now();
        scheduler.cycle();
        scheduler.cycle();
        let gap = before.elapsed();
        assert!(gap >= period, "gap {gap:?}");
    }
}
