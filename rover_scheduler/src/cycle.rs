//! Fixed-period scheduler loop.
//!
//! ## Cycle
//! 1. Busy-wait until `loop_period_ms` has passed since the previous cycle
//!    started. The first cycle (nothing active yet) does not wait.
//! 2. If the pending mode differs from the current one: `cleanup()` the
//!    current mode, `init()` the pending one, make it current.
//! 3. `run()` the current mode once.
//! 4. Look up the next mode in the transition table and store it as pending.
//!
//! ## Timing
//! Cycle starts are taken from [`TickSource::now_us`], so the period floor
//! holds in real time even when the millisecond tick trails the clock.
//! Statistics are reported in whole milliseconds, rounded down.
//!
//! ## RT Setup
//! With the `rt` feature, [`rt_setup`] locks memory, pins the thread to one
//! core and switches it to `SCHED_FIFO`. Without it only the stack prefault
//! runs, so the loop works unprivileged in simulation.

use rover_common::mode::{ModeId, OutcomeCode};
use rover_common::tick::TickSource;
use tracing::{debug, info, warn};

use crate::config::{SchedulerConfig, UnmappedPolicy};
#[cfg(feature = "rt")]
use crate::error::RtStep;
use crate::error::SchedulerError;
use crate::registry::{ModeRegistry, ModeSlot};
use crate::transition::next_mode;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Gap between the last two cycle starts [ms], rounded down.
    pub last_gap_ms: u32,
    /// Smallest observed gap [ms] (`u32::MAX` until two cycles ran).
    pub min_gap_ms: u32,
    /// Largest observed gap [ms].
    pub max_gap_ms: u32,
    /// Duration of the last cycle body (transition + run + resolve) [ms].
    pub last_body_ms: u32,
    /// Longest cycle body [ms].
    pub max_body_ms: u32,
    /// Cycle bodies that took longer than the period.
    pub overruns: u64,
    /// Mode changes performed.
    pub transitions: u64,
    /// Outcomes with no row in the transition table.
    pub unmapped_outcomes: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_gap_ms: 0,
            min_gap_ms: u32::MAX,
            max_gap_ms: 0,
            last_body_ms: 0,
            max_body_ms: 0,
            overruns: 0,
            transitions: 0,
            unmapped_outcomes: 0,
        }
    }

    #[inline]
    pub fn record_gap(&mut self, gap_ms: u32) {
        self.last_gap_ms = gap_ms;
        self.min_gap_ms = self.min_gap_ms.min(gap_ms);
        self.max_gap_ms = self.max_gap_ms.max(gap_ms);
    }

    /// Record a body duration [µs]. Returns `true` if it overran `period_ms`.
    #[inline]
    pub fn record_body(&mut self, body_us: u32, period_ms: u32) -> bool {
        let body_ms = body_us / 1000;
        self.cycle_count += 1;
        self.last_body_ms = body_ms;
        self.max_body_ms = self.max_body_ms.max(body_ms);
        let overrun = body_us > period_ms.saturating_mul(1000);
        if overrun {
            self.overruns += 1;
        }
        overrun
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Rate Limiting ──────────────────────────────────────────────────

/// Spin until at least `period_ms` of real time has passed since the
/// `now_us` read `since_us`.
///
/// Returns the `now_us` read that ended the wait. The source's `lag_us` is
/// added to the target, so a truncating clock cannot end the wait early.
/// Differences use wrapping arithmetic; a counter rollover inside the wait is
/// harmless.
#[inline]
pub fn wait_for_period<T: TickSource>(ticks: &T, since_us: u32, period_ms: u32) -> u32 {
    let target_us = period_ms
        .saturating_mul(1000)
        .saturating_add(ticks.lag_us());
    loop {
        let now = ticks.now_us();
        if now.wrapping_sub(since_us) >= target_us {
            return now;
        }
        ticks.relax();
    }
}

// ─── Scheduler ──────────────────────────────────────────────────────

/// The mode scheduler.
///
/// Owns every mode (through the registry) and the tick source. `current` and
/// `next` are registry slots; a mode is active exactly while it is `current`.
pub struct Scheduler<T: TickSource> {
    registry: ModeRegistry,
    ticks: T,
    period_ms: u32,
    policy: UnmappedPolicy,
    stats_log_interval: u64,
    current: Option<ModeSlot>,
    next: Option<ModeSlot>,
    /// `now_us` at the start of the previous cycle.
    last_start_us: u32,
    stats: CycleStats,
}

impl<T: TickSource> Scheduler<T> {
    /// Build a scheduler that will start in `ModeId::Initialize`.
    ///
    /// Nothing is initialized yet; the first [`cycle`](Self::cycle) does that.
    pub fn new(
        registry: ModeRegistry,
        ticks: T,
        config: &SchedulerConfig,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        let next = registry.slot_of(ModeId::Initialize);
        let last_start_us = ticks.now_us();

        info!(
            modes = registry.len(),
            period_ms = config.loop_period_ms,
            policy = ?config.unmapped_outcome,
            "scheduler created"
        );

        Ok(Self {
            registry,
            ticks,
            period_ms: config.loop_period_ms,
            policy: config.unmapped_outcome,
            stats_log_interval: config.stats_log_interval,
            current: None,
            next,
            last_start_us,
            stats: CycleStats::new(),
        })
    }

    /// Run forever.
    pub fn run(&mut self) -> ! {
        info!(period_ms = self.period_ms, "entering scheduler loop");
        loop {
            self.cycle();
        }
    }

    /// Run exactly `cycles` cycles.
    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.cycle();
        }
    }

    /// Execute one cycle.
    pub fn cycle(&mut self) {
        // Step 1: period floor. Nothing active yet means the very first cycle.
        let start_us = if self.current.is_some() {
            wait_for_period(&self.ticks, self.last_start_us, self.period_ms)
        } else {
            self.ticks.now_us()
        };
        if self.stats.cycle_count > 0 {
            self.stats
                .record_gap(start_us.wrapping_sub(self.last_start_us) / 1000);
        }
        self.last_start_us = start_us;

        // Step 2: lifecycle.
        if self.next != self.current {
            self.switch_mode();
        }

        // Step 3: execution.
        let outcome = match self.current {
            Some(slot) => self.registry.get_mut(slot).run(),
            None => OutcomeCode::NoChange,
        };

        // Step 4: resolution.
        self.resolve_next(outcome);

        let body_us = self.ticks.now_us().wrapping_sub(start_us);
        if self.stats.record_body(body_us, self.period_ms)
            && (self.stats.overruns <= 10 || self.stats.overruns % 1000 == 0)
        {
            warn!(
                overrun = self.stats.overruns,
                body_us,
                period_ms = self.period_ms,
                "cycle overran its period"
            );
        }

        if self.stats_log_interval != 0 && self.stats.cycle_count % self.stats_log_interval == 0 {
            debug!(
                cycles = self.stats.cycle_count,
                min_gap_ms = self.stats.min_gap_ms,
                max_gap_ms = self.stats.max_gap_ms,
                max_body_ms = self.stats.max_body_ms,
                overruns = self.stats.overruns,
                transitions = self.stats.transitions,
                "scheduler stats"
            );
        }
    }

    /// cleanup(current) → init(next) → current = next.
    fn switch_mode(&mut self) {
        let from = self.current.map(|slot| self.registry.id_of(slot));
        let to = self.next.map(|slot| self.registry.id_of(slot));

        if let Some(old) = self.current {
            self.registry.get_mut(old).cleanup();
        }
        if let Some(new) = self.next {
            self.registry.get_mut(new).init();
        }
        self.current = self.next;
        self.stats.transitions += 1;

        info!(
            from = from.map_or("none", ModeId::as_str),
            to = to.map_or("none", ModeId::as_str),
            cycle = self.stats.cycle_count,
            "mode transition"
        );
    }

    fn resolve_next(&mut self, outcome: OutcomeCode) {
        let Some(current) = self.current else {
            return;
        };
        let current_id = self.registry.id_of(current);
        let next_id = next_mode(current_id, outcome);

        if let Some(slot) = self.registry.slot_of(next_id) {
            self.next = Some(slot);
            return;
        }

        self.stats.unmapped_outcomes += 1;
        self.next = match self.policy {
            UnmappedPolicy::Hold => Some(current),
            UnmappedPolicy::Disable => self.registry.slot_of(ModeId::Disabled),
        };
        warn!(
            mode = %current_id,
            %outcome,
            policy = ?self.policy,
            "no transition defined for outcome"
        );
    }

    /// Mode that ran in the last cycle, if any.
    pub fn current_mode(&self) -> Option<ModeId> {
        self.current.map(|slot| self.registry.id_of(slot))
    }

    /// Mode that becomes current at the next cycle boundary.
    pub fn pending_mode(&self) -> Option<ModeId> {
        self.next.map(|slot| self.registry.id_of(slot))
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }
}

// ─── RT Setup ───────────────────────────────────────────────────────

/// Stack depth faulted in before the loop starts [bytes].
const PREFAULT_STACK_BYTES: usize = 256 * 1024;

/// Write one byte per page of a large stack frame so later cycles never take
/// a page fault on the stack.
#[inline(never)]
fn prefault_stack() {
    let mut frame = [0u8; PREFAULT_STACK_BYTES];
    for page in frame.chunks_mut(4096) {
        page[0] = 1;
    }
    core::hint::black_box(&mut frame);
}

#[cfg(feature = "rt")]
fn failed(step: RtStep) -> impl Fn(nix::errno::Errno) -> SchedulerError {
    move |source| SchedulerError::RtSetup { step, source }
}

/// Prepare the calling thread for the scheduler loop.
///
/// Call once, before [`Scheduler::run`], from the thread that will run it.
/// With the `rt` feature: lock all memory, prefault the stack, pin the thread
/// to `cpu_core` and switch it to `SCHED_FIFO` at `rt_priority`. Without it,
/// only the prefault runs.
pub fn rt_setup(cpu_core: usize, rt_priority: i32) -> Result<(), SchedulerError> {
    #[cfg(feature = "rt")]
    {
        use nix::errno::Errno;
        use nix::sched::{CpuSet, sched_setaffinity};
        use nix::sys::mman::{MlockallFlags, mlockall};
        use nix::unistd::Pid;

        mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE)
            .map_err(failed(RtStep::LockMemory))?;
        prefault_stack();

        let mut cpus = CpuSet::new();
        cpus.set(cpu_core).map_err(failed(RtStep::PinCpu))?;
        sched_setaffinity(Pid::from_raw(0), &cpus).map_err(failed(RtStep::PinCpu))?;

        let param = libc::sched_param {
            sched_priority: rt_priority,
        };
        // SAFETY: `param` outlives the call; pid 0 is the calling thread.
        let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
        Errno::result(ret).map_err(failed(RtStep::SetFifo))?;

        info!(cpu_core, rt_priority, "thread locked, pinned and on SCHED_FIFO");
    }

    #[cfg(not(feature = "rt"))]
    {
        prefault_stack();
        debug!(cpu_core, rt_priority, "built without rt, skipping lock/pin/FIFO");
    }

    Ok(())
}

/// True if the calling thread runs under a real-time scheduling policy.
pub fn detect_rt_mode() -> bool {
    #[cfg(target_os = "linux")]
    {
        // SAFETY: pid 0 queries the calling thread; no pointers involved.
        let policy = unsafe { libc::sched_getscheduler(0) };
        policy == libc::SCHED_FIFO || policy == libc::SCHED_RR
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
