//! Instrumented modes shared by the integration tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rover_common::mode::{ModeId, OutcomeCode};
use rover_common::tick::{SimulatedTicks, TickSource};
use rover_scheduler::config::{SchedulerConfig, UnmappedPolicy};
use rover_scheduler::{Mode, ModeRegistry, Scheduler};

pub const PERIOD_MS: u32 = 10;

/// One observed lifecycle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Init(ModeId),
    Run(ModeId),
    Cleanup(ModeId),
}

/// Mode that logs every call and pops its outcome from a shared queue.
struct RecordingMode {
    id: ModeId,
    log: Rc<RefCell<Vec<Event>>>,
    outcomes: Rc<RefCell<VecDeque<OutcomeCode>>>,
    ticks: SimulatedTicks,
    run_starts: Rc<RefCell<Vec<u32>>>,
    run_cost_ms: Rc<Cell<u32>>,
}

impl Mode for RecordingMode {
    fn id(&self) -> ModeId {
        self.id
    }

    fn init(&mut self) {
        self.log.borrow_mut().push(Event::Init(self.id));
    }

    fn run(&mut self) -> OutcomeCode {
        self.log.borrow_mut().push(Event::Run(self.id));
        self.run_starts.borrow_mut().push(self.ticks.now_ms());
        self.ticks.advance(self.run_cost_ms.get());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(OutcomeCode::NoChange)
    }

    fn cleanup(&mut self) {
        self.log.borrow_mut().push(Event::Cleanup(self.id));
    }
}

/// Shared handles into a scheduler built from `RecordingMode`s.
pub struct Harness {
    pub log: Rc<RefCell<Vec<Event>>>,
    pub outcomes: Rc<RefCell<VecDeque<OutcomeCode>>>,
    pub ticks: SimulatedTicks,
    pub run_starts: Rc<RefCell<Vec<u32>>>,
    pub run_cost_ms: Rc<Cell<u32>>,
}

impl Harness {
    pub fn new(start_ms: u32) -> Self {
        Self {
            log: Rc::default(),
            outcomes: Rc::default(),
            ticks: SimulatedTicks::new(start_ms, 1),
            run_starts: Rc::default(),
            run_cost_ms: Rc::new(Cell::new(0)),
        }
    }

    pub fn scheduler(&self, policy: UnmappedPolicy) -> Scheduler<SimulatedTicks> {
        let registry = ModeRegistry::new(ModeId::ALL.iter().map(|id| {
            Box::new(RecordingMode {
                id: *id,
                log: Rc::clone(&self.log),
                outcomes: Rc::clone(&self.outcomes),
                ticks: self.ticks.clone(),
                run_starts: Rc::clone(&self.run_starts),
                run_cost_ms: Rc::clone(&self.run_cost_ms),
            }) as Box<dyn Mode>
        }))
        .expect("full mode set");

        let config = SchedulerConfig {
            loop_period_ms: PERIOD_MS,
            unmapped_outcome: policy,
            stats_log_interval: 0,
        };
        Scheduler::new(registry, self.ticks.clone(), &config).expect("valid config")
    }

    pub fn push(&self, outcomes: &[OutcomeCode]) {
        self.outcomes.borrow_mut().extend(outcomes.iter().copied());
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn run_starts(&self) -> Vec<u32> {
        self.run_starts.borrow().clone()
    }
}

/// Panics unless the log is a valid sequence of non-overlapping activations.
///
/// Every `init` happens with nothing active, every `cleanup` closes the
/// activation that is open, and every `run` belongs to the open activation.
pub fn assert_lifecycle_ordering(events: &[Event]) {
    let mut active: Option<ModeId> = None;
    for (i, event) in events.iter().enumerate() {
        match *event {
            Event::Init(id) => {
                assert_eq!(active, None, "event {i}: init {id} while {active:?} active");
                active = Some(id);
            }
            Event::Cleanup(id) => {
                assert_eq!(active, Some(id), "event {i}: cleanup {id} not active");
                active = None;
            }
            Event::Run(id) => {
                assert_eq!(active, Some(id), "event {i}: run {id} without init");
            }
        }
    }
}
