//! Simulated modes.
//!
//! Stand-ins for the real mode bodies so the scheduler binary can run without
//! hardware. Behaviour comes from `[[simulation.modes]]`; modes without a
//! script never ask for a transition.

use rover_common::mode::{ModeId, OutcomeCode};
use tracing::debug;

use crate::config::{ModeScript, SimulationConfig};
use crate::error::RegistryError;
use crate::mode::Mode;
use crate::registry::ModeRegistry;

/// Mode that reports a scripted outcome after a fixed number of runs.
#[derive(Debug, Clone)]
pub struct ScriptedMode {
    id: ModeId,
    run_cycles: u32,
    outcomes: Vec<OutcomeCode>,
    /// Runs in the current activation.
    runs: u32,
    /// Completed `init` calls.
    activations: u64,
}

impl ScriptedMode {
    /// Report `outcomes[k % len]` on run number `run_cycles` of activation `k`.
    pub fn new(id: ModeId, run_cycles: u32, outcomes: Vec<OutcomeCode>) -> Self {
        Self {
            id,
            run_cycles,
            outcomes,
            runs: 0,
            activations: 0,
        }
    }

    /// Mode that always returns `NoChange`.
    pub fn idle(id: ModeId) -> Self {
        Self::new(id, 0, Vec::new())
    }

    pub fn from_script(script: &ModeScript) -> Self {
        Self::new(script.mode, script.run_cycles, script.outcomes.clone())
    }

    pub fn activations(&self) -> u64 {
        self.activations
    }

    fn scripted_outcome(&self) -> OutcomeCode {
        if self.outcomes.is_empty() {
            return OutcomeCode::NoChange;
        }
        let k = self.activations.saturating_sub(1) as usize % self.outcomes.len();
        self.outcomes[k]
    }
}

impl Mode for ScriptedMode {
    fn id(&self) -> ModeId {
        self.id
    }

    fn init(&mut self) {
        self.runs = 0;
        self.activations += 1;
        debug!(mode = %self.id, activation = self.activations, "simulated init");
    }

    fn run(&mut self) -> OutcomeCode {
        self.runs = self.runs.saturating_add(1);
        if self.runs == self.run_cycles {
            self.scripted_outcome()
        } else {
            OutcomeCode::NoChange
        }
    }

    fn cleanup(&mut self) {
        debug!(mode = %self.id, runs = self.runs, "simulated cleanup");
    }
}

/// Registry with one scripted (or idle) mode per `ModeId`.
pub fn build_registry(sim: &SimulationConfig) -> Result<ModeRegistry, RegistryError> {
    ModeRegistry::new(ModeId::ALL.iter().map(|id| {
        let mode = match sim.script_for(*id) {
            Some(script) => ScriptedMode::from_script(script),
            None => ScriptedMode::idle(*id),
        };
        Box::new(mode) as Box<dyn Mode>
    }))
}
