//! Scheduler configuration (TOML).
//!
//! ```toml
//! [shared]
//! service_name = "rover-01"
//!
//! [scheduler]
//! loop_period_ms = 10
//! unmapped_outcome = "hold"
//! stats_log_interval = 1000
//!
//! [[simulation.modes]]
//! mode = "initialize"
//! run_cycles = 5
//! outcomes = ["initialization_complete"]
//! ```
//!
//! Every section is optional; missing fields take their defaults.

use std::path::Path;

use rover_common::config::{ConfigError, ConfigLoader, SharedConfig};
use rover_common::consts::{
    LOOP_PERIOD_MS, LOOP_PERIOD_MS_MAX, LOOP_PERIOD_MS_MIN, STATS_LOG_INTERVAL_DEFAULT,
};
use rover_common::mode::{ModeId, OutcomeCode};
use serde::{Deserialize, Serialize};

// ─── Top-Level Config ───────────────────────────────────────────────

/// Complete scheduler binary configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoverConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl RoverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.scheduler.validate()?;
        self.simulation.validate()
    }
}

// ─── Scheduler Section ──────────────────────────────────────────────

/// What the scheduler does when the transition table has no row for the
/// (current mode, outcome) pair it just observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Stay in the current mode.
    #[default]
    Hold,
    /// Switch to the safe `Disabled` mode.
    Disable,
}

/// Loop timing and policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Minimum time between the starts of two cycles [ms] (default: 10).
    #[serde(default = "default_loop_period_ms")]
    pub loop_period_ms: u32,

    /// Response to an unmapped (mode, outcome) pair (default: hold).
    #[serde(default)]
    pub unmapped_outcome: UnmappedPolicy,

    /// Cycles between debug statistics lines, 0 disables (default: 1000).
    #[serde(default = "default_stats_log_interval")]
    pub stats_log_interval: u64,
}

fn default_loop_period_ms() -> u32 {
    LOOP_PERIOD_MS
}
fn default_stats_log_interval() -> u64 {
    STATS_LOG_INTERVAL_DEFAULT
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            loop_period_ms: LOOP_PERIOD_MS,
            unmapped_outcome: UnmappedPolicy::default(),
            stats_log_interval: STATS_LOG_INTERVAL_DEFAULT,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(LOOP_PERIOD_MS_MIN..=LOOP_PERIOD_MS_MAX).contains(&self.loop_period_ms) {
            return Err(ConfigError::ValidationError(format!(
                "loop_period_ms {} out of range [{}, {}]",
                self.loop_period_ms, LOOP_PERIOD_MS_MIN, LOOP_PERIOD_MS_MAX
            )));
        }
        Ok(())
    }
}

// ─── Simulation Section ─────────────────────────────────────────────

/// Scripted stand-ins for the real mode bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub modes: Vec<ModeScript>,
}

/// Behaviour of one simulated mode.
///
/// Each activation runs `run_cycles` times, then reports the next entry of
/// `outcomes` (round-robin across activations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeScript {
    pub mode: ModeId,
    pub run_cycles: u32,
    pub outcomes: Vec<OutcomeCode>,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, script) in self.modes.iter().enumerate() {
            if !script.mode.is_known() {
                return Err(ConfigError::ValidationError(format!(
                    "simulation.modes[{i}]: mode 'unknown' cannot be scripted"
                )));
            }
            if self.modes[..i].iter().any(|s| s.mode == script.mode) {
                return Err(ConfigError::ValidationError(format!(
                    "simulation.modes[{i}]: duplicate script for {}",
                    script.mode
                )));
            }
            if script.run_cycles == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "simulation.modes[{i}]: run_cycles must be >= 1"
                )));
            }
            if script.outcomes.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "simulation.modes[{i}]: outcomes cannot be empty"
                )));
            }
        }
        Ok(())
    }

    /// Script for `mode`, if any.
    pub fn script_for(&self, mode: ModeId) -> Option<&ModeScript> {
        self.modes.iter().find(|s| s.mode == mode)
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<RoverConfig, ConfigError> {
    let config = RoverConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate configuration text.
pub fn load_config_from_str(content: &str) -> Result<RoverConfig, ConfigError> {
    let config = RoverConfig::from_toml_str(content)?;
    config.validate()?;
    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────
