//! Startup error types.
//!
//! The scheduler loop itself has no error channel: modes report through
//! `OutcomeCode`. Errors here can only occur before the loop starts.

use std::fmt;

use nix::errno::Errno;
use rover_common::config::ConfigError;
use rover_common::mode::ModeId;
use thiserror::Error;

/// Mode registry construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A mode instance reported `ModeId::Unknown`.
    #[error("mode '{0}' reports the Unknown id")]
    UnknownMode(&'static str),

    /// Two instances share one id.
    #[error("mode {0} registered more than once")]
    DuplicateMode(ModeId),

    /// No instance for a required id.
    #[error("no mode registered for {0}")]
    MissingMode(ModeId),

    /// More instances than registry slots.
    #[error("registry full ({0} slots)")]
    Capacity(usize),
}

/// Anything that stops the scheduler from starting.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    /// A real-time preparation syscall failed.
    #[error("RT setup failed to {step}: {source}")]
    RtSetup {
        step: RtStep,
        #[source]
        source: Errno,
    },
}

/// Steps of the real-time thread preparation, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtStep {
    LockMemory,
    PinCpu,
    SetFifo,
}

impl fmt::Display for RtStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LockMemory => "lock memory",
            Self::PinCpu => "pin CPU",
            Self::SetFifo => "set SCHED_FIFO",
        })
    }
}
