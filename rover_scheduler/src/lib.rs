//! # Rover Scheduler Library
//!
//! Top-level control loop of the rover. Cycles the machine through a fixed
//! set of operating modes at a fixed period, forever.
//!
//! ## Pieces
//!
//! 1. **Transition table** ([`transition`]): pure `(ModeId, OutcomeCode) → ModeId`.
//! 2. **Modes** ([`mode`], [`registry`]): `init`/`run`/`cleanup` capability set,
//!    one instance per `ModeId`, built once before the loop starts.
//! 3. **Scheduler loop** ([`cycle`]): period floor, cleanup-before-init on
//!    mode changes, one `run` per cycle, next-mode resolution.
//!
//! ## Single-threaded
//!
//! The loop and every mode callback run on one thread. The only blocking
//! point is the busy-wait that enforces the period floor.

pub mod config;
pub mod cycle;
pub mod error;
pub mod mode;
pub mod registry;
pub mod sim;
pub mod transition;

pub use crate::cycle::Scheduler;
pub use crate::error::{RegistryError, RtStep, SchedulerError};
pub use crate::mode::Mode;
pub use crate::registry::{ModeRegistry, ModeSlot};
pub use crate::transition::next_mode;
