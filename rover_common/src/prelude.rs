//! Prelude module for common re-exports.
//!
//! ```rust
//! use rover_common::prelude::*;
//! ```

// ─── Modes ──────────────────────────────────────────────────────────
pub use crate::mode::{ModeId, OutcomeCode};

// ─── Timing ─────────────────────────────────────────────────────────
pub use crate::tick::{MonotonicTicks, SimulatedTicks, TickSource};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{LOOP_PERIOD_MS, MODE_COUNT};
