//! System-wide constants for the rover workspace.
//!
//! Single source of truth for timing limits and mode counts.

use static_assertions::const_assert;

/// Default minimum time between two scheduler cycles [ms].
pub const LOOP_PERIOD_MS: u32 = 10;

/// Lower bound for a configured loop period [ms].
pub const LOOP_PERIOD_MS_MIN: u32 = 1;

/// Upper bound for a configured loop period [ms].
pub const LOOP_PERIOD_MS_MAX: u32 = 1000;

/// Number of real (registrable) operating modes. `ModeId::Unknown` is excluded.
pub const MODE_COUNT: usize = 5;

/// Default number of cycles between two statistics log lines.
pub const STATS_LOG_INTERVAL_DEFAULT: u64 = 1000;

const_assert!(LOOP_PERIOD_MS_MIN <= LOOP_PERIOD_MS && LOOP_PERIOD_MS <= LOOP_PERIOD_MS_MAX);
const_assert!(MODE_COUNT > 0 && MODE_COUNT < u8::MAX as usize);
