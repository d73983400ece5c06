//! Monotonic millisecond tick sources.
//!
//! Counters are `u32` and wrap; callers compare ticks with `wrapping_sub`, so
//! a rollover never stalls the loop.
//!
//! Sources also expose a microsecond view ([`TickSource::now_us`]) for the
//! period wait. A real clock read in whole milliseconds can trail real time by
//! up to 1 ms, enough to start a cycle early; the microsecond view plus
//! [`TickSource::lag_us`] bounds that error.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic, non-decreasing millisecond counter.
pub trait TickSource {
    /// Current tick [ms]. Wraps at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Current time [µs], wrapping.
    ///
    /// Only differences are meaningful. The default scales `now_ms`, which is
    /// exact for sources that move in whole milliseconds; the product wraps
    /// consistently, so `wrapping_sub` of two reads still gives the elapsed
    /// time across a millisecond rollover.
    #[inline]
    fn now_us(&self) -> u32 {
        self.now_ms().wrapping_mul(1000)
    }

    /// Worst-case amount `now_us` trails real time [µs]. Zero for exact sources.
    #[inline]
    fn lag_us(&self) -> u32 {
        0
    }

    /// Called once per spin of a busy-wait.
    ///
    /// Hardware sources leave this as a CPU spin hint. Simulated sources use
    /// it to let time pass.
    #[inline]
    fn relax(&self) {
        core::hint::spin_loop();
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    #[inline]
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    #[inline]
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }

    #[inline]
    fn lag_us(&self) -> u32 {
        (**self).lag_us()
    }

    #[inline]
    fn relax(&self) {
        (**self).relax()
    }
}

/// Production tick source backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTicks {
    origin: Instant,
}

impl MonotonicTicks {
    /// Start counting from zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicTicks {
    #[inline]
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap.
        self.origin.elapsed().as_millis() as u32
    }

    #[inline]
    fn now_us(&self) -> u32 {
        self.origin.elapsed().as_micros() as u32
    }

    /// `as_micros` truncates the sub-microsecond part.
    #[inline]
    fn lag_us(&self) -> u32 {
        1
    }
}

/// Deterministic tick source for tests, benches and dry runs.
///
/// Clones share the same counter, so a test can hold one handle while the
/// scheduler owns another. Every `relax()` advances time by `step_ms`.
#[derive(Debug, Clone)]
pub struct SimulatedTicks {
    now: Rc<Cell<u32>>,
    step_ms: u32,
}

impl SimulatedTicks {
    /// Start at `start_ms`, advancing `step_ms` per busy-wait spin.
    pub fn new(start_ms: u32, step_ms: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
            step_ms,
        }
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Jump to an absolute tick.
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Default for SimulatedTicks {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl TickSource for SimulatedTicks {
    #[inline]
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    #[inline]
    fn relax(&self) {
        self.advance(self.step_ms);
    }
}
