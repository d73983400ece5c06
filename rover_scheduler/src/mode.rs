//! Operating mode capability set.

use rover_common::mode::{ModeId, OutcomeCode};

/// One operating mode of the rover.
///
/// The scheduler owns every mode for the lifetime of the process and drives
/// it through repeated activations:
///
/// 1. `init()` - once, before the first `run()` of an activation
/// 2. `run()` - once per scheduler cycle while the mode is current
/// 3. `cleanup()` - once, when the mode stops being current, strictly before
///    the next mode's `init()`
///
/// All calls happen on the scheduler thread and must return well within one
/// loop period. The scheduler never looks at mode-internal state.
pub trait Mode {
    /// Fixed identity of this instance. Must never change and never be
    /// `ModeId::Unknown`.
    fn id(&self) -> ModeId;

    /// Name used in log lines.
    fn name(&self) -> &'static str {
        self.id().as_str()
    }

    /// Acquire resources for one activation.
    fn init(&mut self);

    /// One cycle of work. Returns `OutcomeCode::NoChange` unless a
    /// transition condition was met this cycle.
    fn run(&mut self) -> OutcomeCode;

    /// Release or quiesce resources held by this activation.
    fn cleanup(&mut self);
}
