//! Mode transition table.
//!
//! Maps (current mode, run outcome) to the next mode:
//!
//! ```text
//! Initialize ──InitializationComplete──► Disabled ──SystemEnabled──► Record
//! Record ──RecordingComplete──► DriveLine ──LineComplete──► Relocate
//! DriveLine ──TrajectoryComplete──► Record
//! Relocate ──TrajectoryComplete──► DriveLine
//! Record | DriveLine | Relocate ──SystemDisabled──► Disabled
//! ```
//!
//! `NoChange` keeps the current mode. Every other pair maps to
//! `ModeId::Unknown`, which is distinct from "stay".

use rover_common::mode::{ModeId, OutcomeCode};

/// One explicit row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ModeId,
    pub outcome: OutcomeCode,
    pub to: ModeId,
}

const fn row(from: ModeId, outcome: OutcomeCode, to: ModeId) -> Transition {
    Transition { from, outcome, to }
}

/// Every defined transition. `next_mode` is the authoritative lookup; this
/// list exists for enumeration and must agree with it.
pub const TRANSITIONS: &[Transition] = &[
    row(ModeId::Initialize, OutcomeCode::InitializationComplete, ModeId::Disabled),
    row(ModeId::Disabled, OutcomeCode::SystemEnabled, ModeId::Record),
    row(ModeId::Record, OutcomeCode::RecordingComplete, ModeId::DriveLine),
    row(ModeId::Record, OutcomeCode::SystemDisabled, ModeId::Disabled),
    row(ModeId::DriveLine, OutcomeCode::LineComplete, ModeId::Relocate),
    row(ModeId::DriveLine, OutcomeCode::TrajectoryComplete, ModeId::Record),
    row(ModeId::DriveLine, OutcomeCode::SystemDisabled, ModeId::Disabled),
    row(ModeId::Relocate, OutcomeCode::TrajectoryComplete, ModeId::DriveLine),
    row(ModeId::Relocate, OutcomeCode::SystemDisabled, ModeId::Disabled),
];

/// Next mode for `current` after a run step that returned `outcome`.
///
/// Pure and total. Returns `current` for `NoChange` (even when `current` is
/// `Unknown`) and `ModeId::Unknown` for every pair without a row.
#[inline]
pub const fn next_mode(current: ModeId, outcome: OutcomeCode) -> ModeId {
    use ModeId::*;
    use OutcomeCode::*;

    match (current, outcome) {
        (_, NoChange) => current,

        (Initialize, InitializationComplete) => Disabled,

        (Disabled, SystemEnabled) => Record,

        (Record, RecordingComplete) => DriveLine,
        (Record, SystemDisabled) => Disabled,

        (DriveLine, LineComplete) => Relocate,
        (DriveLine, TrajectoryComplete) => Record,
        (DriveLine, SystemDisabled) => Disabled,

        (Relocate, TrajectoryComplete) => DriveLine,
        (Relocate, SystemDisabled) => Disabled,

        _ => Unknown,
    }
}

/// Rows leaving `from`.
pub fn outgoing(from: ModeId) -> impl Iterator<Item = &'static Transition> {
    TRANSITIONS.iter().filter(move |t| t.from == from)
}

// ─── Tests ──────────────────────────────────────────────────────────
