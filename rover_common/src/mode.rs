//! Mode identifiers and run outcome codes.
//!
//! Both enums use `#[repr(u8)]` for a compact layout and serialize in
//! `snake_case` so they read naturally in TOML (`mode = "drive_line"`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an operating mode.
///
/// The set is closed and known at build time. `Unknown` is a sentinel that is
/// never bound to a mode instance; the transition table returns it for every
/// (mode, outcome) pair it does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ModeId {
    /// Boot-time bring-up of the platform.
    Initialize = 0,
    /// Safe state: actuators quiescent, waiting for enable.
    Disabled = 1,
    /// Line-following drive.
    DriveLine = 2,
    /// Data recording.
    Record = 3,
    /// Move to the start of the next line.
    Relocate = 4,
    /// No defined mode.
    Unknown = 0xFF,
}

impl ModeId {
    /// Every registrable mode, in declaration order. Excludes `Unknown`.
    pub const ALL: [ModeId; 5] = [
        ModeId::Initialize,
        ModeId::Disabled,
        ModeId::DriveLine,
        ModeId::Record,
        ModeId::Relocate,
    ];

    /// Short lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Disabled => "disabled",
            Self::DriveLine => "drive_line",
            Self::Record => "record",
            Self::Relocate => "relocate",
            Self::Unknown => "unknown",
        }
    }

    /// True for every id except the `Unknown` sentinel.
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl Default for ModeId {
    fn default() -> Self {
        Self::Initialize
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Why a mode's run step ended.
///
/// `NoChange` means the mode wants to keep running; every other code asks the
/// scheduler to consult the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OutcomeCode {
    NoChange = 0,
    SystemEnabled = 1,
    SystemDisabled = 2,
    LineComplete = 3,
    TrajectoryComplete = 4,
    InitializationComplete = 5,
    RecordingComplete = 6,
}

impl OutcomeCode {
    /// Every outcome code, in declaration order.
    pub const ALL: [OutcomeCode; 7] = [
        OutcomeCode::NoChange,
        OutcomeCode::SystemEnabled,
        OutcomeCode::SystemDisabled,
        OutcomeCode::LineComplete,
        OutcomeCode::TrajectoryComplete,
        OutcomeCode::InitializationComplete,
        OutcomeCode::RecordingComplete,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoChange => "no_change",
            Self::SystemEnabled => "system_enabled",
            Self::SystemDisabled => "system_disabled",
            Self::LineComplete => "line_complete",
            Self::TrajectoryComplete => "trajectory_complete",
            Self::InitializationComplete => "initialization_complete",
            Self::RecordingComplete => "recording_complete",
        }
    }
}

impl Default for OutcomeCode {
    fn default() -> Self {
        Self::NoChange
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
