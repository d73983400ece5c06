//! Rover Common Library
//!
//! Shared vocabulary for all rover workspace crates: the closed set of
//! operating mode identifiers, the outcome codes a mode reports at the end of
//! each run step, system constants, the monotonic tick-source abstraction and
//! TOML configuration loading.
//!
//! # Module Structure
//!
//! - [`mode`] - `ModeId` and `OutcomeCode` enumerations
//! - [`tick`] - Monotonic millisecond tick sources
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - System-wide constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use rover_common::prelude::*;
//!
//! assert_eq!(ModeId::default(), ModeId::Initialize);
//! assert_eq!(ModeId::DriveLine.to_string(), "drive_line");
//! assert_eq!(OutcomeCode::default(), OutcomeCode::NoChange);
//! ```

pub mod config;
pub mod consts;
pub mod mode;
pub mod prelude;
pub mod tick;
