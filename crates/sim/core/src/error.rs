//! Common error infrastructure for castsim-core.
//!
//! Two families of failures exist:
//!
//! - [`ConfigError`]: the inputs cannot form a usable engine (empty rotation,
//!   unknown spell, inconsistent catalog). Reported at construction; no
//!   partial engine is returned.
//! - [`RunError`]: an engine invariant was violated mid-run. These are
//!   defects in resolution or time advancement, never valid encounter states.
//!   The run is aborted and its in-progress metrics are discarded.
//!
//! Running out of mana is *not* an error. It is recorded in the metrics.

use crate::tick::Tick;

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    Validation,

    /// Engine invariant violated; the run cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an engine defect.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all castsim-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait SimError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Construction-time configuration failures.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("rotation is empty: at least one spell is required")]
    EmptyRotation,

    #[error("rotation references unknown spell '{name}'")]
    UnknownSpell { name: String },

    #[error("spell '{name}' is a proc and cannot be placed in a rotation")]
    ProcInRotation { name: String },

    #[error("spell catalog contains duplicate entry '{name}'")]
    DuplicateSpell { name: String },

    #[error("spell '{name}' has min damage {min} above max damage {max}")]
    InvalidDamageRange { name: String, min: f64, max: f64 },

    #[error("spell '{name}' is instant but has neither a cooldown nor a mana cost")]
    FreeInstant { name: String },

    #[error("equipment contains duplicate item id {id}")]
    DuplicateItem { id: u32 },
}

impl SimError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRotation => "CONFIG_EMPTY_ROTATION",
            Self::UnknownSpell { .. } => "CONFIG_UNKNOWN_SPELL",
            Self::ProcInRotation { .. } => "CONFIG_PROC_IN_ROTATION",
            Self::DuplicateSpell { .. } => "CONFIG_DUPLICATE_SPELL",
            Self::InvalidDamageRange { .. } => "CONFIG_INVALID_DAMAGE_RANGE",
            Self::FreeInstant { .. } => "CONFIG_FREE_INSTANT",
            Self::DuplicateItem { .. } => "CONFIG_DUPLICATE_ITEM",
        }
    }
}

/// Invariant violations that abort a run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunError {
    #[error("mana went negative ({mana:.2}) at {tick}")]
    NegativeMana { tick: Tick, mana: f64 },
}

impl SimError for RunError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeMana { .. } => "RUN_NEGATIVE_MANA",
        }
    }
}
