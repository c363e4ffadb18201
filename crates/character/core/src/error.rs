//! Common error infrastructure for character-core.
//!
//! Subsystem errors (`StateError`, `RagdollError`, `RigError`) live next to the
//! code that raises them. [`CharacterError`] aggregates them for the public API
//! and every error type implements [`ClassifiedError`].
//!
//! # Design Principles
//!
//! - **No transient failures**: nothing here performs I/O, so nothing is retried
//! - **Contract violations are loud**: unmapped selectors are rejected and logged
//! - **Stable codes**: every variant maps to a static error code for tooling

use crate::rig::RigError;
use crate::state::{RagdollError, StateError};

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Validation**: the caller passed something the character cannot act on
/// - **Internal**: the character's own bookkeeping disagrees with the host
/// - **Fatal**: a required host reference is missing; the character cannot run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid request, rejected without side effects.
    ///
    /// Examples: transition to an unregistered state, unknown target handle
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    ///
    /// Examples: a handler registered twice
    Internal,

    /// Missing required reference.
    ///
    /// Examples: skeleton without a hip bone
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all character-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who is at fault, not by impact
pub trait ClassifiedError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by the character's public operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CharacterError {
    #[error("state machine: {0}")]
    State(#[from] StateError),

    #[error("ragdoll: {0}")]
    Ragdoll(#[from] RagdollError),

    #[error("rig: {0}")]
    Rig(#[from] RigError),
}

impl ClassifiedError for CharacterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(e) => e.severity(),
            Self::Ragdoll(e) => e.severity(),
            Self::Rig(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::State(e) => e.error_code(),
            Self::Ragdoll(e) => e.error_code(),
            Self::Rig(e) => e.error_code(),
        }
    }
}
