use super::BehaviorState;
use crate::error::{ClassifiedError, ErrorSeverity};
use crate::host::Bone;

/// Errors raised by the state manager.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("no handler registered for {0}")]
    Unregistered(BehaviorState),

    #[error("handler for {0} registered twice")]
    DuplicateHandler(BehaviorState),
}

impl ClassifiedError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unregistered(_) => ErrorSeverity::Validation,
            Self::DuplicateHandler(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unregistered(_) => "STATE_UNREGISTERED",
            Self::DuplicateHandler(_) => "STATE_DUPLICATE_HANDLER",
        }
    }
}

/// Errors raised by the ragdoll state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RagdollError {
    #[error("skeleton has no {0} bone")]
    MissingBone(Bone),

    #[error("{0} bone has no ragdoll body")]
    NoBodyForBone(Bone),
}

impl ClassifiedError for RagdollError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingBone(_) => ErrorSeverity::Fatal,
            Self::NoBodyForBone(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingBone(_) => "RAGDOLL_MISSING_BONE",
            Self::NoBodyForBone(_) => "RAGDOLL_NO_BODY_FOR_BONE",
        }
    }
}
