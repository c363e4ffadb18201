use crate::error::{ClassifiedError, ErrorSeverity};
use crate::host::TargetId;

/// Errors raised by rig operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RigError {
    #[error("{0} does not exist in the scene")]
    TargetNotFound(TargetId),
}

impl ClassifiedError for RigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TargetNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TargetNotFound(_) => "RIG_TARGET_NOT_FOUND",
        }
    }
}
