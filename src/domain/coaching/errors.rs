//! Error types for the coaching flow.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::AIError;

/// Errors surfaced by the coaching and feedback use cases.
#[derive(Debug, Clone, Error)]
pub enum CoachingError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The text-generation service could not produce an answer.
    ///
    /// Never returned to callers of the classifier or generator; they log it
    /// and fall back to static content.
    #[error("Text generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("No technique available: the catalog is empty")]
    EmptyCatalog,

    #[error("Failed to write feedback log: {0}")]
    LogWriteFailed(String),

    #[error("Failed to read feedback log: {0}")]
    LogReadFailed(String),
}

impl CoachingError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CoachingError::Validation(_) => "VALIDATION_FAILED",
            CoachingError::GenerationUnavailable(_) => "GENERATION_UNAVAILABLE",
            CoachingError::EmptyCatalog => "EMPTY_CATALOG",
            CoachingError::LogWriteFailed(_) => "LOG_WRITE_FAILED",
            CoachingError::LogReadFailed(_) => "LOG_READ_FAILED",
        }
    }
}

impl From<AIError> for CoachingError {
    fn from(err: AIError) -> Self {
        CoachingError::GenerationUnavailable(err.to_string())
    }
}

/// Errors raised while building the technique catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(String),

    #[error("Failed to parse catalog file: {0}")]
    Parse(String),

    #[error("Duplicate technique name in catalog: '{0}'")]
    DuplicateTechnique(String),

    #[error("Technique at position {0} has an empty name")]
    UnnamedTechnique(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(CoachingError::EmptyCatalog.code(), "EMPTY_CATALOG");
        assert_eq!(
            CoachingError::LogWriteFailed("disk full".into()).code(),
            "LOG_WRITE_FAILED"
        );
        assert_eq!(
            CoachingError::LogReadFailed("denied".into()).code(),
            "LOG_READ_FAILED"
        );
        assert_eq!(
            CoachingError::from(ValidationError::empty_field("goal")).code(),
            "VALIDATION_FAILED"
        );
    }

    #[test]
    fn ai_error_becomes_generation_unavailable() {
        let err: CoachingError = AIError::unavailable("quota exhausted").into();
        assert!(matches!(err, CoachingError::GenerationUnavailable(_)));
        assert!(err.to_string().contains("quota exhausted"));
    }

    #[test]
    fn catalog_error_displays_duplicate_name() {
        let err = CatalogError::DuplicateTechnique("Temptation Bundling".into());
        assert_eq!(
            err.to_string(),
            "Duplicate technique name in catalog: 'Temptation Bundling'"
        );
    }
}
