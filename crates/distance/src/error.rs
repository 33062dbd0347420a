//! Error types for the distance crate.

use thiserror::Error;

/// Boxed error returned by caller-supplied callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for distance operations.
pub type Result<T> = std::result::Result<T, DistanceError>;

/// Errors that can occur while computing a distance.
#[derive(Debug, Error)]
pub enum DistanceError {
    /// The substitution cost function failed
    #[error(transparent)]
    CostFunction(BoxError),

    /// The progress callback failed
    #[error("Progress callback: {0}")]
    ProgressCallback(#[source] BoxError),

    /// A failed computation was stepped again
    #[error("computation has already failed")]
    AlreadyFailed,
}

/// Error code for integration with fastlev-core error handling.
/// Range: 11xxx for distance errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceErrorCode {
    /// Substitution cost function failed
    CostFunction = 11001,
    /// Progress callback failed
    ProgressCallback = 11002,
    /// Computation stepped after failure
    AlreadyFailed = 11003,
}

impl DistanceError {
    /// Returns the error code for this error.
    pub fn code(&self) -> DistanceErrorCode {
        match self {
            DistanceError::CostFunction(_) => DistanceErrorCode::CostFunction,
            DistanceError::ProgressCallback(_) => DistanceErrorCode::ProgressCallback,
            DistanceError::AlreadyFailed => DistanceErrorCode::AlreadyFailed,
        }
    }

    /// Returns true if a progress callback caused this error.
    pub fn is_progress_failure(&self) -> bool {
        matches!(self, DistanceError::ProgressCallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_error_message() {
        let err = DistanceError::ProgressCallback("Bla bla".into());
        assert_eq!(err.to_string(), "Progress callback: Bla bla");
        assert_eq!(err.code(), DistanceErrorCode::ProgressCallback);
        assert!(err.is_progress_failure());
    }

    #[test]
    fn test_cost_error_is_transparent() {
        let err = DistanceError::CostFunction("no cost for pair".into());
        assert_eq!(err.to_string(), "no cost for pair");
        assert_eq!(err.code() as u32, 11001);
        assert!(!err.is_progress_failure());
    }
}
