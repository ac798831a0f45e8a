//! Error types for the diff engine.

use std::fmt;

/// Which of the two compared documents an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The old (left) document.
    Old,
    /// The new (right) document.
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => write!(f, "old"),
            Side::New => write!(f, "new"),
        }
    }
}

/// Errors that can occur while computing a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the inputs is not text.
    #[error("invalid {side} input: {reason}")]
    InvalidInput { side: Side, reason: String },

    /// The requested comparison method is not known.
    #[error("unsupported diff method: {0}")]
    UnsupportedMethod(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiffError {
    /// Create an invalid-input error for one side.
    pub fn invalid_input(side: Side, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            side,
            reason: reason.into(),
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_the_side() {
        let err = DiffError::invalid_input(Side::New, "not valid UTF-8");
        assert_eq!(err.to_string(), "invalid new input: not valid UTF-8");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DiffError = io.into();
        assert!(matches!(err, DiffError::Io(_)));
    }

    #[test]
    fn every_variant_is_constructible() {
        let errors = [
            DiffError::invalid_input(Side::Old, "bad"),
            DiffError::UnsupportedMethod("diffBogus".into()),
            DiffError::Config("expected a table".into()),
            DiffError::Io(std::io::Error::other("gone")),
        ];
        for err in &errors {
            match err {
                DiffError::InvalidInput { .. }
                | DiffError::UnsupportedMethod(_)
                | DiffError::Config(_)
                | DiffError::Io(_) => assert!(!err.to_string().is_empty()),
            }
        }
    }
}
