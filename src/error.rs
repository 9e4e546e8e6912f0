//! Error types for Estabilidad operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Estabilidad operations.
///
/// Provides detailed context about failures including invalid parameter
/// spaces, inconsistent run-groups, and report lookups that cannot be
/// satisfied.
///
/// # Examples
///
/// ```
/// use estabilidad::error::EstabilidadError;
///
/// let err = EstabilidadError::InsufficientRuns { found: 1 };
/// assert!(err.to_string().contains("at least 2 runs"));
/// ```
#[derive(Debug)]
pub enum EstabilidadError {
    /// Parameter space cannot be sampled (bad bounds, empty list, duplicate
    /// name, or more dimensions than the sequence generator supports).
    InvalidParameterSpace {
        /// What made the space invalid
        message: String,
    },

    /// Invalid hyperparameter value in a sampled configuration.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Artifacts within one run-group disagree on topic or feature count.
    InconsistentRunGroup {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Pairwise comparison needs at least two runs.
    InsufficientRuns {
        /// Number of runs found in the group
        found: usize,
    },

    /// Model family name not present in the registry.
    UnknownFamily {
        /// Requested family name
        name: String,
    },

    /// Sample index outside the configuration list.
    UnknownSample {
        /// Requested sample index
        index: usize,
        /// Number of sampled configurations
        len: usize,
    },

    /// Results requested before the corresponding fit completed.
    NotFitted {
        /// What was accessed too early
        what: String,
    },

    /// Model fitting failed to converge or rejected its input.
    FitFailure {
        /// Family name
        family: String,
        /// Failure description
        message: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for EstabilidadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstabilidadError::InvalidParameterSpace { message } => {
                write!(f, "Invalid parameter space: {message}")
            }
            EstabilidadError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            EstabilidadError::InconsistentRunGroup { expected, actual } => {
                write!(
                    f,
                    "Inconsistent run-group: expected {expected}, got {actual}"
                )
            }
            EstabilidadError::InsufficientRuns { found } => {
                write!(
                    f,
                    "Stability needs at least 2 runs per configuration, got {found}"
                )
            }
            EstabilidadError::UnknownFamily { name } => {
                write!(f, "Unknown model family: {name}")
            }
            EstabilidadError::UnknownSample { index, len } => {
                write!(f, "Sample index {index} out of range (0..{len})")
            }
            EstabilidadError::NotFitted { what } => {
                write!(f, "{what} not available: call fit_all() first")
            }
            EstabilidadError::FitFailure { family, message } => {
                write!(f, "Fitting {family} failed: {message}")
            }
            EstabilidadError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            EstabilidadError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EstabilidadError {}

impl From<&str> for EstabilidadError {
    fn from(msg: &str) -> Self {
        EstabilidadError::Other(msg.to_string())
    }
}

impl From<String> for EstabilidadError {
    fn from(msg: String) -> Self {
        EstabilidadError::Other(msg)
    }
}

impl EstabilidadError {
    /// Create an invalid parameter space error.
    #[must_use]
    pub fn invalid_space(message: impl Into<String>) -> Self {
        Self::InvalidParameterSpace {
            message: message.into(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for EstabilidadError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<EstabilidadError> for &str {
    fn eq(&self, other: &EstabilidadError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, EstabilidadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_space_display() {
        let err = EstabilidadError::invalid_space("range min 5 > max 2");
        assert!(err.to_string().contains("Invalid parameter space"));
        assert!(err.to_string().contains("min 5 > max 2"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = EstabilidadError::InvalidHyperparameter {
            param: "n_components".to_string(),
            value: "0".to_string(),
            constraint: ">= 1".to_string(),
        };
        assert!(err.to_string().contains("Invalid hyperparameter"));
        assert!(err.to_string().contains("n_components"));
        assert!(err.to_string().contains(">= 1"));
    }

    #[test]
    fn test_inconsistent_run_group_display() {
        let err = EstabilidadError::InconsistentRunGroup {
            expected: "5 topics".to_string(),
            actual: "3 topics".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Inconsistent run-group"));
        assert!(msg.contains("5 topics"));
        assert!(msg.contains("3 topics"));
    }

    #[test]
    fn test_insufficient_runs_display() {
        let err = EstabilidadError::InsufficientRuns { found: 0 };
        assert!(err.to_string().contains("at least 2 runs"));
        assert!(err.to_string().contains('0'));
    }

    #[test]
    fn test_unknown_family_display() {
        let err = EstabilidadError::UnknownFamily {
            name: "plsa".to_string(),
        };
        assert!(err.to_string().contains("Unknown model family"));
        assert!(err.to_string().contains("plsa"));
    }

    #[test]
    fn test_unknown_sample_display() {
        let err = EstabilidadError::UnknownSample { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains("Sample index 7"));
        assert!(msg.contains("0..3"));
    }

    #[test]
    fn test_not_fitted_display() {
        let err = EstabilidadError::NotFitted {
            what: "stability reports".to_string(),
        };
        assert!(err.to_string().contains("fit_all()"));
    }

    #[test]
    fn test_fit_failure_display() {
        let err = EstabilidadError::FitFailure {
            family: "lda".to_string(),
            message: "empty matrix".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Fitting lda failed"));
        assert!(msg.contains("empty matrix"));
    }

    #[test]
    fn test_from_str() {
        let err: EstabilidadError = "test error".into();
        assert!(matches!(err, EstabilidadError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: EstabilidadError = "test error".to_string().into();
        assert!(matches!(err, EstabilidadError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_error_eq_str() {
        let err = EstabilidadError::Other("test error".to_string());
        assert!(err == "test error");
        assert!("test error" == err);
    }

    #[test]
    fn test_empty_input_helper() {
        let err = EstabilidadError::empty_input("document-term matrix");
        let msg = err.to_string();
        assert!(msg.contains("empty input"));
        assert!(msg.contains("document-term matrix"));
    }

    #[test]
    fn test_error_debug_impl() {
        let err = EstabilidadError::Other("test".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Other"));
    }

    #[test]
    fn test_error_source_none() {
        use std::error::Error;
        let err = EstabilidadError::InsufficientRuns { found: 1 };
        assert!(err.source().is_none());
    }
}
