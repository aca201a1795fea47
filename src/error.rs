use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{}: expected a {}x{} matrix, got {}x{}", .op, .expected.0, .expected.1, .found.0, .found.1)]
    Dimension {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("singular matrix")]
    SingularMatrix,
}

impl MatrixError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        MatrixError::InvalidArgument(msg.into())
    }

    pub fn dimension(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> Self {
        MatrixError::Dimension {
            op,
            expected,
            found,
        }
    }
}

/// What a mutating operation does when it cannot be carried out.
///
/// `Raise` hands the error back to the caller. `Silent` logs it and leaves
/// the matrix untouched, so a chain of operations keeps going.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Raise,
    Silent,
}

impl ErrorPolicy {
    pub fn from_silent(silent: bool) -> Self {
        if silent {
            ErrorPolicy::Silent
        } else {
            ErrorPolicy::Raise
        }
    }

    pub fn is_silent(self) -> bool {
        self == ErrorPolicy::Silent
    }

    /// Routes `result` through the policy: errors are either returned or
    /// swallowed after a warning.
    pub fn apply(self, result: Result<(), MatrixError>) -> Result<(), MatrixError> {
        match (result, self) {
            (Ok(()), _) => Ok(()),
            (Err(err), ErrorPolicy::Silent) => {
                log::warn!("suppressed matrix error: {}", err);
                Ok(())
            }
            (Err(err), ErrorPolicy::Raise) => Err(err),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default_raises() {
        let err = MatrixError::SingularMatrix;
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Raise);
        assert_eq!(
            ErrorPolicy::default().apply(Err(err.clone())),
            Err(err.clone())
        );
        assert_eq!(ErrorPolicy::Silent.apply(Err(err)), Ok(()));
        assert!(ErrorPolicy::from_silent(true).is_silent());
        assert!(!ErrorPolicy::from_silent(false).is_silent());
    }

    #[test]
    fn test_policy_serde() {
        assert_eq!(
            serde_json::to_string(&ErrorPolicy::Silent).unwrap(),
            "\"silent\""
        );
        let policy: ErrorPolicy = serde_json::from_str("\"raise\"").unwrap();
        assert_eq!(policy, ErrorPolicy::Raise);
        assert!(serde_json::from_str::<ErrorPolicy>("\"loud\"").is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MatrixError::dimension("multiply", (2, 3), (3, 3)).to_string(),
            "multiply: expected a 2x3 matrix, got 3x3"
        );
        assert_eq!(
            MatrixError::invalid("power must be an integer").to_string(),
            "invalid argument: power must be an integer"
        );
    }
}
