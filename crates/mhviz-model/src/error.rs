#![forbid(unsafe_code)]

//! Error type for model operations.

use std::fmt;

/// Failures of model-level operations.
///
/// Inconsistent measurements are not errors at this level; they are reported
/// as [`ValidationIssue`](crate::ValidationIssue)s so a panel can show them.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Resampling stride must be at least 1.
    InvalidStride(usize),
    /// A y-domain whose bounds are not finite or not increasing.
    InvalidDomain { min: f64, max: f64 },
    /// No family registered under this id.
    UnknownFamily(String),
    /// The provider returned a dataset with nothing to show.
    EmptyDataset,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStride(stride) => {
                write!(f, "resampling stride must be >= 1 (got {stride})")
            }
            Self::InvalidDomain { min, max } => {
                write!(f, "invalid y-domain [{min}, {max}]: bounds must be finite and min < max")
            }
            Self::UnknownFamily(id) => write!(f, "unknown algorithm family: {id}"),
            Self::EmptyDataset => write!(f, "dataset has no families and no comparisons"),
        }
    }
}

impl std::error::Error for ModelError {}

/// Standard result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_value() {
        assert!(ModelError::InvalidStride(0).to_string().contains("got 0"));
        assert!(
            ModelError::UnknownFamily("BXYZ".into())
                .to_string()
                .contains("BXYZ")
        );
        let domain = ModelError::InvalidDomain { min: 5.0, max: 1.0 };
        assert!(domain.to_string().contains("[5, 1]"));
    }
}
