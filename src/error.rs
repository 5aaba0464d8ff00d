use thiserror::Error;

// Unified error type for hmat

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HError {
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("H-matrix is not initialized")]
    UninitializedAccess,
    #[error("DOF index {index} out of range for {size} DOFs")]
    InvalidPermutationIndex { index: usize, size: usize },
    #[error("invalid cluster tree: {0}")]
    InvalidClusterTree(String),
    #[error("block compression failed: {0}")]
    CompressionFailed(String),
}

impl HError {
    /// Shorthand for a [`HError::DimensionMismatch`].
    pub(crate) fn dims(context: &'static str, expected: usize, found: usize) -> Self {
        HError::DimensionMismatch { context, expected, found }
    }

    /// Returns `Err(DimensionMismatch)` unless `found == expected`.
    pub(crate) fn check_dims(context: &'static str, expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::dims(context, expected, found))
        }
    }
}
