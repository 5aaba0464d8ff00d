//! Core traits for hmat.

use crate::core::types::TransposeMode;
use crate::error::HError;
use faer::{Mat, MatMut, MatRef};
use num_traits::Float;

/// Scalar types the engine computes with.
pub trait Scalar: Float + Send + Sync + std::fmt::Debug + 'static {}

impl<T: Float + Send + Sync + std::fmt::Debug + 'static> Scalar for T {}

/// Exact matrix entries of the discretised operator.
///
/// This is the kernel collaborator: given the original DOF indices of a
/// block's rows and columns, return the dense `rows.len() × columns.len()`
/// block.
pub trait BlockEvaluator<T>: Sync {
    /// Evaluate `A[rows[i], columns[j]]` for all `i`, `j`.
    fn evaluate(&self, rows: &[usize], columns: &[usize]) -> Mat<T>;
}

/// Operator application: y ← alpha · op(A) · x + beta · y.
pub trait LinearOperator<T: Scalar> {
    /// Number of rows of A.
    fn rows(&self) -> usize;
    /// Number of columns of A.
    fn columns(&self) -> usize;
    /// Apply to a block of column vectors.
    fn apply(
        &self,
        x: MatRef<'_, T>,
        y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError>;

    /// Compute y = A · x for a single vector.
    fn matvec(&self, x: &[T], y: &mut [T]) -> Result<(), HError> {
        let (n_in, n_out) = (self.columns(), self.rows());
        HError::check_dims("matvec input length", n_in, x.len())?;
        HError::check_dims("matvec output length", n_out, y.len())?;
        let x_mat = MatRef::from_column_major_slice(x, n_in, 1);
        let y_mat = MatMut::from_column_major_slice_mut(y, n_out, 1);
        self.apply(x_mat, y_mat, TransposeMode::NoTranspose, T::one(), T::zero())
    }
}
