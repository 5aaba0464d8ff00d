//! Wrappers letting plain dense matrices and closures act as engine collaborators.
//!
//! A `faer::Mat` held in original DOF ordering is both a kernel (its
//! entries are the exact operator) and a reference operator to compare an
//! H-matrix against. `KernelFn` turns an entry closure `(i, j) -> T` into a
//! [`BlockEvaluator`].

use crate::core::traits::{BlockEvaluator, LinearOperator, Scalar};
use crate::core::types::TransposeMode;
use crate::error::HError;
use crate::matrix::dense::dense_apply;
use faer::{Mat, MatMut, MatRef};

/// Implements the operator contract for a dense `faer::Mat`.
impl<T: Scalar> LinearOperator<T> for Mat<T> {
    fn rows(&self) -> usize {
        self.nrows()
    }
    fn columns(&self) -> usize {
        self.ncols()
    }
    fn apply(
        &self,
        x: MatRef<'_, T>,
        y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError> {
        dense_apply(self.as_ref(), x, y, trans, alpha, beta)
    }
}

/// A dense matrix in original DOF ordering evaluates its own sub-blocks.
impl<T: Scalar> BlockEvaluator<T> for Mat<T> {
    fn evaluate(&self, rows: &[usize], columns: &[usize]) -> Mat<T> {
        Mat::from_fn(rows.len(), columns.len(), |i, j| self[(rows[i], columns[j])])
    }
}

/// Kernel given entry by entry.
pub struct KernelFn<F>(pub F);

impl<T, F> BlockEvaluator<T> for KernelFn<F>
where
    T: Scalar,
    F: Fn(usize, usize) -> T + Sync,
{
    fn evaluate(&self, rows: &[usize], columns: &[usize]) -> Mat<T> {
        Mat::from_fn(rows.len(), columns.len(), |i, j| (self.0)(rows[i], columns[j]))
    }
}
