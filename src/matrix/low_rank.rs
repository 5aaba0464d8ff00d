//! Far-field blocks stored as a low-rank product `U · Vᵀ`.

use crate::core::traits::Scalar;
use crate::core::types::TransposeMode;
use crate::error::HError;
use crate::matrix::dense::dense_apply;
use faer::{Mat, MatMut, MatRef};

/// Block ≈ U · Vᵀ with U: rows × rank and V: columns × rank.
#[derive(Debug, Clone)]
pub struct LowRankBlock<T> {
    pub(crate) u: Mat<T>,
    pub(crate) v: Mat<T>,
}

impl<T: Scalar> LowRankBlock<T> {
    /// Wrap the two factors; their column counts (the rank) must agree.
    pub fn new(u: Mat<T>, v: Mat<T>) -> Result<Self, HError> {
        HError::check_dims("low-rank factor rank", u.ncols(), v.ncols())?;
        Ok(Self { u, v })
    }

    pub fn rows(&self) -> usize {
        self.u.nrows()
    }

    pub fn columns(&self) -> usize {
        self.v.nrows()
    }

    pub fn rank(&self) -> usize {
        self.u.ncols()
    }

    pub fn u(&self) -> MatRef<'_, T> {
        self.u.as_ref()
    }

    pub fn v(&self) -> MatRef<'_, T> {
        self.v.as_ref()
    }

    /// `y = alpha * op(U Vᵀ) * x + beta * y` without forming U Vᵀ.
    pub fn apply(
        &self,
        x: MatRef<'_, T>,
        y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError> {
        // (U Vᵀ)ᵀ = V Uᵀ
        let (left, right) = if trans.is_transposed() {
            (self.v.as_ref(), self.u.as_ref())
        } else {
            (self.u.as_ref(), self.v.as_ref())
        };
        HError::check_dims("block input rows", right.nrows(), x.nrows())?;
        HError::check_dims("block output rows", left.nrows(), y.nrows())?;

        let mut tmp = Mat::from_fn(self.rank(), x.ncols(), |_, _| T::zero());
        dense_apply(right, x, tmp.as_mut(), TransposeMode::Transpose, T::one(), T::zero())?;
        dense_apply(left, tmp.as_ref(), y, TransposeMode::NoTranspose, alpha, beta)
    }

    pub fn to_dense(&self) -> Mat<T> {
        let r = self.rank();
        Mat::from_fn(self.rows(), self.columns(), |i, j| {
            (0..r).fold(T::zero(), |acc, k| acc + self.u[(i, k)] * self.v[(j, k)])
        })
    }
}
