//! Dense leaf storage on top of Faer.
//!
//! Near-field blocks are kept as a full `faer::Mat<T>` of shape
//! (row-range size × column-range size). `dense_apply` is the
//! multiply-accumulate kernel shared by every dense product in the crate.

use crate::core::traits::Scalar;
use crate::core::types::TransposeMode;
use crate::error::HError;
use faer::{Mat, MatMut, MatRef};

/// Computes `y = alpha * op(a) * x + beta * y`.
///
/// When `beta` is zero the previous contents of `y` are ignored, so a
/// freshly allocated (or NaN-filled) output is overwritten cleanly.
pub fn dense_apply<T: Scalar>(
    a: MatRef<'_, T>,
    x: MatRef<'_, T>,
    mut y: MatMut<'_, T>,
    trans: TransposeMode,
    alpha: T,
    beta: T,
) -> Result<(), HError> {
    let transposed = trans.is_transposed();
    let (m, n) = if transposed {
        (a.ncols(), a.nrows())
    } else {
        (a.nrows(), a.ncols())
    };
    HError::check_dims("block input rows", n, x.nrows())?;
    HError::check_dims("block output rows", m, y.nrows())?;
    HError::check_dims("block operand columns", x.ncols(), y.ncols())?;

    for c in 0..x.ncols() {
        if transposed {
            // Column i of `a` is contiguous: dot products.
            for i in 0..m {
                let mut acc = T::zero();
                for k in 0..n {
                    acc = acc + a[(k, i)] * x[(k, c)];
                }
                y[(i, c)] = if beta == T::zero() {
                    alpha * acc
                } else {
                    alpha * acc + beta * y[(i, c)]
                };
            }
        } else {
            // Column-major traversal: one axpy per column of `a`.
            for i in 0..m {
                y[(i, c)] = if beta == T::zero() { T::zero() } else { beta * y[(i, c)] };
            }
            for k in 0..n {
                let s = alpha * x[(k, c)];
                for i in 0..m {
                    y[(i, c)] = y[(i, c)] + a[(i, k)] * s;
                }
            }
        }
    }
    Ok(())
}

/// A near-field block stored in full.
#[derive(Debug, Clone)]
pub struct DenseBlock<T> {
    pub(crate) mat: Mat<T>,
}

impl<T: Scalar> DenseBlock<T> {
    pub fn new(mat: Mat<T>) -> Self {
        Self { mat }
    }

    /// Construct from raw column-major storage.
    pub fn from_raw(nrows: usize, ncols: usize, data: &[T]) -> Result<Self, HError> {
        HError::check_dims("dense block storage", nrows * ncols, data.len())?;
        Ok(Self::new(Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i])))
    }

    pub fn rows(&self) -> usize {
        self.mat.nrows()
    }

    pub fn columns(&self) -> usize {
        self.mat.ncols()
    }

    pub fn matrix(&self) -> MatRef<'_, T> {
        self.mat.as_ref()
    }

    pub fn apply(
        &self,
        x: MatRef<'_, T>,
        y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError> {
        dense_apply(self.mat.as_ref(), x, y, trans, alpha, beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_is_column_major() {
        let b = DenseBlock::from_raw(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(b.matrix()[(1, 0)], 2.0);
        assert_eq!(b.matrix()[(0, 2)], 5.0);
        assert!(DenseBlock::from_raw(2, 2, &[1.0; 3]).is_err());
    }

    #[test]
    fn beta_zero_overwrites_nan() {
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 1.0 } else { 0.0 });
        let x = Mat::from_fn(2, 1, |i, _| (i + 1) as f64);
        let mut y = Mat::from_fn(2, 1, |_, _| f64::NAN);
        dense_apply(a.as_ref(), x.as_ref(), y.as_mut(), TransposeMode::NoTranspose, 3.0, 0.0).unwrap();
        assert_eq!(y[(0, 0)], 3.0);
        assert_eq!(y[(1, 0)], 6.0);
    }

    #[test]
    fn transpose_swaps_shape_check() {
        let b = DenseBlock::new(Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64));
        let x = Mat::from_fn(2, 1, |_, _| 1.0);
        let mut y = Mat::from_fn(3, 1, |_, _| 0.0);
        b.apply(x.as_ref(), y.as_mut(), TransposeMode::Transpose, 1.0, 0.0).unwrap();
        assert_eq!(y[(0, 0)], 3.0);
        assert_eq!(y[(2, 0)], 7.0);

        let err = b
            .apply(x.as_ref(), y.as_mut(), TransposeMode::NoTranspose, 1.0, 0.0)
            .unwrap_err();
        assert_eq!(err, HError::dims("block input rows", 3, 2));
    }

    #[test]
    fn accumulates_with_beta_on_rectangular_block() {
        let a = Mat::from_fn(3, 4, |i, j| (i as f64) - 0.5 * (j as f64));
        let x = Mat::from_fn(4, 2, |i, c| (i + c) as f64 + 0.25);
        let y0 = Mat::from_fn(3, 2, |i, c| 1.0 + (i * 2 + c) as f64);
        let (alpha, beta) = (1.5, -0.5);

        let mut y = y0.clone();
        dense_apply(a.as_ref(), x.as_ref(), y.as_mut(), TransposeMode::NoTranspose, alpha, beta).unwrap();
        for c in 0..2 {
            for i in 0..3 {
                let ax: f64 = (0..4).map(|k| a[(i, k)] * x[(k, c)]).sum();
                assert!((y[(i, c)] - (alpha * ax + beta * y0[(i, c)])).abs() < 1e-12);
            }
        }

        let xt = Mat::from_fn(3, 2, |i, c| (2 * i + c) as f64 - 1.0);
        let yt0 = Mat::from_fn(4, 2, |i, c| (i as f64) * 0.5 - c as f64);
        let mut yt = yt0.clone();
        dense_apply(a.as_ref(), xt.as_ref(), yt.as_mut(), TransposeMode::Transpose, alpha, beta).unwrap();
        for c in 0..2 {
            for j in 0..4 {
                let atx: f64 = (0..3).map(|k| a[(k, j)] * xt[(k, c)]).sum();
                assert!((yt[(j, c)] - (alpha * atx + beta * yt0[(j, c)])).abs() < 1e-12);
            }
        }
    }
}
