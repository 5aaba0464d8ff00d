//! Applying an H-matrix: DOF permutation and the leaf-parallel product.
//!
//! Callers work in original DOF ordering; leaves work in H-matrix ordering.
//! For `y = alpha * op(H) * x + beta * y`:
//!
//! - `NoTranspose`: `x` is permuted with the column cluster tree, `y` with
//!   the row cluster tree, and each leaf maps its column range to its row range.
//! - `Transpose`: `x` is permuted with the row cluster tree, `y` with the
//!   column cluster tree, and each leaf maps its row range to its column range.
//!
//! The result is permuted back with the same tree that permuted `y`.

use faer::{Mat, MatMut, MatRef};

use crate::cluster::ClusterTree;
use crate::core::traits::{LinearOperator, Scalar};
use crate::core::types::{RowCol, TransposeMode};
use crate::error::HError;
use crate::hmatrix::HMatrix;
use crate::parallel::accumulate_leaves;

impl<T: Scalar> HMatrix<T> {
    fn cluster_tree(&self, side: RowCol) -> &ClusterTree {
        match side {
            RowCol::Row => self.block_cluster_tree().row_cluster_tree(),
            RowCol::Column => self.block_cluster_tree().column_cluster_tree(),
        }
    }

    /// Reorder the rows of `mat` from original to H-matrix DOF ordering.
    pub fn permute_to_hmat_dofs(&self, mat: MatRef<'_, T>, side: RowCol) -> Result<Mat<T>, HError> {
        let tree = self.cluster_tree(side);
        HError::check_dims("permute_to_hmat_dofs rows", tree.number_of_dofs(), mat.nrows())?;
        let h2o = tree.hmat_to_original();
        Ok(Mat::from_fn(mat.nrows(), mat.ncols(), |p, j| mat[(h2o[p], j)]))
    }

    /// Reorder the rows of `mat` from H-matrix to original DOF ordering.
    pub fn permute_to_original_dofs(&self, mat: MatRef<'_, T>, side: RowCol) -> Result<Mat<T>, HError> {
        let tree = self.cluster_tree(side);
        HError::check_dims("permute_to_original_dofs rows", tree.number_of_dofs(), mat.nrows())?;
        let o2h = tree.original_to_hmat();
        Ok(Mat::from_fn(mat.nrows(), mat.ncols(), |i, j| mat[(o2h[i], j)]))
    }

    /// `y = alpha * op(H) * x + beta * y`, operands in original DOF ordering.
    pub fn apply(
        &self,
        x: MatRef<'_, T>,
        mut y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError> {
        if !self.is_initialized() {
            return Err(HError::UninitializedAccess);
        }
        let (input_side, output_side) = match trans {
            TransposeMode::NoTranspose => (RowCol::Column, RowCol::Row),
            TransposeMode::Transpose => (RowCol::Row, RowCol::Column),
        };
        let input_tree = self.cluster_tree(input_side);
        let output_tree = self.cluster_tree(output_side);
        HError::check_dims("apply input rows", input_tree.number_of_dofs(), x.nrows())?;
        HError::check_dims("apply output rows", output_tree.number_of_dofs(), y.nrows())?;
        HError::check_dims("apply operand columns", x.ncols(), y.ncols())?;

        log::trace!(
            "apply {:?}: {}x{} operand, alpha={:?}, beta={:?}",
            trans,
            x.nrows(),
            x.ncols(),
            alpha,
            beta
        );

        let x_perm = self.permute_to_hmat_dofs(x, input_side)?;
        // beta * y in H-matrix ordering; beta == 0 discards y entirely.
        let h2o = output_tree.hmat_to_original();
        let mut y_perm = Mat::from_fn(y.nrows(), y.ncols(), |p, j| {
            if beta == T::zero() {
                T::zero()
            } else {
                beta * y[(h2o[p], j)]
            }
        });

        accumulate_leaves(
            self.block_cluster_tree(),
            self.data(),
            x_perm.as_ref(),
            y_perm.as_mut(),
            trans,
            alpha,
            self.options(),
        )?;

        let o2h = output_tree.original_to_hmat();
        for j in 0..y.ncols() {
            for i in 0..y.nrows() {
                y[(i, j)] = y_perm[(o2h[i], j)];
            }
        }
        Ok(())
    }

    /// Assemble the full operator in original DOF ordering.
    pub fn to_dense(&self) -> Result<Mat<T>, HError> {
        if !self.is_initialized() {
            return Err(HError::UninitializedAccess);
        }
        let tree = self.block_cluster_tree();
        let row_h2o = tree.row_cluster_tree().hmat_to_original();
        let col_h2o = tree.column_cluster_tree().hmat_to_original();
        let mut out = Mat::from_fn(self.rows(), self.columns(), |_, _| T::zero());
        for (node, data) in tree.leaf_nodes().zip(self.data()) {
            let block = data.to_dense();
            let (rs, cs) = (node.row_range().start, node.column_range().start);
            for b in 0..block.ncols() {
                for a in 0..block.nrows() {
                    out[(row_h2o[rs + a], col_h2o[cs + b])] = block[(a, b)];
                }
            }
        }
        Ok(out)
    }
}

impl<T: Scalar> LinearOperator<T> for HMatrix<T> {
    fn rows(&self) -> usize {
        HMatrix::rows(self)
    }
    fn columns(&self) -> usize {
        HMatrix::columns(self)
    }
    fn apply(
        &self,
        x: MatRef<'_, T>,
        y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError> {
        HMatrix::apply(self, x, y, trans, alpha, beta)
    }
}
