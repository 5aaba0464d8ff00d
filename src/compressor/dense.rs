//! A strategy that stores every leaf densely.
//!
//! Useful as an exact reference and for small problems: the resulting
//! H-matrix reproduces the kernel to machine precision.

use crate::block::{BlockClusterTree, BlockNode};
use crate::compressor::Compressor;
use crate::core::traits::{BlockEvaluator, Scalar};
use crate::error::HError;
use crate::matrix::BlockData;
use std::marker::PhantomData;

pub struct DenseCompressor<T, E> {
    evaluator: E,
    _scalar: PhantomData<fn() -> T>,
}

impl<T: Scalar, E: BlockEvaluator<T>> DenseCompressor<T, E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator, _scalar: PhantomData }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<T: Scalar, E: BlockEvaluator<T>> Compressor<T> for DenseCompressor<T, E> {
    fn compress_block(&self, tree: &BlockClusterTree, node: &BlockNode) -> Result<BlockData<T>, HError> {
        let rows = tree.row_cluster_tree().original_dofs(node.row_cluster());
        let cols = tree.column_cluster_tree().original_dofs(node.column_cluster());
        let mat = self.evaluator.evaluate(rows, cols);
        if mat.nrows() != rows.len() || mat.ncols() != cols.len() {
            return Err(HError::CompressionFailed(format!(
                "kernel returned a {}x{} block for a {}x{} leaf",
                mat.nrows(),
                mat.ncols(),
                rows.len(),
                cols.len()
            )));
        }
        Ok(BlockData::dense(mat))
    }
}
