//! Leaf payloads of an H-matrix: dense near-field blocks and low-rank far-field blocks.

pub mod dense;
pub mod low_rank;
pub use dense::DenseBlock;
pub use low_rank::LowRankBlock;

use crate::core::traits::Scalar;
use crate::core::types::TransposeMode;
use crate::error::HError;
use faer::{Mat, MatMut, MatRef};

/// Numeric content of one block cluster tree leaf.
#[derive(Debug, Clone)]
pub enum BlockData<T> {
    /// Full (row-range × column-range) matrix.
    Dense(DenseBlock<T>),
    /// U · Vᵀ factorisation.
    LowRank(LowRankBlock<T>),
}

impl<T: Scalar> BlockData<T> {
    pub fn dense(mat: Mat<T>) -> Self {
        BlockData::Dense(DenseBlock::new(mat))
    }

    pub fn low_rank(u: Mat<T>, v: Mat<T>) -> Result<Self, HError> {
        Ok(BlockData::LowRank(LowRankBlock::new(u, v)?))
    }

    pub fn rows(&self) -> usize {
        match self {
            BlockData::Dense(d) => d.rows(),
            BlockData::LowRank(l) => l.rows(),
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            BlockData::Dense(d) => d.columns(),
            BlockData::LowRank(l) => l.columns(),
        }
    }

    /// Rank of a low-rank block, `None` for dense storage.
    pub fn rank(&self) -> Option<usize> {
        match self {
            BlockData::Dense(_) => None,
            BlockData::LowRank(l) => Some(l.rank()),
        }
    }

    pub fn is_low_rank(&self) -> bool {
        matches!(self, BlockData::LowRank(_))
    }

    /// Number of stored scalars.
    pub fn number_of_elements(&self) -> usize {
        match self {
            BlockData::Dense(d) => d.rows() * d.columns(),
            BlockData::LowRank(l) => l.rank() * (l.rows() + l.columns()),
        }
    }

    /// `y = alpha * op(B) * x + beta * y`.
    pub fn apply(
        &self,
        x: MatRef<'_, T>,
        y: MatMut<'_, T>,
        trans: TransposeMode,
        alpha: T,
        beta: T,
    ) -> Result<(), HError> {
        match self {
            BlockData::Dense(d) => d.apply(x, y, trans, alpha, beta),
            BlockData::LowRank(l) => l.apply(x, y, trans, alpha, beta),
        }
    }

    pub fn to_dense(&self) -> Mat<T> {
        match self {
            BlockData::Dense(d) => d.mat.clone(),
            BlockData::LowRank(l) => l.to_dense(),
        }
    }
}
