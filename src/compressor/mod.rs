//! Compression strategies: how each block cluster tree leaf becomes [`BlockData`].
//!
//! A strategy must be deterministic for a given leaf, return
//! [`BlockData::LowRank`] only for admissible leaves and
//! [`BlockData::Dense`] for inadmissible ones. The engine checks the
//! returned shape but not the rank.

use crate::block::{BlockClusterTree, BlockNode};
use crate::core::traits::Scalar;
use crate::error::HError;
use crate::matrix::BlockData;

/// A compression strategy for H-matrix leaves.
pub trait Compressor<T: Scalar>: Sync {
    /// Produce the numeric content of leaf `node` of `tree`.
    fn compress_block(&self, tree: &BlockClusterTree, node: &BlockNode) -> Result<BlockData<T>, HError>;
}

impl<T, F> Compressor<T> for F
where
    T: Scalar,
    F: Fn(&BlockClusterTree, &BlockNode) -> Result<BlockData<T>, HError> + Sync,
{
    fn compress_block(&self, tree: &BlockClusterTree, node: &BlockNode) -> Result<BlockData<T>, HError> {
        self(tree, node)
    }
}

pub mod dense;
pub use dense::DenseCompressor;
