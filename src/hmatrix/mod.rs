//! The hierarchical matrix.
//!
//! An `HMatrix` owns a shared [`BlockClusterTree`] and one [`BlockData`]
//! per leaf, stored in the tree's canonical leaf order. It is either
//! uninitialized (no data) or fully initialized; a failed `initialize`
//! leaves it uninitialized.
//!
//! # Lifecycle
//!
//! - [`HMatrix::new`] or [`HMatrix::with_options`]: uninitialized.
//! - [`HMatrix::initialize`]: compresses every leaf, all or nothing.
//! - [`HMatrix::reset`]: drops the leaf data; the block tree is kept.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut h = HMatrix::new(block_tree);
//! h.initialize(&DenseCompressor::new(kernel))?;
//! h.apply(x.as_ref(), y.as_mut(), TransposeMode::NoTranspose, 1.0, 0.0)?;
//! ```

pub mod apply;
pub mod stats;
pub use stats::HMatrixStats;

use std::sync::Arc;

use crate::block::BlockClusterTree;
use crate::compressor::Compressor;
use crate::config::HMatrixOptions;
use crate::core::traits::Scalar;
use crate::error::HError;
use crate::matrix::BlockData;
use crate::parallel::compress_leaves;

pub struct HMatrix<T> {
    block_tree: Arc<BlockClusterTree>,
    data: Vec<BlockData<T>>,
    options: HMatrixOptions,
}

impl<T: Scalar> HMatrix<T> {
    /// Uninitialized H-matrix over `block_tree`.
    pub fn new(block_tree: Arc<BlockClusterTree>) -> Self {
        Self::with_options(block_tree, HMatrixOptions::default())
    }

    pub fn with_options(block_tree: Arc<BlockClusterTree>, options: HMatrixOptions) -> Self {
        Self {
            block_tree,
            data: Vec::new(),
            options,
        }
    }

    /// Construct and immediately compress every leaf.
    pub fn with_compressor<C>(block_tree: Arc<BlockClusterTree>, compressor: &C) -> Result<Self, HError>
    where
        C: Compressor<T> + ?Sized,
    {
        let mut h = Self::new(block_tree);
        h.initialize(compressor)?;
        Ok(h)
    }

    pub fn rows(&self) -> usize {
        self.block_tree.rows()
    }

    pub fn columns(&self) -> usize {
        self.block_tree.columns()
    }

    pub fn block_cluster_tree(&self) -> &Arc<BlockClusterTree> {
        &self.block_tree
    }

    pub fn options(&self) -> &HMatrixOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: HMatrixOptions) {
        self.options = options;
    }

    /// Drop any existing data and compress every leaf with `compressor`.
    pub fn initialize<C>(&mut self, compressor: &C) -> Result<(), HError>
    where
        C: Compressor<T> + ?Sized,
    {
        self.reset();
        let tree = &*self.block_tree;
        let data = compress_leaves(tree, compressor, &self.options)?;
        HError::check_dims("compressed leaf count", tree.number_of_leaves(), data.len())?;
        for (node, block) in tree.leaf_nodes().zip(&data) {
            HError::check_dims("compressed block rows", node.row_range().len(), block.rows())?;
            HError::check_dims("compressed block columns", node.column_range().len(), block.columns())?;
            if block.is_low_rank() && !node.is_admissible() {
                log::warn!(
                    "low-rank data for inadmissible block {} x {}",
                    node.row_range(),
                    node.column_range()
                );
            }
        }
        self.data = data;

        let stats = self.stats();
        log::info!(
            "hmatrix initialized: {}x{}, {} leaves ({} dense, {} low-rank, max rank {}), compression {:.3}, {:.1} KiB",
            self.rows(),
            self.columns(),
            stats.leaves,
            stats.dense_leaves,
            stats.low_rank_leaves,
            stats.max_rank,
            stats.compression_ratio,
            stats.mem_size_kb
        );
        Ok(())
    }

    /// Release all leaf data.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    pub fn is_initialized(&self) -> bool {
        !self.data.is_empty()
    }

    /// Data of the `i`-th leaf in [`BlockClusterTree::leaf_nodes`] order.
    pub fn leaf_data(&self, i: usize) -> Option<&BlockData<T>> {
        self.data.get(i)
    }

    /// All leaf data, aligned with [`BlockClusterTree::leaf_nodes`].
    pub fn data(&self) -> &[BlockData<T>] {
        &self.data
    }
}
