//! Storage statistics of an H-matrix.

use crate::core::traits::Scalar;
use crate::hmatrix::HMatrix;

#[derive(Clone, Debug, PartialEq)]
pub struct HMatrixStats {
    pub leaves: usize,
    pub dense_leaves: usize,
    pub low_rank_leaves: usize,
    pub max_rank: usize,
    /// Scalars held by all leaves.
    pub stored_elements: usize,
    /// `stored_elements / (rows * columns)`; 1.0 means no compression.
    pub compression_ratio: f64,
    pub mem_size_kb: f64,
}

impl<T: Scalar> HMatrix<T> {
    /// Statistics of the current leaf data (all zero when uninitialized).
    pub fn stats(&self) -> HMatrixStats {
        let data = self.data();
        let low_rank_leaves = data.iter().filter(|d| d.is_low_rank()).count();
        let stored_elements: usize = data.iter().map(|d| d.number_of_elements()).sum();
        let full = (self.rows() * self.columns()) as f64;
        HMatrixStats {
            leaves: data.len(),
            dense_leaves: data.len() - low_rank_leaves,
            low_rank_leaves,
            max_rank: data.iter().filter_map(|d| d.rank()).max().unwrap_or(0),
            stored_elements,
            compression_ratio: stored_elements as f64 / full,
            mem_size_kb: (stored_elements * std::mem::size_of::<T>()) as f64 / 1024.0,
        }
    }
}
