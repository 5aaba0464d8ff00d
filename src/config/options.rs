//! Options for H-matrix assembly and apply.
//!
//! This module provides the `HMatrixOptions` struct, which controls how an
//! `HMatrix` schedules its leaf work, and `BlockClusterOptions`, which
//! controls how far a block cluster tree subdivides. Both are plain values
//! set through the API; defaults suit a multi-core machine.

/// Scheduling parameters for `HMatrix::initialize` and `HMatrix::apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HMatrixOptions {
    /// Compress leaves concurrently (only effective with the `rayon` feature).
    pub parallel_initialize: bool,

    /// Apply leaves concurrently (only effective with the `rayon` feature).
    pub parallel_apply: bool,

    /// Number of partial output buffers used by a parallel apply.
    /// `None` picks one per logical CPU.
    pub partial_buffers: Option<usize>,
}

impl Default for HMatrixOptions {
    fn default() -> Self {
        Self {
            parallel_initialize: true,
            parallel_apply: true,
            partial_buffers: None,
        }
    }
}

impl HMatrixOptions {
    /// Options that run everything on the calling thread.
    pub fn serial() -> Self {
        Self {
            parallel_initialize: false,
            parallel_apply: false,
            partial_buffers: Some(1),
        }
    }
}

/// Subdivision parameters for `BlockClusterTree::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockClusterOptions {
    /// Blocks whose smaller side has at most this many DOFs are not subdivided.
    pub min_block_size: usize,
}

impl Default for BlockClusterOptions {
    fn default() -> Self {
        Self { min_block_size: 16 }
    }
}
