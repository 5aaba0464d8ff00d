//! hmat: hierarchical matrices for boundary-integral operators over Faer
//!
//! This crate stores dense boundary-element operators as H-matrices: a block
//! cluster tree splits the DOF pairs into near-field blocks kept densely and
//! far-field blocks kept as low-rank products, and the matrix is applied to
//! blocks of vectors leaf by leaf, in parallel when the `rayon` feature is on.
//!
//! Cluster trees, admissibility and the numeric kernel are supplied by the
//! caller; the engine owns the block storage, the DOF permutation and apply.
//!
//! # Features
//!
//! - `rayon` (default): leaf-parallel compression and apply.
//!
//! # Usage
//!
//! Build a [`ClusterTree`] per side with [`ClusterTreeBuilder`], pair them in
//! a [`BlockClusterTree`], then initialize an [`HMatrix`] from a
//! [`Compressor`] and call [`LinearOperator::apply`]. Helpers that are not
//! re-exported here, such as [`matrix::dense::dense_apply`], are reached
//! through their module path.

pub mod parallel;

pub mod block;
pub mod cluster;
pub mod compressor;
pub mod config;
pub mod core;
pub mod error;
pub mod hmatrix;
pub mod matrix;

// Re-exports for convenience
pub use block::{Admissibility, BlockClusterTree, BlockId, BlockNode, EtaAdmissibility};
pub use cluster::{BoundingBox, ClusterId, ClusterNode, ClusterTree, ClusterTreeBuilder};
pub use compressor::{Compressor, DenseCompressor};
pub use config::{BlockClusterOptions, HMatrixOptions};
pub use self::core::{BlockEvaluator, IndexRange, KernelFn, LinearOperator, RowCol, Scalar, TransposeMode};
pub use error::HError;
pub use hmatrix::{HMatrix, HMatrixStats};
pub use matrix::{BlockData, DenseBlock, LowRankBlock};
