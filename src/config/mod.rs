//! Configuration values for building and applying H-matrices.

pub mod options;
pub use options::{BlockClusterOptions, HMatrixOptions};
