//! Core types and seam traits shared by every layer of the engine.

pub mod traits;
pub mod types;
pub mod wrappers;

pub use traits::{BlockEvaluator, LinearOperator, Scalar};
pub use types::{IndexRange, RowCol, TransposeMode};
pub use wrappers::KernelFn;
