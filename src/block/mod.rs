//! Block cluster trees and the admissibility criteria that shape them.

pub mod admissibility;
pub mod tree;

pub use admissibility::{Admissibility, EtaAdmissibility};
pub use tree::{BlockClusterTree, BlockId, BlockNode};
