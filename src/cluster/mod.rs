//! Cluster trees: hierarchical partitions of a DOF index set.

pub mod bounding_box;
pub mod builder;
pub mod tree;

pub use bounding_box::BoundingBox;
pub use builder::ClusterTreeBuilder;
pub use tree::{ClusterId, ClusterNode, ClusterTree};
