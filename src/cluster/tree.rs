//! Cluster trees over one DOF index set.
//!
//! A `ClusterTree` is an arena of [`ClusterNode`]s: node `0` is the root and
//! every node owns a contiguous range of the H-matrix DOF ordering. Inner
//! nodes have exactly two children whose ranges split the parent's range,
//! so the leaves partition `[0, N)`. The tree also stores the bijection
//! between original DOF numbers and H-matrix positions.
//!
//! Trees are produced by [`ClusterTreeBuilder`](crate::cluster::ClusterTreeBuilder)
//! and are immutable afterwards, which makes them safe to share behind an
//! `Arc` between several block cluster trees and H-matrices.

use crate::cluster::bounding_box::BoundingBox;
use crate::core::types::IndexRange;
use crate::error::HError;

/// Handle of a node inside its [`ClusterTree`].
pub type ClusterId = usize;

/// One cluster: a contiguous range of H-matrix-ordered DOFs.
#[derive(Debug, Clone)]
pub struct ClusterNode {
    pub(crate) id: ClusterId,
    pub(crate) range: IndexRange,
    pub(crate) parent: Option<ClusterId>,
    pub(crate) children: Option<[ClusterId; 2]>,
    pub(crate) bounding_box: Option<BoundingBox>,
    pub(crate) level: usize,
}

impl ClusterNode {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Range `[start, end)` in H-matrix ordering.
    pub fn index_range(&self) -> IndexRange {
        self.range
    }

    /// Number of DOFs in this cluster.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn parent(&self) -> Option<ClusterId> {
        self.parent
    }

    pub fn children(&self) -> Option<[ClusterId; 2]> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    /// Distance from the root (root is level 0).
    pub fn level(&self) -> usize {
        self.level
    }
}

/// Binary cluster tree plus the DOF permutation it induces.
#[derive(Debug, Clone)]
pub struct ClusterTree {
    pub(crate) nodes: Vec<ClusterNode>,
    pub(crate) original_to_hmat: Vec<usize>,
    pub(crate) hmat_to_original: Vec<usize>,
    pub(crate) leaves: Vec<ClusterId>,
}

impl ClusterTree {
    /// Total number of DOFs under the tree.
    pub fn number_of_dofs(&self) -> usize {
        self.hmat_to_original.len()
    }

    /// Alias of [`ClusterTree::number_of_dofs`].
    pub fn rows(&self) -> usize {
        self.number_of_dofs()
    }

    pub fn root(&self) -> &ClusterNode {
        &self.nodes[0]
    }

    /// Node by handle. Handles always come from this tree.
    pub fn node(&self, id: ClusterId) -> &ClusterNode {
        &self.nodes[id]
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ClusterNode> {
        self.nodes.iter()
    }

    pub fn children(&self, id: ClusterId) -> impl Iterator<Item = &ClusterNode> {
        self.nodes[id]
            .children
            .into_iter()
            .flatten()
            .map(move |c| &self.nodes[c])
    }

    pub fn parent(&self, id: ClusterId) -> Option<&ClusterNode> {
        self.nodes[id].parent.map(|p| &self.nodes[p])
    }

    /// Leaves in depth-first, left-child-first order. Their ranges are
    /// consecutive and together cover `[0, N)`.
    pub fn leaf_nodes(&self) -> impl Iterator<Item = &ClusterNode> {
        self.leaves.iter().map(move |&l| &self.nodes[l])
    }

    pub fn leaf_ids(&self) -> &[ClusterId] {
        &self.leaves
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    /// Position of original DOF `i` in H-matrix ordering.
    pub fn map_original_dof_to_hmat_dof(&self, i: usize) -> Result<usize, HError> {
        self.original_to_hmat
            .get(i)
            .copied()
            .ok_or(HError::InvalidPermutationIndex { index: i, size: self.number_of_dofs() })
    }

    /// Original DOF stored at H-matrix position `k`.
    pub fn map_hmat_dof_to_original_dof(&self, k: usize) -> Result<usize, HError> {
        self.hmat_to_original
            .get(k)
            .copied()
            .ok_or(HError::InvalidPermutationIndex { index: k, size: self.number_of_dofs() })
    }

    /// Original DOF numbers of the cluster, in H-matrix order.
    pub fn original_dofs(&self, id: ClusterId) -> &[usize] {
        &self.hmat_to_original[self.nodes[id].range.as_range()]
    }

    pub fn original_to_hmat(&self) -> &[usize] {
        &self.original_to_hmat
    }

    pub fn hmat_to_original(&self) -> &[usize] {
        &self.hmat_to_original
    }
}

#[cfg(test)]
mod tests {
    use crate::cluster::ClusterTreeBuilder;

    #[test]
    fn navigation() {
        let mut b = ClusterTreeBuilder::identity(4);
        let (l, r) = b.split(0, 2).unwrap();
        let tree = b.build().unwrap();
        assert_eq!(tree.number_of_nodes(), 3);
        assert_eq!(tree.depth(), 1);
        assert!(!tree.root().is_leaf());
        let kids: Vec<_> = tree.children(0).map(|c| c.id()).collect();
        assert_eq!(kids, vec![l, r]);
        assert_eq!(tree.parent(r).map(|p| p.id()), Some(0));
        assert!(tree.parent(0).is_none());
        assert_eq!(tree.node(r).index_range().start, 2);
        assert_eq!(tree.node(r).level(), 1);
    }

    #[test]
    fn original_dofs_follow_permutation() {
        let mut b = ClusterTreeBuilder::new(vec![3, 0, 2, 1]);
        let (l, r) = b.split(0, 1).unwrap();
        let tree = b.build().unwrap();
        assert_eq!(tree.original_dofs(l), &[3]);
        assert_eq!(tree.original_dofs(r), &[0, 2, 1]);
        assert_eq!(tree.map_original_dof_to_hmat_dof(3).unwrap(), 0);
        assert_eq!(tree.map_hmat_dof_to_original_dof(3).unwrap(), 1);
    }
}
