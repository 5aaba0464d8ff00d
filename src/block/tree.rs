//! Block cluster trees: the product of a row and a column cluster tree.
//!
//! Every node pairs a row cluster with a column cluster. Construction starts
//! at the two roots and subdivides a block into the products of the
//! clusters' children while it is inadmissible, at least one cluster has
//! children and the block is larger than `min_block_size`. A cluster that is
//! already a leaf is kept whole, giving 1×2 or 2×1 children. Leaves therefore
//! tile the full `rows × columns` index space exactly once.

use std::sync::Arc;

use crate::block::admissibility::Admissibility;
use crate::cluster::{ClusterId, ClusterTree};
use crate::config::BlockClusterOptions;
use crate::core::types::IndexRange;

/// Handle of a node inside its [`BlockClusterTree`].
pub type BlockId = usize;

#[derive(Debug, Clone)]
pub struct BlockNode {
    pub(crate) id: BlockId,
    pub(crate) row_cluster: ClusterId,
    pub(crate) column_cluster: ClusterId,
    pub(crate) row_range: IndexRange,
    pub(crate) column_range: IndexRange,
    pub(crate) admissible: bool,
    pub(crate) parent: Option<BlockId>,
    pub(crate) children: Vec<BlockId>,
    pub(crate) level: usize,
}

impl BlockNode {
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Node in the row cluster tree.
    pub fn row_cluster(&self) -> ClusterId {
        self.row_cluster
    }

    /// Node in the column cluster tree.
    pub fn column_cluster(&self) -> ClusterId {
        self.column_cluster
    }

    pub fn row_range(&self) -> IndexRange {
        self.row_range
    }

    pub fn column_range(&self) -> IndexRange {
        self.column_range
    }

    /// Far-field block eligible for low-rank storage.
    pub fn is_admissible(&self) -> bool {
        self.admissible
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// (rows, columns) of the block.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_range.len(), self.column_range.len())
    }
}

#[derive(Debug, Clone)]
pub struct BlockClusterTree {
    row_tree: Arc<ClusterTree>,
    column_tree: Arc<ClusterTree>,
    nodes: Vec<BlockNode>,
    leaves: Vec<BlockId>,
}

impl BlockClusterTree {
    /// Build the block tree of `row_tree × column_tree`. Pass the same
    /// `Arc` twice for a square operator on one DOF set.
    pub fn new<A>(
        row_tree: Arc<ClusterTree>,
        column_tree: Arc<ClusterTree>,
        options: &BlockClusterOptions,
        admissibility: &A,
    ) -> Self
    where
        A: Admissibility + ?Sized,
    {
        let mut nodes: Vec<BlockNode> = Vec::new();
        let mut pending = vec![(row_tree.root().id(), column_tree.root().id(), None, 0usize)];

        while let Some((r, c, parent, level)) = pending.pop() {
            let row = row_tree.node(r);
            let col = column_tree.node(c);
            let admissible = admissibility.is_admissible(row, col);
            let id = nodes.len();
            nodes.push(BlockNode {
                id,
                row_cluster: r,
                column_cluster: c,
                row_range: row.index_range(),
                column_range: col.index_range(),
                admissible,
                parent,
                children: Vec::new(),
                level,
            });
            if let Some(p) = parent {
                nodes[p].children.push(id);
            }

            let large = row.len().min(col.len()) > options.min_block_size;
            if !admissible && large && (row.children().is_some() || col.children().is_some()) {
                // A side that is already a leaf is paired whole with the other side's children.
                let rc: Vec<ClusterId> = row.children().map_or_else(|| vec![r], |kids| kids.to_vec());
                let cc: Vec<ClusterId> = col.children().map_or_else(|| vec![c], |kids| kids.to_vec());
                // Reverse so the first child pair is processed next.
                for &rk in rc.iter().rev() {
                    for &ck in cc.iter().rev() {
                        pending.push((rk, ck, Some(id), level + 1));
                    }
                }
            }
        }

        // Depth-first pushing already visits children in order, so ids are
        // assigned in pre-order and the leaf order is the id order.
        let leaves: Vec<BlockId> = nodes.iter().filter(|n| n.is_leaf()).map(|n| n.id).collect();

        log::debug!(
            "block cluster tree: {}x{} DOFs, {} nodes, {} leaves ({} admissible)",
            row_tree.number_of_dofs(),
            column_tree.number_of_dofs(),
            nodes.len(),
            leaves.len(),
            leaves.iter().filter(|&&l| nodes[l].admissible).count()
        );

        Self {
            row_tree,
            column_tree,
            nodes,
            leaves,
        }
    }

    /// Number of row DOFs.
    pub fn rows(&self) -> usize {
        self.row_tree.number_of_dofs()
    }

    /// Number of column DOFs.
    pub fn columns(&self) -> usize {
        self.column_tree.number_of_dofs()
    }

    pub fn row_cluster_tree(&self) -> &Arc<ClusterTree> {
        &self.row_tree
    }

    pub fn column_cluster_tree(&self) -> &Arc<ClusterTree> {
        &self.column_tree
    }

    pub fn root(&self) -> &BlockNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: BlockId) -> &BlockNode {
        &self.nodes[id]
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Leaves in canonical (depth-first) order.
    pub fn leaf_nodes(&self) -> impl Iterator<Item = &BlockNode> {
        self.leaves.iter().map(move |&l| &self.nodes[l])
    }

    pub fn leaf_ids(&self) -> &[BlockId] {
        &self.leaves
    }

    pub fn number_of_leaves(&self) -> usize {
        self.leaves.len()
    }

    pub fn number_of_admissible_leaves(&self) -> usize {
        self.leaf_nodes().filter(|n| n.admissible).count()
    }

    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::EtaAdmissibility;
    use crate::cluster::{ClusterNode, ClusterTreeBuilder};

    fn line_tree(n: usize, leaf: usize) -> Arc<ClusterTree> {
        let points: Vec<[f64; 3]> = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
        Arc::new(
            ClusterTreeBuilder::identity(n)
                .with_dof_points(&points)
                .bisect(leaf)
                .build()
                .unwrap(),
        )
    }

    fn coverage(tree: &BlockClusterTree) -> Vec<u32> {
        let (m, n) = (tree.rows(), tree.columns());
        let mut hits = vec![0u32; m * n];
        for leaf in tree.leaf_nodes() {
            for i in leaf.row_range().as_range() {
                for j in leaf.column_range().as_range() {
                    hits[i * n + j] += 1;
                }
            }
        }
        hits
    }

    #[test]
    fn leaves_cover_every_pair_once() {
        let opts = BlockClusterOptions { min_block_size: 1 };
        for (m, n) in [(1, 1), (8, 8), (13, 5), (32, 17)] {
            let tree = BlockClusterTree::new(line_tree(m, 2), line_tree(n, 3), &opts, &EtaAdmissibility::new(1.0));
            assert!(coverage(&tree).iter().all(|&h| h == 1), "{m}x{n}");
        }
    }

    #[test]
    fn never_admissible_reaches_cluster_leaves() {
        let ct = line_tree(8, 2);
        let never = |_: &ClusterNode, _: &ClusterNode| false;
        let tree = BlockClusterTree::new(ct.clone(), ct, &BlockClusterOptions { min_block_size: 1 }, &never);
        assert_eq!(tree.number_of_leaves(), 16);
        assert_eq!(tree.number_of_admissible_leaves(), 0);
        assert_eq!(tree.depth(), 2);
        assert!(tree.leaf_nodes().all(|l| l.shape() == (2, 2)));
    }

    #[test]
    fn min_block_size_stops_subdivision() {
        let ct = line_tree(4, 2);
        let never = |_: &ClusterNode, _: &ClusterNode| false;
        let tree = BlockClusterTree::new(ct.clone(), ct, &BlockClusterOptions { min_block_size: 4 }, &never);
        assert_eq!(tree.number_of_leaves(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().shape(), (4, 4));
    }

    #[test]
    fn admissible_root_is_a_single_leaf() {
        let ct = line_tree(4, 2);
        let always = |_: &ClusterNode, _: &ClusterNode| true;
        let tree = BlockClusterTree::new(ct.clone(), ct, &BlockClusterOptions { min_block_size: 1 }, &always);
        assert_eq!(tree.leaf_ids(), &[0]);
        assert!(tree.root().is_admissible());
    }

    #[test]
    fn leaf_order_is_depth_first() {
        let ct = line_tree(8, 2);
        let never = |_: &ClusterNode, _: &ClusterNode| false;
        let tree = BlockClusterTree::new(ct.clone(), ct, &BlockClusterOptions { min_block_size: 1 }, &never);
        let first: Vec<_> = tree
            .leaf_nodes()
            .take(4)
            .map(|l| (l.row_range().start, l.column_range().start))
            .collect();
        assert_eq!(first, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
        for leaf in tree.leaf_nodes() {
            let p = tree.node(leaf.parent().unwrap());
            assert!(p.children().contains(&leaf.id()));
        }
    }

    #[test]
    fn far_blocks_are_admissible_on_a_line() {
        let ct = line_tree(32, 2);
        let tree = BlockClusterTree::new(ct.clone(), ct, &BlockClusterOptions { min_block_size: 1 }, &EtaAdmissibility::new(1.0));
        assert!(tree.number_of_admissible_leaves() > 0);
        for leaf in tree.leaf_nodes() {
            if leaf.is_admissible() {
                assert!(!leaf.row_range().overlaps(&leaf.column_range()));
            }
        }
    }

    /// A small row cluster facing a deep column tree still separates its
    /// far field: the column side keeps splitting while the row side stays whole.
    #[test]
    fn leaf_cluster_against_deep_tree_splits_one_side() {
        let points: Vec<[f64; 3]> = (0..2).map(|i| [i as f64, 0.0, 0.0]).collect();
        let rows = Arc::new(ClusterTreeBuilder::identity(2).with_dof_points(&points).build().unwrap());
        let points: Vec<[f64; 3]> = (2..10).map(|i| [i as f64, 0.0, 0.0]).collect();
        let columns = Arc::new(ClusterTreeBuilder::identity(8).with_dof_points(&points).bisect(2).build().unwrap());
        let opts = BlockClusterOptions { min_block_size: 1 };
        let tree = BlockClusterTree::new(rows, columns, &opts, &EtaAdmissibility::new(0.5));

        assert!(tree.number_of_leaves() > 1);
        assert!(tree.number_of_admissible_leaves() > 0);
        assert!(tree.leaf_nodes().all(|l| l.row_range() == IndexRange::new(0, 2)));
        assert_eq!(tree.root().children().len(), 2);
        assert!(coverage(&tree).iter().all(|&h| h == 1));
    }
}
