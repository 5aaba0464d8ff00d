//! Recording a caller-chosen clustering as a [`ClusterTree`].
//!
//! The builder does not decide where to cut: the caller supplies the DOF
//! permutation and the split positions (or asks for plain midpoint
//! bisection of the current leaves). `build` checks the permutation and
//! attaches bounding boxes when per-DOF geometry is known.

use crate::cluster::bounding_box::BoundingBox;
use crate::cluster::tree::{ClusterId, ClusterNode, ClusterTree};
use crate::core::types::IndexRange;
use crate::error::HError;

pub struct ClusterTreeBuilder {
    nodes: Vec<ClusterNode>,
    hmat_to_original: Vec<usize>,
    dof_boxes: Option<Vec<BoundingBox>>,
}

impl ClusterTreeBuilder {
    /// Start from a single root cluster. `hmat_to_original[k]` is the
    /// original DOF placed at H-matrix position `k`.
    pub fn new(hmat_to_original: Vec<usize>) -> Self {
        let n = hmat_to_original.len();
        let root = ClusterNode {
            id: 0,
            range: IndexRange::new(0, n),
            parent: None,
            children: None,
            bounding_box: None,
            level: 0,
        };
        Self {
            nodes: vec![root],
            hmat_to_original,
            dof_boxes: None,
        }
    }

    /// Root cluster over `n` DOFs kept in their original order.
    pub fn identity(n: usize) -> Self {
        Self::new((0..n).collect())
    }

    /// Per-DOF bounding boxes, indexed by original DOF.
    pub fn with_dof_bounding_boxes(mut self, boxes: Vec<BoundingBox>) -> Self {
        self.dof_boxes = Some(boxes);
        self
    }

    /// Per-DOF positions, indexed by original DOF.
    pub fn with_dof_points(self, points: &[[f64; 3]]) -> Self {
        let boxes = points.iter().map(|&p| BoundingBox::from_point(p)).collect();
        self.with_dof_bounding_boxes(boxes)
    }

    /// Split leaf `node` into `[start, at)` and `[at, end)`.
    pub fn split(&mut self, node: ClusterId, at: usize) -> Result<(ClusterId, ClusterId), HError> {
        let parent = self
            .nodes
            .get(node)
            .ok_or_else(|| HError::InvalidClusterTree(format!("no cluster node {node}")))?;
        if !parent.is_leaf() {
            return Err(HError::InvalidClusterTree(format!(
                "cluster node {node} is already split"
            )));
        }
        let range = parent.range;
        if at <= range.start || at >= range.end {
            return Err(HError::InvalidClusterTree(format!(
                "split position {at} not strictly inside {range}"
            )));
        }
        Ok(self.push_children(node, at))
    }

    /// Repeatedly halve every leaf larger than `max_leaf_size`.
    pub fn bisect(mut self, max_leaf_size: usize) -> Self {
        let max_leaf_size = max_leaf_size.max(1);
        let mut stack: Vec<ClusterId> = (0..self.nodes.len())
            .filter(|&id| self.nodes[id].is_leaf())
            .collect();
        while let Some(id) = stack.pop() {
            let range = self.nodes[id].range;
            if range.len() > max_leaf_size {
                let (l, r) = self.push_children(id, range.start + range.len() / 2);
                stack.push(r);
                stack.push(l);
            }
        }
        self
    }

    fn push_children(&mut self, node: ClusterId, at: usize) -> (ClusterId, ClusterId) {
        let range = self.nodes[node].range;
        let level = self.nodes[node].level + 1;
        let left = self.nodes.len();
        let right = left + 1;
        for (id, r) in [(left, IndexRange::new(range.start, at)), (right, IndexRange::new(at, range.end))] {
            self.nodes.push(ClusterNode {
                id,
                range: r,
                parent: Some(node),
                children: None,
                bounding_box: None,
                level,
            });
        }
        self.nodes[node].children = Some([left, right]);
        (left, right)
    }

    /// Validate and freeze the tree.
    pub fn build(mut self) -> Result<ClusterTree, HError> {
        let n = self.hmat_to_original.len();
        if n == 0 {
            return Err(HError::InvalidClusterTree("empty DOF set".into()));
        }

        let mut original_to_hmat = vec![usize::MAX; n];
        for (k, &i) in self.hmat_to_original.iter().enumerate() {
            if i >= n {
                return Err(HError::InvalidPermutationIndex { index: i, size: n });
            }
            if original_to_hmat[i] != usize::MAX {
                return Err(HError::InvalidClusterTree(format!(
                    "original DOF {i} appears twice in the permutation"
                )));
            }
            original_to_hmat[i] = k;
        }

        if let Some(boxes) = &self.dof_boxes {
            HError::check_dims("per-DOF bounding boxes", n, boxes.len())?;
            // Children are always pushed after their parent.
            for id in (0..self.nodes.len()).rev() {
                let bbox = match self.nodes[id].children {
                    Some([l, r]) => match (self.nodes[l].bounding_box, self.nodes[r].bounding_box) {
                        (Some(a), Some(b)) => a.merge(&b),
                        _ => BoundingBox::empty(),
                    },
                    None => self.hmat_to_original[self.nodes[id].range.as_range()]
                        .iter()
                        .fold(BoundingBox::empty(), |acc, &i| acc.merge(&boxes[i])),
                };
                self.nodes[id].bounding_box = Some(bbox);
            }
        }

        let mut leaves = Vec::new();
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            match self.nodes[id].children {
                Some([l, r]) => {
                    stack.push(r);
                    stack.push(l);
                }
                None => leaves.push(id),
            }
        }

        log::debug!(
            "cluster tree: {} DOFs, {} nodes, {} leaves",
            n,
            self.nodes.len(),
            leaves.len()
        );

        Ok(ClusterTree {
            nodes: self.nodes,
            original_to_hmat,
            hmat_to_original: self.hmat_to_original,
            leaves,
        })
    }
}
