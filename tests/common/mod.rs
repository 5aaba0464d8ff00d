//! Shared fixtures: a 1-D DOF set with a random permutation and an operator
//! whose off-diagonal blocks have exact rank two.

#![allow(dead_code)]

use std::sync::Arc;

use faer::Mat;
use hmat::{
    BlockClusterOptions, BlockClusterTree, BlockData, BlockNode, ClusterTree, ClusterTreeBuilder,
    EtaAdmissibility, HError,
};
use rand::seq::SliceRandom;

/// Original DOF `i` sits at x = position(i); the H-matrix order sorts by x.
pub fn shuffled_line_tree(n: usize, leaf: usize) -> Arc<ClusterTree> {
    let mut rng = rand::thread_rng();
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);
    let mut points = vec![[0.0; 3]; n];
    for (k, &i) in perm.iter().enumerate() {
        points[i] = [k as f64 / n as f64, 0.0, 0.0];
    }
    Arc::new(
        ClusterTreeBuilder::new(perm)
            .with_dof_points(&points)
            .bisect(leaf)
            .build()
            .unwrap(),
    )
}

pub fn block_tree(rows: Arc<ClusterTree>, cols: Arc<ClusterTree>) -> Arc<BlockClusterTree> {
    Arc::new(BlockClusterTree::new(
        rows,
        cols,
        &BlockClusterOptions { min_block_size: 2 },
        &EtaAdmissibility::new(1.0),
    ))
}

/// cos(0.3 i - 0.7 j): exactly rank two.
pub fn smooth_kernel(i: usize, j: usize) -> f64 {
    (0.3 * i as f64 - 0.7 * j as f64).cos()
}

/// 4 on the diagonal plus the smooth part. Square operators only: the
/// diagonal never meets an admissible block when rows and columns share
/// one cluster tree.
pub fn kernel(i: usize, j: usize) -> f64 {
    let diag = if i == j { 4.0 } else { 0.0 };
    diag + smooth_kernel(i, j)
}

pub fn reference(rows: usize, cols: usize) -> Mat<f64> {
    Mat::from_fn(rows, cols, kernel)
}

pub fn smooth_reference(rows: usize, cols: usize) -> Mat<f64> {
    Mat::from_fn(rows, cols, smooth_kernel)
}

/// Exact rank-2 factors of the smooth part on admissible leaves, `k` densely elsewhere.
fn compress_with(
    k: fn(usize, usize) -> f64,
    tree: &BlockClusterTree,
    node: &BlockNode,
) -> Result<BlockData<f64>, HError> {
    let rows = tree.row_cluster_tree().original_dofs(node.row_cluster());
    let cols = tree.column_cluster_tree().original_dofs(node.column_cluster());
    if node.is_admissible() {
        let u = Mat::from_fn(rows.len(), 2, |a, r| {
            let t = 0.3 * rows[a] as f64;
            if r == 0 { t.cos() } else { t.sin() }
        });
        let v = Mat::from_fn(cols.len(), 2, |b, r| {
            let t = 0.7 * cols[b] as f64;
            if r == 0 { t.cos() } else { t.sin() }
        });
        BlockData::low_rank(u, v)
    } else {
        Ok(BlockData::dense(Mat::from_fn(rows.len(), cols.len(), |a, b| {
            k(rows[a], cols[b])
        })))
    }
}

pub fn exact_compress(tree: &BlockClusterTree, node: &BlockNode) -> Result<BlockData<f64>, HError> {
    compress_with(kernel, tree, node)
}

pub fn smooth_compress(tree: &BlockClusterTree, node: &BlockNode) -> Result<BlockData<f64>, HError> {
    compress_with(smooth_kernel, tree, node)
}
