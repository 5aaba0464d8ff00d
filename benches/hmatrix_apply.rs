use std::sync::Arc;

use criterion::{black_box, Criterion, criterion_group, criterion_main};
use faer::Mat;
use hmat::{
    BlockClusterOptions, BlockClusterTree, BlockData, BlockNode, ClusterTreeBuilder, EtaAdmissibility,
    HError, HMatrix, HMatrixOptions, LinearOperator, TransposeMode,
};

/// 1/(1 + 50|x - y|) on a line, with far blocks stored at rank 1 from one sampled row and column.
fn compress(tree: &BlockClusterTree, node: &BlockNode) -> Result<BlockData<f64>, HError> {
    let n = tree.rows() as f64;
    let k = |i: usize, j: usize| 1.0 / (1.0 + 50.0 * ((i as f64 - j as f64) / n).abs());
    let rows = tree.row_cluster_tree().original_dofs(node.row_cluster());
    let cols = tree.column_cluster_tree().original_dofs(node.column_cluster());
    if node.is_admissible() {
        let pivot = k(rows[0], cols[0]);
        let u = Mat::from_fn(rows.len(), 1, |a, _| k(rows[a], cols[0]) / pivot);
        let v = Mat::from_fn(cols.len(), 1, |b, _| k(rows[0], cols[b]));
        BlockData::low_rank(u, v)
    } else {
        Ok(BlockData::dense(Mat::from_fn(rows.len(), cols.len(), |a, b| k(rows[a], cols[b]))))
    }
}

fn bench_apply(c: &mut Criterion) {
    let n = 4096;
    let points: Vec<[f64; 3]> = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
    let ct = Arc::new(
        ClusterTreeBuilder::identity(n)
            .with_dof_points(&points)
            .bisect(32)
            .build()
            .unwrap(),
    );
    let bt = Arc::new(BlockClusterTree::new(
        ct.clone(),
        ct,
        &BlockClusterOptions { min_block_size: 32 },
        &EtaAdmissibility::new(1.0),
    ));
    let x = Mat::from_fn(n, 1, |i, _| (i as f64).sin());
    let mut y = Mat::from_fn(n, 1, |_, _| 0.0);

    let mut h = HMatrix::with_options(bt, HMatrixOptions::serial());
    h.initialize(&compress).unwrap();
    let dense = h.to_dense().unwrap();

    c.bench_function("hmat apply serial", |ben| {
        ben.iter(|| {
            h.apply(black_box(x.as_ref()), y.as_mut(), TransposeMode::NoTranspose, 1.0, 0.0).unwrap();
        })
    });

    h.set_options(HMatrixOptions::default());
    c.bench_function("hmat apply parallel", |ben| {
        ben.iter(|| {
            h.apply(black_box(x.as_ref()), y.as_mut(), TransposeMode::NoTranspose, 1.0, 0.0).unwrap();
        })
    });

    c.bench_function("dense apply", |ben| {
        ben.iter(|| {
            LinearOperator::apply(&dense, black_box(x.as_ref()), y.as_mut(), TransposeMode::NoTranspose, 1.0, 0.0).unwrap();
        })
    });
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
