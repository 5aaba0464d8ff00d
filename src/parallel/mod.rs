//! Leaf-parallel drivers for H-matrix assembly and apply.
//!
//! Compression is embarrassingly parallel: every leaf writes its own slot.
//! Apply is parallel over leaves too, but leaves sharing an output range
//! would race, so each worker accumulates a contiguous chunk of leaves into
//! a private zeroed buffer and the buffers are summed afterwards.
//! Without the `rayon` feature both drivers run on the calling thread.
//!
//! # Options
//!
//! [`HMatrixOptions::parallel_initialize`] and
//! [`HMatrixOptions::parallel_apply`] pick the driver per call.
//! [`HMatrixOptions::partial_buffers`] sets the number of leaf chunks in a
//! parallel apply and defaults to the number of CPUs.

use crate::block::{BlockClusterTree, BlockNode};
use crate::compressor::Compressor;
use crate::config::HMatrixOptions;
use crate::core::traits::Scalar;
use crate::core::types::{IndexRange, TransposeMode};
use crate::error::HError;
use crate::matrix::BlockData;
use faer::{MatMut, MatRef};

/// Compress every leaf of `tree`, in leaf order.
pub(crate) fn compress_leaves<T, C>(
    tree: &BlockClusterTree,
    compressor: &C,
    options: &HMatrixOptions,
) -> Result<Vec<BlockData<T>>, HError>
where
    T: Scalar,
    C: Compressor<T> + ?Sized,
{
    #[cfg(feature = "rayon")]
    {
        if options.parallel_initialize {
            use rayon::prelude::*;
            return tree
                .leaf_ids()
                .par_iter()
                .map(|&id| compressor.compress_block(tree, tree.node(id)))
                .collect();
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = options;
    tree.leaf_ids()
        .iter()
        .map(|&id| compressor.compress_block(tree, tree.node(id)))
        .collect()
}

/// (input range, output range) of a leaf for the given transpose mode.
pub(crate) fn leaf_ranges(node: &BlockNode, trans: TransposeMode) -> (IndexRange, IndexRange) {
    match trans {
        TransposeMode::NoTranspose => (node.column_range(), node.row_range()),
        TransposeMode::Transpose => (node.row_range(), node.column_range()),
    }
}

fn apply_serial<T: Scalar>(
    leaves: &[(&BlockNode, &BlockData<T>)],
    x: MatRef<'_, T>,
    mut y: MatMut<'_, T>,
    trans: TransposeMode,
    alpha: T,
) -> Result<(), HError> {
    let k = x.ncols();
    for (node, data) in leaves {
        let (input, output) = leaf_ranges(node, trans);
        let x_block = x.submatrix(input.start, 0, input.len(), k);
        let y_block = y.as_mut().submatrix_mut(output.start, 0, output.len(), k);
        data.apply(x_block, y_block, trans, alpha, T::one())?;
    }
    Ok(())
}

/// `y += alpha * op(H) * x` with `x`, `y` already in H-matrix ordering.
pub(crate) fn accumulate_leaves<T: Scalar>(
    tree: &BlockClusterTree,
    data: &[BlockData<T>],
    x: MatRef<'_, T>,
    mut y: MatMut<'_, T>,
    trans: TransposeMode,
    alpha: T,
    options: &HMatrixOptions,
) -> Result<(), HError> {
    let leaves: Vec<(&BlockNode, &BlockData<T>)> = tree.leaf_nodes().zip(data.iter()).collect();

    #[cfg(feature = "rayon")]
    {
        let buffers = options.partial_buffers.unwrap_or_else(num_cpus::get).max(1);
        if options.parallel_apply && buffers > 1 && leaves.len() > 1 {
            use rayon::prelude::*;
            let chunk = leaves.len().div_ceil(buffers);
            let (m, k) = (y.nrows(), y.ncols());
            let partials = leaves
                .par_chunks(chunk)
                .map(|part| -> Result<faer::Mat<T>, HError> {
                    let mut buf = faer::Mat::from_fn(m, k, |_, _| T::zero());
                    apply_serial(part, x, buf.as_mut(), trans, alpha)?;
                    Ok(buf)
                })
                .collect::<Result<Vec<faer::Mat<T>>, HError>>()?;
            log::trace!("apply: merged {} partial buffers", partials.len());
            for buf in &partials {
                for j in 0..k {
                    for i in 0..m {
                        y[(i, j)] = y[(i, j)] + buf[(i, j)];
                    }
                }
            }
            return Ok(());
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = options;
    apply_serial(&leaves, x, y.as_mut(), trans, alpha)
}
