//! Array shape utilities.
//!
//! ndarray only broadcasts the right-hand side of binary operations, so the
//! NumPy-style mutual broadcast the evaluators promise is implemented here:
//! resolve the common shape, flatten both operands to it, compute
//! per-sample, then restore the shape.

use ndarray::{Array, Array1, ArrayD, Dimension, IxDyn};

use crate::errors::{ConductanceError, ConductanceResult};

/// NumPy-style broadcast shape of two shapes.
///
/// Dimensions are aligned from the trailing axis; each aligned pair must be
/// equal or contain a 1. Missing leading dimensions count as 1.
pub(crate) fn broadcast_shape(a: &[usize], b: &[usize]) -> ConductanceResult<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let mut shape = Vec::with_capacity(ndim);
    for i in 1..=ndim {
        let da = if i <= a.len() { a[a.len() - i] } else { 1 };
        let db = if i <= b.len() { b[b.len() - i] } else { 1 };
        let d = if da == db || db == 1 {
            da
        } else if da == 1 {
            db
        } else {
            return Err(ConductanceError::ShapeMismatch(a.to_vec(), b.to_vec()));
        };
        shape.push(d);
    }
    shape.reverse();
    Ok(shape)
}

/// Broadcast `arr` to `shape` and flatten the view in row-major order.
pub(crate) fn broadcast_flatten(arr: &ArrayD<f64>, shape: &[usize]) -> ConductanceResult<Array1<f64>> {
    let view = arr
        .broadcast(IxDyn(shape))
        .ok_or_else(|| ConductanceError::ShapeMismatch(arr.shape().to_vec(), shape.to_vec()))?;
    Ok(view.iter().copied().collect())
}

/// Restore a freshly collected flat result to its broadcast shape.
pub(crate) fn into_shape<D: Dimension>(flat: Array<f64, D>, shape: &[usize]) -> ArrayD<f64> {
    ArrayD::from_shape_vec(IxDyn(shape), flat.into_raw_vec())
        .expect("flattened length matches the broadcast shape")
}
