//! Explicit array broadcasting
//!
//! Shapes are right-aligned and compared axis by axis. Two axes are
//! compatible when they are equal or one of them has length 1; an axis
//! missing from the shorter shape counts as length 1.

use ndarray::{ArrayD, IxDyn};

use super::error::{ModelError, ModelResult};

/// Common shape of two broadcast-compatible shapes
fn broadcast_pair(left: &[usize], right: &[usize]) -> ModelResult<Vec<usize>> {
    let rank = left.len().max(right.len());
    let mut shape = vec![0; rank];

    for axis in 0..rank {
        // Index from the trailing end of each shape
        let a = axis_len(left, rank, axis);
        let b = axis_len(right, rank, axis);

        shape[axis] = match (a, b) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                return Err(ModelError::ShapeMismatch {
                    left: left.to_vec(),
                    right: right.to_vec(),
                })
            }
        };
    }

    Ok(shape)
}

fn axis_len(shape: &[usize], rank: usize, axis: usize) -> usize {
    let offset = rank - shape.len();
    if axis < offset {
        1
    } else {
        shape[axis - offset]
    }
}

/// Common shape of any number of shapes
///
/// # Returns
/// The broadcast shape, or `[]` (0-d) when `shapes` is empty
pub fn broadcast_shape(shapes: &[&[usize]]) -> ModelResult<Vec<usize>> {
    shapes
        .iter()
        .try_fold(Vec::new(), |acc, shape| broadcast_pair(&acc, shape))
}

/// Elementwise product of all factors, broadcast to their common shape
///
/// Factors are multiplied left to right onto an array of ones, so the result
/// is `factors[0] * factors[1] * ... * factors[n-1]` in that order.
pub fn broadcast_product(factors: &[ArrayD<f64>]) -> ModelResult<ArrayD<f64>> {
    let shapes: Vec<&[usize]> = factors.iter().map(|f| f.shape()).collect();
    let shape = broadcast_shape(&shapes)?;

    let mut result = ArrayD::<f64>::ones(IxDyn(&shape));
    for factor in factors {
        let view = factor
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| ModelError::ShapeMismatch {
                left: factor.shape().to_vec(),
                right: shape.clone(),
            })?;
        result *= &view;
    }

    Ok(result)
}
