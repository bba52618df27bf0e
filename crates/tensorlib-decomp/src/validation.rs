//! Precondition checks run before any sweep.

use crate::error::{DecompError, DecompResult};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Num;
use tensorlib_core::DenseND;

/// Smallest number of axes a decomposable tensor may have.
pub const MIN_AXES: usize = 3;

/// Reject tensors with fewer than three axes or an empty axis.
pub fn check_tensor<T>(tensor: &DenseND<T>) -> DecompResult<()>
where
    T: Clone + Num,
{
    if tensor.rank() < MIN_AXES {
        return Err(DecompError::shape(format!(
            "tensor with at least {} axes required, got shape {:?}",
            MIN_AXES,
            tensor.shape()
        )));
    }
    if let Some(axis) = tensor.shape().iter().position(|&d| d == 0) {
        return Err(DecompError::shape(format!(
            "axis {} of shape {:?} is empty",
            axis,
            tensor.shape()
        )));
    }
    Ok(())
}

/// Validate the stopping rule.
pub fn check_stopping(tol: f64, max_iter: usize) -> DecompResult<()> {
    if !tol.is_finite() || tol < 0.0 {
        return Err(DecompError::invalid(format!(
            "tol must be a finite non-negative number, got {}",
            tol
        )));
    }
    if max_iter == 0 {
        return Err(DecompError::invalid("max_iter must be at least 1"));
    }
    Ok(())
}

/// Check that `factors` fit `shape` and share a column count; returns it.
pub fn check_factors<T>(shape: &[usize], factors: &[Array2<T>]) -> DecompResult<usize> {
    if factors.len() != shape.len() {
        return Err(DecompError::shape(format!(
            "{} factor matrices supplied for a tensor with {} axes",
            factors.len(),
            shape.len()
        )));
    }

    let rank = factors.first().map_or(0, |f| f.ncols());
    if rank == 0 {
        return Err(DecompError::invalid("factor matrices must have at least one column"));
    }

    for (axis, (factor, &d)) in factors.iter().zip(shape).enumerate() {
        if factor.nrows() != d || factor.ncols() != rank {
            return Err(DecompError::shape(format!(
                "factor {} has shape {:?}, expected [{}, {}]",
                axis,
                factor.shape(),
                d,
                rank
            )));
        }
    }
    Ok(rank)
}
