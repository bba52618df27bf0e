//! N-mode product (tensor times matrix)
//!
//! For a tensor X with `d = X.shape()[axis]` and a matrix M of shape
//! `(new_d, d)`, `tmult(X, M, axis)` replaces that axis's extent with `new_d`:
//!
//! 1. Unfold X along `axis` to X_(axis) of shape `(d, ∏_{j≠axis} d_j)`
//! 2. Compute Y_(axis) = M · X_(axis)
//! 3. Fold Y_(axis) back with the new shape
//!
//! Tucker uses it to compress a tensor into its core (`X ×ₙ Uₙᵀ`) and to
//! expand the core back (`G ×ₙ Uₙ`).

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::ArrayView2;
use scirs2_core::numeric::Num;
use tensorlib_core::{normalize_axis, DenseND};

/// Compute the n-mode product `X ×_axis M`.
///
/// Negative axes count from the end.
///
/// # Errors
///
/// - [`KernelError::InvalidAxis`] if `axis` is out of range
/// - [`KernelError::DimensionMismatch`] if `M.ncols()` differs from the
///   tensor's extent along `axis`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tensorlib_core::DenseND;
/// use tensorlib_kernels::tmult;
///
/// let x = DenseND::from_vec((0..24).map(|v| v as f64).collect(), &[2, 3, 4]).unwrap();
/// let m = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 1.0]];
///
/// let y = tmult(&x, &m.view(), 1).unwrap();
/// assert_eq!(y.shape(), &[2, 5, 4]);
/// // row 3 of M sums slices 0 and 1 along axis 1
/// assert_eq!(y[&[0, 3, 0][..]], x[&[0, 0, 0][..]] + x[&[0, 1, 0][..]]);
/// ```
pub fn tmult<T>(tensor: &DenseND<T>, matrix: &ArrayView2<T>, axis: isize) -> KernelResult<DenseND<T>>
where
    T: Copy + Num + 'static,
{
    let ndim = tensor.rank();
    let axis_idx = normalize_axis(axis, ndim)
        .map_err(|e| KernelError::invalid_axis(axis, ndim, e.to_string()))?;

    let axis_size = tensor.shape()[axis_idx];
    let (new_size, inner) = matrix.dim();
    if inner != axis_size {
        return Err(KernelError::dimension_mismatch(
            "tmult",
            vec![new_size, axis_size],
            vec![new_size, inner],
            format!(
                "Matrix columns must match tensor extent along axis {}",
                axis_idx
            ),
        ));
    }

    let unfolded = tensor
        .matricize(axis_idx as isize)
        .map_err(|e| KernelError::invalid_axis(axis, ndim, e.to_string()))?;
    let product = matrix.dot(&unfolded);

    let mut new_shape = tensor.shape().to_vec();
    new_shape[axis_idx] = new_size;

    DenseND::unmatricize(&product, axis_idx as isize, &new_shape).map_err(|e| {
        KernelError::dimension_mismatch("tmult", new_shape.clone(), product.shape().to_vec(), e.to_string())
    })
}

/// Apply `tmult` along every axis in order, `X ×₀ M₀ ×₁ M₁ … ×_{N-1} M_{N-1}`.
///
/// With `transpose` set, each matrix is applied as `Mₙᵀ` (the Tucker
/// compression step).
pub fn tmult_all<T>(
    tensor: &DenseND<T>,
    matrices: &[ArrayView2<T>],
    transpose: bool,
) -> KernelResult<DenseND<T>>
where
    T: Copy + Num + 'static,
{
    if matrices.len() != tensor.rank() {
        return Err(KernelError::dimension_mismatch(
            "tmult_all",
            vec![tensor.rank()],
            vec![matrices.len()],
            "One matrix per tensor axis is required",
        ));
    }

    let mut result = tensor.clone();
    for (axis, matrix) in matrices.iter().enumerate() {
        let m = if transpose { matrix.t() } else { matrix.view() };
        result = tmult(&result, &m, axis as isize)?;
    }
    Ok(result)
}
