//! Free-function forms of the axis algebra.
//!
//! These are thin wrappers over the [`DenseND`] methods so the primitives
//! compose the same way as the kernels in `tensorlib-kernels`.
//!
//! - [`matricize`]: tensor → `(d_axis, ∏_{j≠axis} d_j)` matrix
//! - [`unmatricize`]: exact inverse of `matricize` for the same axis and shape
//!
//! Both accept negative axes (`-1` is the last axis).
//!
//! ```
//! use tensorlib_core::{ops, DenseND};
//!
//! let x = DenseND::<f64>::random_uniform(&[3, 4, 5], 0.0, 1.0);
//! for axis in 0..3 {
//!     let unfolded = ops::matricize(&x, axis).unwrap();
//!     assert_eq!(ops::unmatricize(&unfolded, axis, x.shape()).unwrap(), x);
//! }
//! ```

use crate::dense::DenseND;
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Num;

/// Unfold `tensor` along `axis`. See [`DenseND::matricize`].
pub fn matricize<T>(tensor: &DenseND<T>, axis: isize) -> anyhow::Result<Array2<T>>
where
    T: Clone + Num,
{
    tensor.matricize(axis)
}

/// Fold a matricized tensor back to `dims`. See [`DenseND::unmatricize`].
pub fn unmatricize<T>(matrix: &Array2<T>, axis: isize, dims: &[usize]) -> anyhow::Result<DenseND<T>>
where
    T: Clone + Num,
{
    DenseND::unmatricize(matrix, axis, dims)
}
