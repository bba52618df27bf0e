//! Shape manipulation: reshape, permute and axis matricization.
//!
//! # Matricization convention
//!
//! `matricize(X, n)` has shape `(d_n, ∏_{j≠n} d_j)`. The remaining axes are
//! laid out cyclically starting after `n`, i.e. the column multi-index is
//! `(i_{n+1}, …, i_{N-1}, i_0, …, i_{n-1})` in row-major order, so the axis
//! immediately before `n` (cyclically) varies fastest. The Khatri-Rao and
//! Kronecker chains in `tensorlib-kernels` compose factors in the same order.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array, Array2, IxDyn};
use scirs2_core::numeric::Num;

/// Resolve a possibly negative axis index against `ndim` axes.
///
/// `-1` is the last axis, `-ndim` the first.
///
/// ```
/// use tensorlib_core::dense::normalize_axis;
///
/// assert_eq!(normalize_axis(-1, 3).unwrap(), 2);
/// assert_eq!(normalize_axis(1, 3).unwrap(), 1);
/// assert!(normalize_axis(3, 3).is_err());
/// assert!(normalize_axis(-4, 3).is_err());
/// ```
pub fn normalize_axis(axis: isize, ndim: usize) -> anyhow::Result<usize> {
    let n = ndim as isize;
    let resolved = if axis < 0 { axis + n } else { axis };
    if resolved < 0 || resolved >= n {
        anyhow::bail!("Axis {} out of bounds for tensor with {} axes", axis, ndim);
    }
    Ok(resolved as usize)
}

/// Axis order used by matricization: `[n, n+1, …, N-1, 0, …, n-1]`.
fn cyclic_order(axis: usize, ndim: usize) -> Vec<usize> {
    (0..ndim).map(|k| (axis + k) % ndim).collect()
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor to a new shape
    ///
    /// Elements keep their row-major order.
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            anyhow::bail!(
                "Cannot reshape tensor of size {} into shape {:?} (size {})",
                old_size,
                new_shape,
                new_size
            );
        }
        if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
            Ok(Self {
                data: reshaped.to_owned(),
            })
        } else {
            let flat: Vec<T> = self.data.iter().cloned().collect();
            Self::from_vec(flat, new_shape)
        }
    }

    /// Permute (transpose) the axes of the tensor.
    ///
    /// Only strides change; the data is not copied.
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match tensor rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Unfold the tensor into a matrix along `axis`.
    ///
    /// Negative axes count from the end. The result has shape
    /// `(d_axis, ∏_{j≠axis} d_j)` with columns in cyclic order (see the module
    /// docs). The only copy made is the one the transpose requires.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// // x[i, j, k] = 12i + 4j + k
    /// let x = DenseND::from_vec((0..24).map(|v| v as f64).collect(), &[2, 3, 4]).unwrap();
    ///
    /// let m1 = x.matricize(1).unwrap();
    /// assert_eq!(m1.shape(), &[3, 8]);
    /// // columns run over (k, i) with i fastest
    /// assert_eq!(m1[[0, 0]], 0.0);
    /// assert_eq!(m1[[0, 1]], 12.0);
    /// assert_eq!(m1[[0, 2]], 1.0);
    ///
    /// assert_eq!(x.matricize(-1).unwrap(), x.matricize(2).unwrap());
    /// ```
    pub fn matricize(&self, axis: isize) -> anyhow::Result<Array2<T>> {
        let ndim = self.rank();
        let axis = normalize_axis(axis, ndim)?;

        let shape = self.shape();
        let rows = shape[axis];
        let cols: usize = shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &s)| s)
            .product();

        let order = cyclic_order(axis, ndim);
        let permuted = self.data.view().permuted_axes(IxDyn(&order));
        let contiguous = permuted.as_standard_layout().into_owned();
        let unfolded = contiguous.into_shape_with_order((rows, cols))?;

        Ok(unfolded)
    }

    /// Fold a matrix produced by [`DenseND::matricize`] back into a tensor.
    ///
    /// `dims` is the shape of the original tensor. For every tensor `X` and
    /// axis `n`: `unmatricize(&X.matricize(n)?, n, X.shape())? == X`.
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let x = DenseND::from_vec((0..24).map(|v| v as f64).collect(), &[2, 3, 4]).unwrap();
    /// let m = x.matricize(2).unwrap();
    /// let back = DenseND::unmatricize(&m, 2, &[2, 3, 4]).unwrap();
    /// assert_eq!(back, x);
    /// ```
    pub fn unmatricize(matrix: &Array2<T>, axis: isize, dims: &[usize]) -> anyhow::Result<Self> {
        let ndim = dims.len();
        let axis = normalize_axis(axis, ndim)?;

        let expected_rows = dims[axis];
        let expected_cols: usize = dims
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &s)| s)
            .product();

        if matrix.nrows() != expected_rows || matrix.ncols() != expected_cols {
            anyhow::bail!(
                "Matrix shape {:?} incompatible with target shape {:?} at axis {}",
                matrix.shape(),
                dims,
                axis
            );
        }

        let order = cyclic_order(axis, ndim);
        let rolled_shape: Vec<usize> = order.iter().map(|&j| dims[j]).collect();

        let flat: Vec<T> = matrix.iter().cloned().collect();
        let rolled = Array::from_shape_vec(IxDyn(&rolled_shape), flat)?;

        // rolled axis k holds original axis order[k]
        let mut inverse = vec![0; ndim];
        for (k, &j) in order.iter().enumerate() {
            inverse[j] = k;
        }
        let restored = rolled.permuted_axes(IxDyn(&inverse));

        Ok(Self {
            data: restored.as_standard_layout().into_owned(),
        })
    }
}
