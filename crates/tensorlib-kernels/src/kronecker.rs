//! Kronecker product
//!
//! For matrices A (m×n) and B (p×q), C = A ⊗ B has shape (mp × nq) with
//! `C[i·p + k, j·q + l] = A[i, j] · B[k, l]`. The Tucker solver uses the
//! chained form to project an unfolding onto the other axes' bases.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Kronecker product of two matrices
///
/// The result has the block structure:
/// ```text
/// [ a11*B  a12*B  ...  a1n*B ]
/// [  ...    ...   ...   ...  ]
/// [ am1*B  am2*B  ...  amn*B ]
/// ```
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tensorlib_kernels::kronecker;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = kronecker(&a.view(), &b.view());
/// assert_eq!(c.shape(), &[4, 4]);
/// assert_eq!(c[[0, 0]], 5.0);
/// assert_eq!(c[[1, 3]], 16.0);
/// assert_eq!(c[[3, 2]], 28.0);
/// ```
pub fn kronecker<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (m, n) = a.dim();
    let (p, q) = b.dim();

    let mut result = Array2::<T>::zeros((m * p, n * q));

    for ((i, j), a_val) in a.indexed_iter() {
        let mut block = result.slice_mut(scirs2_core::ndarray_ext::s![
            i * p..(i + 1) * p,
            j * q..(j + 1) * q
        ]);
        for (dst, b_val) in block.iter_mut().zip(b.iter()) {
            *dst = a_val.clone() * b_val.clone();
        }
    }

    result
}

/// Kronecker product of a sequence, composed right to left.
pub fn kronecker_chain<T>(factors: &[ArrayView2<T>]) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let (last, rest) = factors
        .split_last()
        .ok_or_else(|| KernelError::empty_input("kronecker_chain", "factors"))?;

    let mut acc = last.to_owned();
    for factor in rest.iter().rev() {
        acc = kronecker(factor, &acc.view());
    }
    Ok(acc)
}

/// Kronecker chain of every factor except `axis`, in cyclic order.
///
/// Uses the same order as [`crate::khatri_rao_except`], so the rows of the
/// result match the columns of `matricize(X, axis)`.
pub fn kronecker_except<T>(factors: &[Array2<T>], axis: usize) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let n = factors.len();
    if axis >= n {
        return Err(KernelError::invalid_axis(axis as isize, n, "kronecker_except"));
    }

    let views: Vec<ArrayView2<T>> = (1..n).map(|k| factors[(axis + k) % n].view()).collect();
    kronecker_chain(&views)
}
