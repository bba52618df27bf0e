//! Khatri-Rao product (column-wise Kronecker product)
//!
//! For matrices B (n × p) and C (m × p), the Khatri-Rao product A = B ⊙ C has
//! shape (n·m × p) and column k of A is the flattened outer product of
//! column k of B with column k of C. Row `i·m + j` holds `B[i, k] · C[j, k]`,
//! so C's row index varies fastest.
//!
//! That ordering is what makes the chain in [`khatri_rao_except`] line up with
//! the columns of `DenseND::matricize`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Khatri-Rao product of two matrices
///
/// # Errors
///
/// [`KernelError::DimensionMismatch`] if the column counts differ.
///
/// # Complexity
///
/// Time: O(n · m · p)
/// Space: O(n · m · p)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tensorlib_kernels::khatri_rao;
///
/// let b = array![[1.0, 2.0], [3.0, 4.0]];
/// let c = array![[5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];
/// let a = khatri_rao(&b.view(), &c.view()).unwrap();
///
/// assert_eq!(
///     a,
///     array![[5.0, 12.0], [7.0, 16.0], [9.0, 20.0], [15.0, 24.0], [21.0, 32.0], [27.0, 40.0]]
/// );
/// ```
pub fn khatri_rao<T>(b: &ArrayView2<T>, c: &ArrayView2<T>) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let (n, p1) = b.dim();
    let (m, p2) = c.dim();

    if p1 != p2 {
        return Err(KernelError::dimension_mismatch(
            "khatri_rao",
            vec![n, p1],
            vec![m, p2],
            format!(
                "Number of columns must match: B has {} columns, C has {} columns",
                p1, p2
            ),
        ));
    }

    let mut result = Array2::<T>::zeros((n * m, p1));

    for col in 0..p1 {
        let b_col = b.column(col);
        let c_col = c.column(col);

        for (i, b_val) in b_col.iter().enumerate() {
            for (j, c_val) in c_col.iter().enumerate() {
                result[[i * m + j, col]] = b_val.clone() * c_val.clone();
            }
        }
    }

    Ok(result)
}

/// Short alias for [`khatri_rao`].
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use tensorlib_kernels::kr;
///
/// let b = Array2::<f64>::ones((4, 3));
/// let c = Array2::<f64>::ones((5, 2));
/// assert!(kr(&b.view(), &c.view()).is_err());
/// ```
pub fn kr<T>(b: &ArrayView2<T>, c: &ArrayView2<T>) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    khatri_rao(b, c)
}

/// Khatri-Rao product of a sequence, composed right to left.
///
/// `[F0, F1, F2]` gives `F0 ⊙ (F1 ⊙ F2)`; a single matrix is returned as is.
pub fn khatri_rao_chain<T>(factors: &[ArrayView2<T>]) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let (last, rest) = factors
        .split_last()
        .ok_or_else(|| KernelError::empty_input("khatri_rao_chain", "factors"))?;

    let mut acc = last.to_owned();
    for factor in rest.iter().rev() {
        acc = khatri_rao(factor, &acc.view())?;
    }
    Ok(acc)
}

/// Design matrix for solving one factor while the others stay fixed.
///
/// Chains every factor except `axis`, in cyclic order starting after it:
/// `F_{axis+1} ⊙ … ⊙ F_{N-1} ⊙ F_0 ⊙ … ⊙ F_{axis-1}`. Row order matches the
/// columns of `matricize(X, axis)`, so `matricize(X, axis) ≈ F_axis · Kᵀ`
/// for a rank-R CP model with factors `F`.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use tensorlib_kernels::khatri_rao_except;
///
/// let factors = vec![
///     Array2::<f64>::ones((2, 3)),
///     Array2::<f64>::ones((4, 3)),
///     Array2::<f64>::ones((5, 3)),
/// ];
/// let k = khatri_rao_except(&factors, 1).unwrap();
/// assert_eq!(k.shape(), &[10, 3]);
/// ```
pub fn khatri_rao_except<T>(factors: &[Array2<T>], axis: usize) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let n = factors.len();
    if axis >= n {
        return Err(KernelError::invalid_axis(
            axis as isize,
            n,
            "khatri_rao_except",
        ));
    }

    let views: Vec<ArrayView2<T>> = (1..n).map(|k| factors[(axis + k) % n].view()).collect();
    khatri_rao_chain(&views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_khatri_rao_concrete() {
        let b = array![[1.0, 2.0], [3.0, 4.0]];
        let c = array![[5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];

        let a = khatri_rao(&b.view(), &c.view()).unwrap();
        let expected = array![
            [5.0, 12.0],
            [7.0, 16.0],
            [9.0, 20.0],
            [15.0, 24.0],
            [21.0, 32.0],
            [27.0, 40.0]
        ];
        assert_eq!(a, expected);
    }

    #[test]
    fn test_khatri_rao_column_mismatch() {
        let b = Array2::<f64>::ones((3, 2));
        let c = Array2::<f64>::ones((3, 4));

        let err = khatri_rao(&b.view(), &c.view()).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_khatri_rao_columns_are_outer_products() {
        let b = array![[1.0, -1.0], [2.0, 0.5]];
        let c = array![[3.0, 2.0], [4.0, 1.0]];
        let a = kr(&b.view(), &c.view()).unwrap();

        for col in 0..2 {
            for i in 0..2 {
                for j in 0..2 {
                    assert_eq!(a[[i * 2 + j, col]], b[[i, col]] * c[[j, col]]);
                }
            }
        }
    }

    #[test]
    fn test_chain_is_right_to_left() {
        let f0 = array![[1.0], [2.0]];
        let f1 = array![[3.0], [4.0]];
        let f2 = array![[5.0], [6.0]];

        let chained = khatri_rao_chain(&[f0.view(), f1.view(), f2.view()]).unwrap();
        let inner = khatri_rao(&f1.view(), &f2.view()).unwrap();
        let expected = khatri_rao(&f0.view(), &inner.view()).unwrap();
        assert_eq!(chained, expected);
        assert_eq!(chained[[1, 0]], 1.0 * 3.0 * 6.0);
    }

    #[test]
    fn test_chain_single_and_empty() {
        let f0 = array![[1.0, 2.0]];
        assert_eq!(khatri_rao_chain(&[f0.view()]).unwrap(), f0);

        let empty: [ArrayView2<f64>; 0] = [];
        assert!(khatri_rao_chain(&empty).is_err());
    }

    #[test]
    fn test_except_cyclic_order() {
        let factors = vec![
            array![[1.0], [2.0]],
            array![[3.0], [4.0], [5.0]],
            array![[6.0], [7.0], [8.0], [9.0]],
        ];

        // axis 1 skips F1 and chains F2 ⊙ F0
        let k = khatri_rao_except(&factors, 1).unwrap();
        let expected = khatri_rao(&factors[2].view(), &factors[0].view()).unwrap();
        assert_eq!(k, expected);

        // axis 2 chains F0 ⊙ F1
        let k = khatri_rao_except(&factors, 2).unwrap();
        let expected = khatri_rao(&factors[0].view(), &factors[1].view()).unwrap();
        assert_eq!(k, expected);

        assert!(khatri_rao_except(&factors, 3).is_err());
    }
}
