//! Hadamard (element-wise) product
//!
//! The ALS solvers combine Gram matrices with it: the coefficient matrix for
//! one axis is the Hadamard product of every other axis's Gram matrix.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2, ArrayViewMut2, Zip};
use scirs2_core::numeric::Num;

/// Compute the Hadamard product of two matrices
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tensorlib_kernels::hadamard;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = hadamard(&a.view(), &b.view()).unwrap();
/// assert_eq!(c, array![[5.0, 12.0], [21.0, 32.0]]);
/// ```
pub fn hadamard<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    check_same_shape(a.shape(), b.shape())?;
    Ok(Zip::from(a).and(b).map_collect(|x, y| x.clone() * y.clone()))
}

/// In-place Hadamard product: `a ← a ⊙ b`.
pub fn hadamard_inplace<T>(a: &mut ArrayViewMut2<T>, b: &ArrayView2<T>) -> KernelResult<()>
where
    T: Clone + Num,
{
    check_same_shape(a.shape(), b.shape())?;
    Zip::from(a).and(b).for_each(|x, y| *x = x.clone() * y.clone());
    Ok(())
}

fn check_same_shape(a: &[usize], b: &[usize]) -> KernelResult<()> {
    if a != b {
        return Err(KernelError::dimension_mismatch(
            "hadamard",
            a.to_vec(),
            b.to_vec(),
            "Element-wise multiplication requires same shape",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_hadamard_shape_mismatch() {
        let a = Array2::<f64>::ones((2, 3));
        let b = Array2::<f64>::ones((3, 2));
        assert!(hadamard(&a.view(), &b.view()).is_err());
    }

    #[test]
    fn test_hadamard_inplace_matches_allocating() {
        let a = array![[1.0, -2.0], [0.5, 4.0]];
        let b = array![[3.0, 3.0], [2.0, -1.0]];

        let expected = hadamard(&a.view(), &b.view()).unwrap();
        let mut acc = a.clone();
        hadamard_inplace(&mut acc.view_mut(), &b.view()).unwrap();
        assert_eq!(acc, expected);
    }

    #[test]
    fn test_hadamard_inplace_mismatch_leaves_input() {
        let mut a = Array2::<f64>::ones((2, 2));
        let b = Array2::<f64>::zeros((2, 3));
        assert!(hadamard_inplace(&mut a.view_mut(), &b.view()).is_err());
        assert_eq!(a, Array2::<f64>::ones((2, 2)));
    }
}
