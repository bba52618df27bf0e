//! Elementwise arithmetic between tensors and with scalars.
//!
//! Tensor-tensor operators require identical shapes and panic otherwise,
//! like the underlying ndarray operators.

use super::types::DenseND;
use scirs2_core::ndarray_ext::ScalarOperand;
use scirs2_core::numeric::Num;

impl<'b, T> std::ops::Sub<&'b DenseND<T>> for &DenseND<T>
where
    T: Clone + Num,
{
    type Output = DenseND<T>;
    fn sub(self, rhs: &'b DenseND<T>) -> Self::Output {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "Shapes must match for subtraction"
        );
        DenseND {
            data: &self.data - &rhs.data,
        }
    }
}

impl<'b, T> std::ops::Add<&'b DenseND<T>> for &DenseND<T>
where
    T: Clone + Num,
{
    type Output = DenseND<T>;
    fn add(self, rhs: &'b DenseND<T>) -> Self::Output {
        assert_eq!(self.shape(), rhs.shape(), "Shapes must match for addition");
        DenseND {
            data: &self.data + &rhs.data,
        }
    }
}

impl<T> std::ops::Mul<T> for &DenseND<T>
where
    T: Clone + Num + ScalarOperand,
{
    type Output = DenseND<T>;
    fn mul(self, scalar: T) -> Self::Output {
        DenseND {
            data: &self.data * scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::normalize_axis;

    fn sequential(shape: &[usize]) -> DenseND<f64> {
        let n: usize = shape.iter().product();
        DenseND::from_vec((0..n).map(|v| v as f64).collect(), shape).unwrap()
    }

    #[test]
    fn test_create_zeros() {
        let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
        assert_eq!(tensor.shape(), &[2, 3, 4]);
        assert_eq!(tensor.rank(), 3);
        assert_eq!(tensor.len(), 24);
        assert_eq!(tensor[&[0, 0, 0]], 0.0);
    }

    #[test]
    fn test_from_vec_wrong_length() {
        assert!(DenseND::from_vec(vec![1.0, 2.0, 3.0], &[2, 2]).is_err());
    }

    #[test]
    fn test_reshape() {
        let tensor = sequential(&[2, 3, 4]);
        let reshaped = tensor.reshape(&[6, 4]).unwrap();
        assert_eq!(reshaped.shape(), &[6, 4]);
        assert_eq!(reshaped[&[5, 3]], 23.0);
        assert!(tensor.reshape(&[5, 5]).is_err());
    }

    #[test]
    fn test_permute() {
        let tensor = sequential(&[2, 3, 4]);
        let permuted = tensor.permute(&[2, 0, 1]).unwrap();
        assert_eq!(permuted.shape(), &[4, 2, 3]);
        assert_eq!(permuted[&[3, 1, 2]], tensor[&[1, 2, 3]]);
        assert!(tensor.permute(&[0, 0, 1]).is_err());
    }

    #[test]
    fn test_matricize_axis0_is_plain_reshape() {
        let x = sequential(&[2, 3, 4]);
        let m = x.matricize(0).unwrap();
        assert_eq!(m.shape(), &[2, 12]);
        for (expected, &actual) in (0..24).map(|v| v as f64).zip(m.iter()) {
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_matricize_cyclic_column_order() {
        // x[i, j, k] = 12i + 4j + k
        let x = sequential(&[2, 3, 4]);

        // axis 2: columns over (i, j), j fastest
        let m2 = x.matricize(2).unwrap();
        assert_eq!(m2.shape(), &[4, 6]);
        for k in 0..4 {
            for i in 0..2 {
                for j in 0..3 {
                    assert_eq!(m2[[k, i * 3 + j]], x[&[i, j, k]]);
                }
            }
        }

        // axis 1: columns over (k, i), i fastest
        let m1 = x.matricize(1).unwrap();
        for j in 0..3 {
            for k in 0..4 {
                for i in 0..2 {
                    assert_eq!(m1[[j, k * 2 + i]], x[&[i, j, k]]);
                }
            }
        }
    }

    #[test]
    fn test_matricize_negative_axis() {
        let x = sequential(&[2, 3, 4, 5]);
        for axis in 1..=4isize {
            let positive = 4 - axis;
            assert_eq!(x.matricize(-axis).unwrap(), x.matricize(positive).unwrap());
        }
        assert!(x.matricize(4).is_err());
        assert!(x.matricize(-5).is_err());
    }

    #[test]
    fn test_matricize_roundtrip_all_axes() {
        let x = sequential(&[3, 2, 4, 2]);
        for axis in -4..4isize {
            let m = x.matricize(axis).unwrap();
            let back = DenseND::unmatricize(&m, axis, x.shape()).unwrap();
            assert_eq!(back, x);
            assert!(back.is_contiguous());
        }
    }

    #[test]
    fn test_unmatricize_shape_mismatch() {
        let x = sequential(&[2, 3, 4]);
        let m = x.matricize(0).unwrap();
        assert!(DenseND::unmatricize(&m, 1, x.shape()).is_err());
        assert!(DenseND::unmatricize(&m, 0, &[2, 3, 5]).is_err());
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(-3, 3).unwrap(), 0);
        assert_eq!(normalize_axis(0, 3).unwrap(), 0);
        assert!(normalize_axis(0, 0).is_err());
    }

    #[test]
    fn test_random_uniform() {
        let tensor = DenseND::<f64>::random_uniform(&[4, 5], -1.0, 1.0);
        assert_eq!(tensor.shape(), &[4, 5]);
        assert!(tensor.iter().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn test_sub_and_norms() {
        let a = DenseND::<f64>::ones(&[2, 2, 2]);
        let b = &a * 3.0;
        let diff = &b - &a;
        assert!((diff.squared_norm() - 32.0).abs() < 1e-12);
        assert!((diff.frobenius_norm() - 32.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(a.max_abs_diff(&b), Some(2.0));
        assert_eq!(a.max_abs_diff(&DenseND::ones(&[2, 2])), None);
    }

    #[test]
    #[should_panic(expected = "Shapes must match")]
    fn test_sub_shape_mismatch_panics() {
        let a = DenseND::<f64>::ones(&[2, 2]);
        let b = DenseND::<f64>::ones(&[2, 3]);
        let _ = &a - &b;
    }
}
