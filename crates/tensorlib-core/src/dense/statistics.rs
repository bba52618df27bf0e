//! Norms and reductions used by the decomposition error metrics.

use super::types::DenseND;
use scirs2_core::numeric::Float;

impl<T> DenseND<T>
where
    T: Float,
{
    /// Compute the Frobenius norm of the tensor
    ///
    /// ||X||_F = sqrt(Σᵢⱼₖ... X²ᵢⱼₖ...)
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3]);
    /// let norm = tensor.frobenius_norm();
    /// assert!((norm - (6.0_f64).sqrt()).abs() < 1e-10);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.squared_norm().sqrt()
    }

    /// Sum of squared elements (the squared Frobenius norm)
    pub fn squared_norm(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x * x)
    }

    /// Largest absolute difference against another tensor of the same shape
    ///
    /// Returns `None` when the shapes differ.
    pub fn max_abs_diff(&self, other: &Self) -> Option<T> {
        if !self.same_shape(other) {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs())),
        )
    }
}
