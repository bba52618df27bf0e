//! Tensor creation and initialization methods
//!
//! Random tensors draw from `scirs2_core::random`; callers that need
//! reproducible data pass their own generator to the `_with` variants.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array, Dimension, IxDyn};
use scirs2_core::numeric::Num;
use scirs2_core::random::{thread_rng, Rng};

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Create a tensor with random values from a uniform distribution
    ///
    /// Uses the thread-local generator. Values lie in `[low, high)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::random_uniform(&[2, 3], 0.0, 1.0);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// assert!(tensor.iter().all(|&x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random_uniform(shape: &[usize], low: f64, high: f64) -> Self
    where
        T: From<f64>,
    {
        let mut rng = thread_rng();
        Self::random_uniform_with(shape, low, high, &mut rng)
    }

    /// Create a uniform random tensor from an explicit generator
    ///
    /// ```
    /// use scirs2_core::random::{rngs::StdRng, SeedableRng};
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let a = DenseND::<f64>::random_uniform_with(&[2, 3, 4], 0.0, 1.0, &mut StdRng::seed_from_u64(7));
    /// let b = DenseND::<f64>::random_uniform_with(&[2, 3, 4], 0.0, 1.0, &mut StdRng::seed_from_u64(7));
    /// assert_eq!(a, b);
    /// ```
    pub fn random_uniform_with<R>(shape: &[usize], low: f64, high: f64, rng: &mut R) -> Self
    where
        T: From<f64>,
        R: Rng + ?Sized,
    {
        let range = high - low;
        Self::from_shape_fn(shape, |_| {
            let sample: f64 = low + rng.random::<f64>() * range;
            <T as From<f64>>::from(sample)
        })
    }

    /// Build a tensor by evaluating `f` at every multi-index
    ///
    /// ```
    /// use tensorlib_core::dense::DenseND;
    ///
    /// let t = DenseND::<f64>::from_shape_fn(&[2, 3], |idx| (idx[0] * 10 + idx[1]) as f64);
    /// assert_eq!(t[&[1, 2]], 12.0);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        Self {
            data: Array::from_shape_fn(IxDyn(shape), |idx| f(idx.slice())),
        }
    }

    /// Create a tensor filled with a specific value
    pub fn full(shape: &[usize], value: T) -> Self {
        Self::from_elem(shape, value)
    }
}
