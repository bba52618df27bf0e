//! Starting factor matrices for the ALS sweeps.
//!
//! - [`random_factors`]: uniform [0, 1) entries from a caller-owned generator
//! - [`hosvd_factors`]: leading eigenvectors of each unfolding's Gram matrix
//!   `X_(i) X_(i)ᵀ`, sign-stabilized so that repeated runs agree exactly

use crate::config::InitStrategy;
use crate::error::{DecompError, DecompResult};
use crate::linalg::{cast, leading_eigenvectors, Scalar};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::random::Rng;
use tensorlib_core::DenseND;

/// One `(d_i, rank)` matrix of uniform [0, 1) draws per axis.
///
/// ```
/// use scirs2_core::random::{rngs::StdRng, SeedableRng};
/// use tensorlib_decomp::random_factors;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let factors = random_factors::<f64, _>(&[3, 4, 5], 2, &mut rng);
/// assert_eq!(factors[1].shape(), &[4, 2]);
/// assert!(factors.iter().flatten().all(|&x| (0.0..1.0).contains(&x)));
/// ```
pub fn random_factors<T, R>(shape: &[usize], rank: usize, rng: &mut R) -> Vec<Array2<T>>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    shape
        .iter()
        .map(|&d| Array2::from_shape_fn((d, rank), |_| cast::<T>(rng.random::<f64>())))
        .collect()
}

/// HOSVD starting point: for each axis the `rank` leading eigenvectors of
/// `matricize(X, i) · matricize(X, i)ᵀ`.
///
/// Columns beyond an axis's extent are zero. No randomness is involved.
pub fn hosvd_factors<T: Scalar>(tensor: &DenseND<T>, rank: usize) -> DecompResult<Vec<Array2<T>>> {
    let unfoldings = unfold_all(tensor)?;
    hosvd_from_unfoldings(&unfoldings, rank)
}

pub(crate) fn hosvd_from_unfoldings<T: Scalar>(
    unfoldings: &[Array2<T>],
    rank: usize,
) -> DecompResult<Vec<Array2<T>>> {
    unfoldings
        .iter()
        .map(|unfolded| {
            let gram = unfolded.dot(&unfolded.t());
            leading_eigenvectors(&gram, rank)
        })
        .collect()
}

/// `matricize(X, i)` for every axis.
pub(crate) fn unfold_all<T: Scalar>(tensor: &DenseND<T>) -> DecompResult<Vec<Array2<T>>> {
    (0..tensor.rank())
        .map(|axis| {
            tensor
                .matricize(axis as isize)
                .map_err(|e| DecompError::shape(e.to_string()))
        })
        .collect()
}

/// Build starting factors for the chosen strategy.
pub(crate) fn initial_factors<T, R>(
    tensor: &DenseND<T>,
    unfoldings: &[Array2<T>],
    rank: usize,
    init: InitStrategy,
    rng: &mut R,
) -> DecompResult<Vec<Array2<T>>>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    match init {
        InitStrategy::Random => Ok(random_factors(tensor.shape(), rank, rng)),
        InitStrategy::Hosvd => hosvd_from_unfoldings(unfoldings, rank),
    }
}
