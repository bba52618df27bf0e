//! Tucker decomposition by alternating least squares
//!
//! Factorizes a tensor into a small core and one basis per axis:
//!
//! X ≈ G ×₀ U₀ ×₁ U₁ ×₂ ... ×_{N-1} U_{N-1}
//!
//! The sweep mirrors CP-ALS. For axis n the other bases are fixed, the
//! unfolding is projected onto them with the Kronecker chain in the cyclic
//! order of `matricize`,
//!
//! ```text
//! Y = X_(n) · (U_{n+1} ⊗ … ⊗ U_{n-1})
//! ```
//!
//! and Uₙ becomes the `rank` leading eigenvectors of `Y Yᵀ`, sign-stabilized
//! and rescaled with the same column policy as CP. Convergence uses the same
//! relative SSE rule; the core `G = X ×ₙ Uₙᵀ` is formed once at the end.

use crate::config::DecompConfig;
use crate::cp::ConvergenceTracker;
use crate::error::{DecompError, DecompResult};
use crate::init::{initial_factors, unfold_all};
use crate::linalg::{leading_eigenvectors, normalize_columns, squared_distance, ColumnScaling, Scalar};
use crate::validation::{check_factors, check_stopping, check_tensor};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::random::rngs::StdRng;
use tensorlib_core::DenseND;
use tensorlib_kernels::{kronecker, kronecker_except, tmult_all};
use tracing::instrument;

/// Tucker decomposition result
#[derive(Clone)]
pub struct TuckerDecomp<T> {
    /// Core tensor with shape (R, R, ..., R)
    pub core: DenseND<T>,

    /// Basis for each axis, shape (dᵢ, R)
    pub factors: Vec<Array2<T>>,

    pub sse: T,
    pub iters: usize,
    pub converged: bool,
}

impl<T: std::fmt::Debug + Clone + scirs2_core::Num> std::fmt::Debug for TuckerDecomp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuckerDecomp")
            .field("core", &self.core)
            .field("factors", &self.factors)
            .field("sse", &self.sse)
            .field("iters", &self.iters)
            .field("converged", &self.converged)
            .finish()
    }
}

impl<T: Scalar> TuckerDecomp<T> {
    /// `G ×₀ U₀ ×₁ … ×_{N-1} U_{N-1}`
    pub fn reconstruct(&self) -> DecompResult<DenseND<T>> {
        let views: Vec<ArrayView2<T>> = self.factors.iter().map(|f| f.view()).collect();
        Ok(tmult_all(&self.core, &views, false)?)
    }

    /// Elements of the original tensor per stored element.
    pub fn compression_ratio(&self) -> f64 {
        let original: usize = self.factors.iter().map(|f| f.nrows()).product();
        let stored = self.core.len() + self.factors.iter().map(|f| f.len()).sum::<usize>();
        original as f64 / stored as f64
    }
}

/// Tucker decomposition with the parameters in `config`.
///
/// Every axis uses the same rank. Dispatches to [`tucker_als_3way`] for
/// 3-axis tensors and [`tucker_als_nway`] otherwise; errors as for
/// [`crate::cp`].
///
/// ```
/// use tensorlib_core::DenseND;
/// use tensorlib_decomp::{tucker, DecompConfig};
///
/// let tensor = DenseND::<f64>::random_uniform(&[6, 5, 4], 0.0, 1.0);
/// let result = tucker(&tensor, &DecompConfig::new(2)).unwrap();
///
/// assert_eq!(result.core.shape(), &[2, 2, 2]);
/// assert_eq!(result.factors[2].shape(), &[4, 2]);
/// ```
pub fn tucker<T: Scalar>(tensor: &DenseND<T>, config: &DecompConfig) -> DecompResult<TuckerDecomp<T>> {
    let mut rng = config.random_state.to_rng();
    tucker_with_rng(tensor, config, &mut rng)
}

/// Like [`tucker`] but draws from `rng`, ignoring `config.random_state`.
#[instrument(skip_all, fields(shape = ?tensor.shape(), rank = ?config.rank, init = %config.init))]
pub fn tucker_with_rng<T: Scalar>(
    tensor: &DenseND<T>,
    config: &DecompConfig,
    rng: &mut StdRng,
) -> DecompResult<TuckerDecomp<T>> {
    let rank = config.validate()?;
    check_tensor(tensor)?;

    let unfoldings = unfold_all(tensor)?;
    let factors = initial_factors(tensor, &unfoldings, rank, config.init, rng)?;

    if tensor.rank() == 3 {
        tucker_als_3way(tensor, factors, config.tol, config.max_iter)
    } else {
        tucker_als_nway(tensor, factors, config.tol, config.max_iter)
    }
}

/// Tucker-ALS for any number of axes, starting from `factors`.
#[instrument(skip(tensor, factors), fields(shape = ?tensor.shape()))]
pub fn tucker_als_nway<T: Scalar>(
    tensor: &DenseND<T>,
    factors: Vec<Array2<T>>,
    tol: f64,
    max_iter: usize,
) -> DecompResult<TuckerDecomp<T>> {
    check_tensor(tensor)?;
    check_stopping(tol, max_iter)?;
    let rank = check_factors(tensor.shape(), &factors)?;

    let unfoldings = unfold_all(tensor)?;
    let mut factors = factors;

    let mut tracker = ConvergenceTracker::new(tol);
    for iter in 1..=max_iter {
        let scaling = ColumnScaling::for_iteration(iter);

        for axis in 0..tensor.rank() {
            let projection = kronecker_except(&factors, axis)?;
            factors[axis] = update_basis(&unfoldings[axis], &projection, rank, scaling)?;
        }

        let projection = kronecker_except(&factors, 0)?;
        let sse = squared_distance(&unfoldings[0], &model_unfolding(&unfoldings[0], &factors[0], &projection));
        if tracker.update(iter, sse) {
            break;
        }
    }

    finish(tensor, factors, tracker)
}

/// Tucker-ALS unrolled for 3-axis tensors, numerically identical to
/// [`tucker_als_nway`].
#[instrument(skip(tensor, factors), fields(shape = ?tensor.shape()))]
pub fn tucker_als_3way<T: Scalar>(
    tensor: &DenseND<T>,
    factors: Vec<Array2<T>>,
    tol: f64,
    max_iter: usize,
) -> DecompResult<TuckerDecomp<T>> {
    if tensor.rank() != 3 {
        return Err(DecompError::shape(format!(
            "3-way solver needs a 3-axis tensor, got shape {:?}",
            tensor.shape()
        )));
    }
    check_tensor(tensor)?;
    check_stopping(tol, max_iter)?;
    let rank = check_factors(tensor.shape(), &factors)?;

    let unfoldings = unfold_all(tensor)?;
    let (x0, x1, x2) = (&unfoldings[0], &unfoldings[1], &unfoldings[2]);

    let mut factors = factors.into_iter();
    let (mut a, mut b, mut c) = match (factors.next(), factors.next(), factors.next()) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => return Err(DecompError::shape("expected three factor matrices")),
    };

    let mut tracker = ConvergenceTracker::new(tol);
    for iter in 1..=max_iter {
        let scaling = ColumnScaling::for_iteration(iter);

        a = update_basis(x0, &kronecker(&b.view(), &c.view()), rank, scaling)?;
        b = update_basis(x1, &kronecker(&c.view(), &a.view()), rank, scaling)?;
        c = update_basis(x2, &kronecker(&a.view(), &b.view()), rank, scaling)?;

        let projection = kronecker(&b.view(), &c.view());
        let sse = squared_distance(x0, &model_unfolding(x0, &a, &projection));
        if tracker.update(iter, sse) {
            break;
        }
    }

    finish(tensor, vec![a, b, c], tracker)
}

/// Leading left basis of `X_(n) · P`, stabilized and rescaled.
fn update_basis<T: Scalar>(
    unfolded: &Array2<T>,
    projection: &Array2<T>,
    rank: usize,
    scaling: ColumnScaling,
) -> DecompResult<Array2<T>> {
    let y = unfolded.dot(projection);
    let mut basis = leading_eigenvectors(&y.dot(&y.t()), rank)?;
    normalize_columns(&mut basis, scaling);
    Ok(basis)
}

/// `U₀ · G_(0) · Pᵀ` with `G_(0) = U₀ᵀ · X_(0) · P`.
fn model_unfolding<T: Scalar>(x0: &Array2<T>, u0: &Array2<T>, projection: &Array2<T>) -> Array2<T> {
    let core_unfolded = u0.t().dot(&x0.dot(projection));
    u0.dot(&core_unfolded).dot(&projection.t())
}

fn finish<T: Scalar>(
    tensor: &DenseND<T>,
    factors: Vec<Array2<T>>,
    tracker: ConvergenceTracker<T>,
) -> DecompResult<TuckerDecomp<T>> {
    tracker.log_outcome();

    let views: Vec<ArrayView2<T>> = factors.iter().map(|f| f.view()).collect();
    let core = tmult_all(tensor, &views, true)?;

    Ok(TuckerDecomp {
        core,
        factors,
        sse: tracker.sse(),
        iters: tracker.iters(),
        converged: tracker.converged(),
    })
}
