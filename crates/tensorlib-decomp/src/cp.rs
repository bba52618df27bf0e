//! CP-ALS (Canonical Polyadic decomposition via Alternating Least Squares)
//!
//! The CP decomposition factorizes a tensor X into a sum of rank-1 tensors:
//!
//! X ≈ Σᵣ λᵣ (a₀ᵣ ∘ a₁ᵣ ∘ ... ∘ a_{N-1,r})
//!
//! One sweep updates every axis once, in order. For axis n the other factors
//! are fixed and
//!
//! ```text
//! Aₙ ← X_(n) · Kₙ · (∗_{j≠n} AⱼᵀAⱼ)⁺
//! ```
//!
//! where Kₙ is the Khatri-Rao chain of the other factors in the cyclic order
//! of `matricize`, `∗` the Hadamard product and `⁺` the pseudo-inverse. The
//! new factor is rescaled right away and its Gram matrix refreshed, so later
//! axes in the same sweep see it.
//!
//! The SSE after each sweep is `‖X_(0) − A₀ · diag(λ) · K₀ᵀ‖²`, with λ the
//! scales taken off the last axis. Iteration stops when the relative change
//! drops below `tol` or after `max_iter` sweeps; running out of sweeps is a
//! normal outcome reported through [`CpDecomp::converged`].

use crate::config::DecompConfig;
use crate::error::{DecompError, DecompResult};
use crate::init::{initial_factors, unfold_all};
use crate::linalg::{cast, gram, normalize_columns, pinv, squared_distance, ColumnScaling, Scalar};
use crate::validation::{check_factors, check_stopping, check_tensor};
use scirs2_core::ndarray_ext::{Array1, Array2};
use scirs2_core::random::rngs::StdRng;
use tensorlib_core::DenseND;
use tensorlib_kernels::{hadamard, hadamard_inplace, khatri_rao, khatri_rao_except};
use tracing::{debug, info, instrument};

/// Previous-SSE seed for the first sweep, so it never looks converged.
const SSE_SENTINEL: f64 = 1e100;

/// CP decomposition result
#[derive(Debug, Clone)]
pub struct CpDecomp<T> {
    /// Factor matrices, one per axis, each of shape (dᵢ, R)
    pub factors: Vec<Array2<T>>,

    /// Column scales removed from the last axis's factor by normalization
    pub weights: Array1<T>,

    /// Sum of squared errors after the final sweep
    pub sse: T,

    /// Number of sweeps performed
    pub iters: usize,

    /// False when the iteration budget ran out first
    pub converged: bool,
}

impl<T: Scalar> CpDecomp<T> {
    pub fn rank(&self) -> usize {
        self.weights.len()
    }

    /// Rebuild the modelled tensor `Σᵣ λᵣ a₀ᵣ ∘ … ∘ a_{N-1,r}`.
    pub fn reconstruct(&self, shape: &[usize]) -> DecompResult<DenseND<T>> {
        check_factors(shape, &self.factors)?;

        let design = khatri_rao_except(&self.factors, 0)?;
        let unfolded = model_unfolding(&self.factors[0], &self.weights, &design);
        DenseND::unmatricize(&unfolded, 0, shape).map_err(|e| DecompError::shape(e.to_string()))
    }

    /// `1 − ‖X − X̂‖ / ‖X‖`.
    pub fn fit(&self, tensor: &DenseND<T>) -> DecompResult<T> {
        let reconstructed = self.reconstruct(tensor.shape())?;
        let residual = (tensor - &reconstructed).frobenius_norm();
        let norm = tensor.frobenius_norm();

        if norm == T::zero() {
            return Ok(if residual == T::zero() { T::one() } else { T::zero() });
        }
        Ok(T::one() - residual / norm)
    }

    /// Plain factor sequence with the weights folded into the last factor.
    pub fn into_factors(self) -> Vec<Array2<T>> {
        let mut factors = self.factors;
        if let Some(last) = factors.last_mut() {
            *last = &*last * &self.weights;
        }
        factors
    }
}

/// CP decomposition with the parameters in `config`.
///
/// Draws its random source from `config.random_state`, then dispatches to
/// [`cp_als_3way`] for 3-axis tensors and [`cp_als_nway`] otherwise.
///
/// # Errors
///
/// - [`DecompError::InvalidParameter`] if the rank is missing or a parameter
///   is out of range
/// - [`DecompError::ShapeMismatch`] if the tensor has fewer than 3 axes
/// - [`DecompError::Linalg`] if the backend fails
///
/// # Examples
///
/// ```
/// use tensorlib_core::DenseND;
/// use tensorlib_decomp::{cp, DecompConfig};
///
/// let tensor = DenseND::<f64>::random_uniform(&[6, 5, 4], 0.0, 1.0);
/// let result = cp(&tensor, &DecompConfig::new(2).with_max_iter(50)).unwrap();
///
/// assert_eq!(result.factors.len(), 3);
/// assert_eq!(result.factors[0].shape(), &[6, 2]);
/// assert!(result.iters <= 50);
/// ```
pub fn cp<T: Scalar>(tensor: &DenseND<T>, config: &DecompConfig) -> DecompResult<CpDecomp<T>> {
    let mut rng = config.random_state.to_rng();
    cp_with_rng(tensor, config, &mut rng)
}

/// Like [`cp`] but draws from `rng`, ignoring `config.random_state`.
#[instrument(skip_all, fields(shape = ?tensor.shape(), rank = ?config.rank, init = %config.init))]
pub fn cp_with_rng<T: Scalar>(
    tensor: &DenseND<T>,
    config: &DecompConfig,
    rng: &mut StdRng,
) -> DecompResult<CpDecomp<T>> {
    let rank = config.validate()?;
    check_tensor(tensor)?;

    let unfoldings = unfold_all(tensor)?;
    let factors = initial_factors(tensor, &unfoldings, rank, config.init, rng)?;

    if tensor.rank() == 3 {
        cp_als_3way(tensor, factors, config.tol, config.max_iter)
    } else {
        cp_als_nway(tensor, factors, config.tol, config.max_iter)
    }
}

/// CP-ALS for any number of axes, starting from `factors`.
#[instrument(skip(tensor, factors), fields(shape = ?tensor.shape()))]
pub fn cp_als_nway<T: Scalar>(
    tensor: &DenseND<T>,
    factors: Vec<Array2<T>>,
    tol: f64,
    max_iter: usize,
) -> DecompResult<CpDecomp<T>> {
    check_tensor(tensor)?;
    check_stopping(tol, max_iter)?;
    let rank = check_factors(tensor.shape(), &factors)?;

    let n_axes = tensor.rank();
    let unfoldings = unfold_all(tensor)?;
    let mut factors = factors;
    let mut grams: Vec<Array2<T>> = factors.iter().map(gram).collect();
    let mut weights = Array1::<T>::ones(rank);

    let mut tracker = ConvergenceTracker::new(tol);
    for iter in 1..=max_iter {
        let scaling = ColumnScaling::for_iteration(iter);

        for axis in 0..n_axes {
            let design = khatri_rao_except(&factors, axis)?;

            let mut coefficient = Array2::<T>::ones((rank, rank));
            for (other, g) in grams.iter().enumerate() {
                if other != axis {
                    hadamard_inplace(&mut coefficient.view_mut(), &g.view())?;
                }
            }

            let mut updated = solve_axis(&unfoldings[axis], &design, &coefficient)?;
            weights = normalize_columns(&mut updated, scaling);
            grams[axis] = gram(&updated);
            factors[axis] = updated;
        }

        let design = khatri_rao_except(&factors, 0)?;
        let sse = squared_distance(&unfoldings[0], &model_unfolding(&factors[0], &weights, &design));
        if tracker.update(iter, sse) {
            break;
        }
    }

    Ok(tracker.finish(factors, weights))
}

/// CP-ALS unrolled for 3-axis tensors.
///
/// Performs the same floating-point operations in the same order as
/// [`cp_als_nway`], so both return identical results for the same input.
#[instrument(skip(tensor, factors), fields(shape = ?tensor.shape()))]
pub fn cp_als_3way<T: Scalar>(
    tensor: &DenseND<T>,
    factors: Vec<Array2<T>>,
    tol: f64,
    max_iter: usize,
) -> DecompResult<CpDecomp<T>> {
    if tensor.rank() != 3 {
        return Err(DecompError::shape(format!(
            "3-way solver needs a 3-axis tensor, got shape {:?}",
            tensor.shape()
        )));
    }
    check_tensor(tensor)?;
    check_stopping(tol, max_iter)?;
    let rank = check_factors(tensor.shape(), &factors)?;

    let x0 = matricize(tensor, 0)?;
    let x1 = matricize(tensor, 1)?;
    let x2 = matricize(tensor, 2)?;

    let mut factors = factors.into_iter();
    let (mut a, mut b, mut c) = match (factors.next(), factors.next(), factors.next()) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => return Err(DecompError::shape("expected three factor matrices")),
    };
    let (mut gb, mut gc) = (gram(&b), gram(&c));
    let mut weights = Array1::<T>::ones(rank);
    let ones = Array2::<T>::ones((rank, rank));

    let mut tracker = ConvergenceTracker::new(tol);
    for iter in 1..=max_iter {
        let scaling = ColumnScaling::for_iteration(iter);

        // axis 0: B ⊙ C
        let design = khatri_rao(&b.view(), &c.view())?;
        let coefficient = hadamard(&hadamard(&ones.view(), &gb.view())?.view(), &gc.view())?;
        a = solve_axis(&x0, &design, &coefficient)?;
        normalize_columns(&mut a, scaling);
        let ga = gram(&a);

        // axis 1: C ⊙ A
        let design = khatri_rao(&c.view(), &a.view())?;
        let coefficient = hadamard(&hadamard(&ones.view(), &ga.view())?.view(), &gc.view())?;
        b = solve_axis(&x1, &design, &coefficient)?;
        normalize_columns(&mut b, scaling);
        gb = gram(&b);

        // axis 2: A ⊙ B
        let design = khatri_rao(&a.view(), &b.view())?;
        let coefficient = hadamard(&hadamard(&ones.view(), &ga.view())?.view(), &gb.view())?;
        c = solve_axis(&x2, &design, &coefficient)?;
        weights = normalize_columns(&mut c, scaling);
        gc = gram(&c);

        let design = khatri_rao(&b.view(), &c.view())?;
        let sse = squared_distance(&x0, &model_unfolding(&a, &weights, &design));
        if tracker.update(iter, sse) {
            break;
        }
    }

    Ok(tracker.finish(vec![a, b, c], weights))
}

fn matricize<T: Scalar>(tensor: &DenseND<T>, axis: isize) -> DecompResult<Array2<T>> {
    tensor
        .matricize(axis)
        .map_err(|e| DecompError::shape(e.to_string()))
}

/// `X_(n) · K · V⁺`
fn solve_axis<T: Scalar>(
    unfolded: &Array2<T>,
    design: &Array2<T>,
    coefficient: &Array2<T>,
) -> DecompResult<Array2<T>> {
    let projected = unfolded.dot(design);
    Ok(projected.dot(&pinv(coefficient)?))
}

/// `A₀ · diag(λ) · K₀ᵀ`
fn model_unfolding<T: Scalar>(first: &Array2<T>, weights: &Array1<T>, design: &Array2<T>) -> Array2<T> {
    let scaled = first * weights;
    scaled.dot(&design.t())
}

/// Relative-SSE stopping rule shared by the CP and Tucker solvers.
pub(crate) struct ConvergenceTracker<T> {
    tol: T,
    prev_sse: T,
    sse: T,
    iters: usize,
    converged: bool,
}

impl<T: Scalar> ConvergenceTracker<T> {
    pub(crate) fn new(tol: f64) -> Self {
        Self {
            tol: cast(tol),
            prev_sse: cast(SSE_SENTINEL),
            sse: cast(SSE_SENTINEL),
            iters: 0,
            converged: false,
        }
    }

    /// Record one sweep; returns true when iteration should stop.
    pub(crate) fn update(&mut self, iter: usize, sse: T) -> bool {
        let change = (sse - self.prev_sse).abs() / self.prev_sse;
        debug!(iter, sse = %sse, rel_change = %change, "ALS sweep");

        self.iters = iter;
        self.sse = sse;
        if sse == T::zero() || change < self.tol {
            self.converged = true;
            return true;
        }
        self.prev_sse = sse;
        false
    }

    pub(crate) fn sse(&self) -> T {
        self.sse
    }

    pub(crate) fn iters(&self) -> usize {
        self.iters
    }

    pub(crate) fn converged(&self) -> bool {
        self.converged
    }

    pub(crate) fn log_outcome(&self) {
        if self.converged {
            info!(iters = self.iters, sse = %self.sse, "ALS converged");
        } else {
            info!(iters = self.iters, sse = %self.sse, "ALS stopped at iteration budget");
        }
    }

    fn finish(self, factors: Vec<Array2<T>>, weights: Array1<T>) -> CpDecomp<T> {
        self.log_outcome();
        CpDecomp {
            factors,
            weights,
            sse: self.sse,
            iters: self.iters,
            converged: self.converged,
        }
    }
}
