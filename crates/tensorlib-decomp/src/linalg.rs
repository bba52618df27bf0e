//! Dense linear-algebra helpers shared by the ALS solvers.
//!
//! The pseudo-inverse is assembled from the `scirs2_linalg` SVD and the basis
//! updates from its symmetric eigensolver. Both can return degenerate factors
//! on repeated spectra (the identity, or `(BᵀB)∘(CᵀC)` after an orthonormal
//! HOSVD start), so their output is checked and replaced by a Jacobi
//! eigendecomposition when a check fails. Backend errors surface as
//! [`DecompError::Linalg`](crate::DecompError::Linalg) without retries.

use crate::error::DecompResult;
use scirs2_core::ndarray_ext::{s, Array1, Array2, ScalarOperand};
use scirs2_core::numeric::{Float, FloatConst, FromPrimitive, NumAssign, NumCast};
use scirs2_linalg::{eigh, svd};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use tracing::trace;

const JACOBI_MAX_SWEEPS: usize = 64;

/// Floating-point element type accepted by the decompositions.
///
/// Implemented for every type with the listed capabilities, in practice
/// `f32` and `f64`.
pub trait Scalar:
    Float
    + FloatConst
    + FromPrimitive
    + NumCast
    + NumAssign
    + Sum
    + ScalarOperand
    + Send
    + Sync
    + Display
    + Debug
    + 'static
{
}

impl<T> Scalar for T where
    T: Float
        + FloatConst
        + FromPrimitive
        + NumCast
        + NumAssign
        + Sum
        + ScalarOperand
        + Send
        + Sync
        + Display
        + Debug
        + 'static
{
}

/// Convert an `f64` constant into `T`, NaN if it does not fit.
pub(crate) fn cast<T: Scalar>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// `FᵀF`
pub fn gram<T: Scalar>(factor: &Array2<T>) -> Array2<T> {
    factor.t().dot(factor)
}

/// Moore-Penrose pseudo-inverse via SVD.
///
/// Singular values at or below `max(m, n) · ε · σ_max` are treated as zero,
/// so rank-deficient and all-zero inputs are accepted. The backend SVD is
/// kept only if the result satisfies `A·A⁺·A = A` and `A⁺·A·A⁺ = A⁺`;
/// otherwise (repeated singular values are the usual trigger) the inverse
/// is rebuilt from a Jacobi eigendecomposition.
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tensorlib_decomp::pinv;
///
/// let a = array![[2.0_f64, 0.0], [0.0, 0.0]];
/// let p = pinv(&a).unwrap();
/// assert!((p[[0, 0]] - 0.5).abs() < 1e-12);
/// assert_eq!(p[[1, 1]], 0.0);
/// ```
pub fn pinv<T: Scalar>(matrix: &Array2<T>) -> DecompResult<Array2<T>> {
    if let Some(inverse) = svd_pinv(matrix)? {
        if is_pseudo_inverse(matrix, &inverse) {
            return Ok(inverse);
        }
    }
    trace!(shape = ?matrix.dim(), "backend SVD rejected, using Jacobi pseudo-inverse");
    Ok(jacobi_pinv(matrix))
}

/// `V · Σ⁺ · Uᵀ` from the backend SVD; `None` if the factors are unusable.
fn svd_pinv<T: Scalar>(matrix: &Array2<T>) -> DecompResult<Option<Array2<T>>> {
    let (m, n) = matrix.dim();
    let (u, sigma, vt) = svd(&matrix.view(), false, None)?;

    let k = sigma.len().min(u.ncols()).min(vt.nrows());
    if u.nrows() != m || vt.ncols() != n || !sigma.iter().all(|s| s.is_finite()) {
        return Ok(None);
    }
    let sigma_max = sigma.iter().fold(T::zero(), |acc, &v| acc.max(v));
    let cutoff = cast::<T>(m.max(n) as f64) * T::epsilon() * sigma_max;

    // V · Σ⁺, column by column
    let mut v_scaled = vt.slice(s![..k, ..]).t().to_owned();
    for (j, mut column) in v_scaled.columns_mut().into_iter().enumerate() {
        let sj = sigma[j];
        let inv = if sj > cutoff { T::one() / sj } else { T::zero() };
        column.mapv_inplace(|x| x * inv);
    }

    Ok(Some(v_scaled.dot(&u.slice(s![.., ..k]).t())))
}

/// First two Penrose conditions, relative to the size of each side.
fn is_pseudo_inverse<T: Scalar>(matrix: &Array2<T>, inverse: &Array2<T>) -> bool {
    if inverse.dim() != (matrix.ncols(), matrix.nrows()) || !inverse.iter().all(|x| x.is_finite()) {
        return false;
    }
    let bound = accuracy_bound::<T>(matrix.nrows().max(matrix.ncols()));
    let reproduces = max_abs_diff(&matrix.dot(inverse).dot(matrix), matrix) <= bound * max_abs(matrix);
    let reflexive = max_abs_diff(&inverse.dot(matrix).dot(inverse), inverse) <= bound * max_abs(inverse);
    reproduces && reflexive
}

/// Pseudo-inverse through a symmetric eigendecomposition.
///
/// Symmetric input is inverted on its own spectrum (`σᵢ = |λᵢ|`); anything
/// else goes through `(AᵀA)⁺ · Aᵀ` with `σᵢ² = λᵢ`.
fn jacobi_pinv<T: Scalar>(matrix: &Array2<T>) -> Array2<T> {
    let (m, n) = matrix.dim();
    let size = cast::<T>(m.max(n) as f64);

    if m == n && is_symmetric(matrix) {
        let (values, vectors) = jacobi_eigen(matrix);
        let sigma_max = values.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()));
        let cutoff = size * T::epsilon() * sigma_max;
        return spectral_inverse(&values, &vectors, |lambda| {
            if lambda.abs() > cutoff {
                T::one() / lambda
            } else {
                T::zero()
            }
        });
    }

    let (values, vectors) = jacobi_eigen(&gram(matrix));
    let sigma_max = values.iter().fold(T::zero(), |acc, &v| acc.max(v)).sqrt();
    let cutoff = size * T::epsilon() * sigma_max;
    let normal_inverse = spectral_inverse(&values, &vectors, |lambda| {
        if lambda > T::zero() && lambda.sqrt() > cutoff {
            T::one() / lambda
        } else {
            T::zero()
        }
    });
    normal_inverse.dot(&matrix.t())
}

/// `V · diag(f(λ)) · Vᵀ`
fn spectral_inverse<T: Scalar>(
    values: &Array1<T>,
    vectors: &Array2<T>,
    f: impl Fn(T) -> T,
) -> Array2<T> {
    let mut scaled = vectors.to_owned();
    for (j, mut column) in scaled.columns_mut().into_iter().enumerate() {
        let factor = f(values[j]);
        column.mapv_inplace(|x| x * factor);
    }
    scaled.dot(&vectors.t())
}

/// First ALS sweep divides by column norms, later ones by `max(max|·|, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnScaling {
    Norm,
    MaxAbsFloored,
}

impl ColumnScaling {
    pub fn for_iteration(iter: usize) -> Self {
        if iter <= 1 {
            ColumnScaling::Norm
        } else {
            ColumnScaling::MaxAbsFloored
        }
    }
}

/// Rescale each column in place and return the scales that were removed.
///
/// A zero scale leaves its column untouched.
pub fn normalize_columns<T: Scalar>(factor: &mut Array2<T>, scaling: ColumnScaling) -> Array1<T> {
    let mut scales = Array1::<T>::zeros(factor.ncols());

    for (j, mut column) in factor.columns_mut().into_iter().enumerate() {
        let scale = match scaling {
            ColumnScaling::Norm => column.iter().map(|&x| x * x).sum::<T>().sqrt(),
            ColumnScaling::MaxAbsFloored => column
                .iter()
                .fold(T::zero(), |acc, &x| acc.max(x.abs()))
                .max(T::one()),
        };
        if scale != T::zero() {
            column.mapv_inplace(|x| x / scale);
        }
        scales[j] = scale;
    }

    scales
}

/// Flip each column so its first entry of largest magnitude is positive.
///
/// All-zero columns are left as they are.
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tensorlib_decomp::sign_stabilize;
///
/// let mut u = array![[0.2, 0.9], [-0.8, 0.1], [0.1, -0.4]];
/// sign_stabilize(&mut u);
/// assert_eq!(u, array![[-0.2, 0.9], [0.8, 0.1], [-0.1, -0.4]]);
/// ```
pub fn sign_stabilize<T: Scalar>(matrix: &mut Array2<T>) {
    for mut column in matrix.columns_mut() {
        let mut pivot = T::zero();
        for &x in column.iter() {
            if x.abs() > pivot.abs() {
                pivot = x;
            }
        }
        if pivot < T::zero() {
            column.mapv_inplace(|x| -x);
        }
    }
}

/// Eigenpairs of a symmetric matrix, eigenvectors as orthonormal columns.
///
/// The backend solver is used when its output is finite, orthonormal and
/// satisfies `S·V = V·Λ`. When the spectrum has repeated values it may not
/// be, and the decomposition is recomputed by cyclic Jacobi rotations.
pub fn symmetric_eigen<T: Scalar>(symmetric: &Array2<T>) -> DecompResult<(Array1<T>, Array2<T>)> {
    let (values, vectors) = eigh(&symmetric.view(), None)?;
    if is_eigenbasis(symmetric, &values, &vectors) {
        return Ok((values, vectors));
    }
    trace!(size = symmetric.nrows(), "backend eigh rejected, using Jacobi rotations");
    Ok(jacobi_eigen(symmetric))
}

fn is_eigenbasis<T: Scalar>(symmetric: &Array2<T>, values: &Array1<T>, vectors: &Array2<T>) -> bool {
    let d = symmetric.nrows();
    if values.len() != d
        || vectors.dim() != (d, d)
        || !values.iter().chain(vectors.iter()).all(|x| x.is_finite())
    {
        return false;
    }
    let bound = accuracy_bound::<T>(d);

    let orthonormal = max_abs_diff(&gram(vectors), &Array2::eye(d)) <= bound;
    let mut scaled = vectors.to_owned();
    for (j, mut column) in scaled.columns_mut().into_iter().enumerate() {
        let lambda = values[j];
        column.mapv_inplace(|x| x * lambda);
    }
    let residual = max_abs_diff(&symmetric.dot(vectors), &scaled);
    orthonormal && residual <= bound * max_abs(symmetric).max(T::min_positive_value())
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Exact on repeated eigenvalues: an already diagonal block is never rotated.
fn jacobi_eigen<T: Scalar>(symmetric: &Array2<T>) -> (Array1<T>, Array2<T>) {
    let n = symmetric.nrows();
    let two = cast::<T>(2.0);
    let mut a = symmetric.to_owned();
    let mut v = Array2::<T>::eye(n);

    let total: T = a.iter().map(|&x| x * x).sum();
    let threshold = T::epsilon() * T::epsilon() * total;

    for _ in 0..JACOBI_MAX_SWEEPS {
        let mut off = T::zero();
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[[p, q]] * a[[p, q]];
            }
        }
        if off <= threshold {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == T::zero() {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (two * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + T::one()).sqrt());
                let c = T::one() / (t * t + T::one()).sqrt();
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

/// The `k` leading eigenvectors of a symmetric matrix as columns.
///
/// Eigenpairs are ordered by descending `|λ|` (ties keep the solver's order),
/// columns past the matrix size are zero, and the result is sign-stabilized.
pub fn leading_eigenvectors<T: Scalar>(symmetric: &Array2<T>, k: usize) -> DecompResult<Array2<T>> {
    let d = symmetric.nrows();
    let (values, vectors) = symmetric_eigen(symmetric)?;

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .abs()
            .partial_cmp(&values[a].abs())
            .unwrap_or(Ordering::Equal)
    });

    let mut basis = Array2::<T>::zeros((d, k));
    for (dst, &src) in order.iter().take(k).enumerate() {
        basis.column_mut(dst).assign(&vectors.column(src));
    }
    sign_stabilize(&mut basis);
    Ok(basis)
}

/// Tolerance for accepting backend output, `n · √ε`.
fn accuracy_bound<T: Scalar>(n: usize) -> T {
    cast::<T>(n.max(1) as f64) * T::epsilon().sqrt()
}

fn max_abs<T: Scalar>(a: &Array2<T>) -> T {
    a.iter().fold(T::zero(), |acc, &x| acc.max(x.abs()))
}

fn max_abs_diff<T: Scalar>(a: &Array2<T>, b: &Array2<T>) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc.max((x - y).abs()))
}

fn is_symmetric<T: Scalar>(a: &Array2<T>) -> bool {
    let bound = T::epsilon() * max_abs(a);
    (0..a.nrows()).all(|i| (0..i).all(|j| (a[[i, j]] - a[[j, i]]).abs() <= bound))
}

/// Squared Frobenius norm of `a - b`.
pub(crate) fn squared_distance<T: Scalar>(a: &Array2<T>, b: &Array2<T>) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    fn assert_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < tol, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_pinv_of_invertible_is_inverse() {
        let a = array![[4.0, 1.0], [2.0, 3.0]];
        let p = pinv(&a).unwrap();
        assert_close(&a.dot(&p), &Array2::eye(2), 1e-10);
    }

    #[test]
    fn test_pinv_rank_deficient_penrose_identity() {
        // A A⁺ A = A for a rank-1 matrix
        let a = array![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0]];
        let p = pinv(&a).unwrap();
        assert_eq!(p.shape(), &[3, 2]);
        assert_close(&a.dot(&p).dot(&a), &a, 1e-10);
    }

    #[test]
    fn test_pinv_zero_matrix() {
        let a = Array2::<f64>::zeros((3, 3));
        let p = pinv(&a).unwrap();
        assert!(p.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_normalize_columns_norm() {
        let mut f = array![[3.0, 0.0], [4.0, 0.0]];
        let scales = normalize_columns(&mut f, ColumnScaling::Norm);
        assert_eq!(scales, array![5.0, 0.0]);
        assert_close(&f, &array![[0.6, 0.0], [0.8, 0.0]], 1e-15);
    }

    #[test]
    fn test_normalize_columns_max_abs_floored() {
        let mut f = array![[0.5, -4.0], [0.25, 2.0]];
        let scales = normalize_columns(&mut f, ColumnScaling::MaxAbsFloored);
        assert_eq!(scales, array![1.0, 4.0]);
        assert_eq!(f, array![[0.5, -1.0], [0.25, 0.5]]);
    }

    #[test]
    fn test_column_scaling_schedule() {
        assert_eq!(ColumnScaling::for_iteration(1), ColumnScaling::Norm);
        assert_eq!(ColumnScaling::for_iteration(2), ColumnScaling::MaxAbsFloored);
    }

    #[test]
    fn test_sign_stabilize_first_max_wins() {
        let mut u = array![[-0.5, 0.0], [0.5, 0.0]];
        sign_stabilize(&mut u);
        assert_eq!(u, array![[0.5, 0.0], [-0.5, 0.0]]);
    }

    #[test]
    fn test_leading_eigenvectors_order_and_padding() {
        let m = array![[1.0, 0.0, 0.0], [0.0, -5.0, 0.0], [0.0, 0.0, 3.0]];
        let basis = leading_eigenvectors(&m, 4).unwrap();
        assert_eq!(basis.shape(), &[3, 4]);

        let expected = array![
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0]
        ];
        assert_close(&basis, &expected, 1e-10);
    }

    #[test]
    fn test_pinv_identity_is_identity() {
        for n in [2, 3] {
            let eye = Array2::<f64>::eye(n);
            assert_close(&pinv(&eye).unwrap(), &eye, 1e-12);
        }
    }

    #[test]
    fn test_pinv_repeated_diagonal() {
        let a = Array2::from_diag(&array![2.0, 2.0, 5.0]);
        let expected = Array2::from_diag(&array![0.5, 0.5, 0.2]);
        assert_close(&pinv(&a).unwrap(), &expected, 1e-12);
    }

    #[test]
    fn test_pinv_near_identity_coefficient() {
        // Hadamard product of two orthonormal Grams after an HOSVD start
        let a = array![[1.0000000000000007, -8.8e-33], [-8.8e-33, 0.9999999999999996]];
        let p = pinv(&a).unwrap();
        assert_close(&p, &Array2::eye(2), 1e-12);
        assert_close(&a.dot(&p).dot(&a), &a, 1e-12);
    }

    #[test]
    fn test_pinv_rank_deficient_repeated_spectrum() {
        // two equal nonzero singular values and one zero
        let a = array![[3.0, 0.0, 0.0], [0.0, 0.0, 3.0], [0.0, 0.0, 0.0]];
        let p = pinv(&a).unwrap();
        assert_close(&a.dot(&p).dot(&a), &a, 1e-12);
        assert_close(&p.dot(&a).dot(&p), &p, 1e-12);
        assert!(p.row(1).iter().all(|&x| x.abs() < 1e-12));
    }

    #[test]
    fn test_jacobi_pinv_rectangular() {
        let a = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let p = jacobi_pinv(&a);
        assert_eq!(p.shape(), &[2, 3]);
        assert_close(&p.dot(&a), &Array2::eye(2), 1e-12);
    }

    #[test]
    fn test_jacobi_eigen_decomposes() {
        let m = array![[4.0, 1.0, 0.5], [1.0, 3.0, -1.0], [0.5, -1.0, 2.0]];
        let (values, vectors) = jacobi_eigen(&m);
        assert_close(&gram(&vectors), &Array2::eye(3), 1e-12);

        let rebuilt = vectors.dot(&Array2::from_diag(&values)).dot(&vectors.t());
        assert_close(&rebuilt, &m, 1e-12);
    }

    #[test]
    fn test_symmetric_eigen_repeated_spectrum() {
        // eigenvalues 1, 3, 3
        let m = array![[2.0, 1.0, 0.0], [1.0, 2.0, 0.0], [0.0, 0.0, 3.0]];
        let (values, vectors) = symmetric_eigen(&m).unwrap();

        assert_close(&gram(&vectors), &Array2::eye(3), 1e-10);
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((sorted[0] - 1.0).abs() < 1e-10);
        assert!((sorted[1] - 3.0).abs() < 1e-10);
        assert!((sorted[2] - 3.0).abs() < 1e-10);
        assert_close(&m.dot(&vectors), &vectors.dot(&Array2::from_diag(&values)), 1e-10);
    }

    #[test]
    fn test_leading_eigenvectors_of_identity_orthonormal() {
        let basis = leading_eigenvectors(&Array2::<f64>::eye(3), 2).unwrap();
        assert!(basis.iter().all(|x| x.is_finite()));
        assert_close(&gram(&basis), &Array2::eye(2), 1e-12);
    }

    #[test]
    fn test_gram_symmetric() {
        let f = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let g = gram(&f);
        assert_eq!(g, array![[35.0, 44.0], [44.0, 56.0]]);
    }
}
