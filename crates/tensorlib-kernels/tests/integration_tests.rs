//! Integration tests for tensorlib-kernels with tensorlib-core
//!
//! These check that the kernels agree with `DenseND::matricize` on the
//! ordering conventions the decomposition solvers rely on.

use scirs2_core::ndarray_ext::{array, Array2};
use tensorlib_core::DenseND;
use tensorlib_kernels::{hadamard, khatri_rao_except, kr, kronecker_except, tmult, tmult_all};

fn rank_one(a: &[f64], b: &[f64], c: &[f64]) -> DenseND<f64> {
    DenseND::from_shape_fn(&[a.len(), b.len(), c.len()], |idx| {
        a[idx[0]] * b[idx[1]] * c[idx[2]]
    })
}

#[test]
fn test_kr_reference_case() {
    let b = array![[1.0, 2.0], [3.0, 4.0]];
    let c = array![[5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];

    let a = kr(&b.view(), &c.view()).unwrap();
    assert_eq!(
        a,
        array![
            [5.0, 12.0],
            [7.0, 16.0],
            [9.0, 20.0],
            [15.0, 24.0],
            [21.0, 32.0],
            [27.0, 40.0]
        ]
    );
}

#[test]
fn test_rank_one_unfolding_matches_design_matrix() {
    let a = [1.0, 2.0];
    let b = [3.0, -1.0, 0.5];
    let c = [2.0, 4.0, 1.0, -3.0];
    let tensor = rank_one(&a, &b, &c);

    let factors = vec![
        Array2::from_shape_vec((2, 1), a.to_vec()).unwrap(),
        Array2::from_shape_vec((3, 1), b.to_vec()).unwrap(),
        Array2::from_shape_vec((4, 1), c.to_vec()).unwrap(),
    ];

    for axis in 0..3 {
        let unfolded = tensor.matricize(axis as isize).unwrap();
        let design = khatri_rao_except(&factors, axis).unwrap();
        let model = factors[axis].dot(&design.t());
        assert_eq!(unfolded, model, "axis {}", axis);
    }
}

#[test]
fn test_tucker_projection_matches_tmult() {
    // X_(n) · (U_{n+1} ⊗ … ⊗ U_{n-1}) is the unfolding of X projected on
    // every axis but n, i.e. matricize(X ×_{j≠n} U_jᵀ, n)
    let len = 3 * 4 * 2;
    let tensor = DenseND::from_vec((0..len).map(|v| v as f64).collect(), &[3, 4, 2]).unwrap();
    let factors = vec![
        Array2::from_shape_fn((3, 2), |(i, j)| (i + 2 * j) as f64),
        Array2::from_shape_fn((4, 2), |(i, j)| (i * j + 1) as f64),
        Array2::from_shape_fn((2, 1), |(i, _)| (i + 1) as f64),
    ];

    for axis in 0..3 {
        let kron = kronecker_except(&factors, axis).unwrap();
        let projected = tensor.matricize(axis as isize).unwrap().dot(&kron);

        let mut partial = tensor.clone();
        for (j, factor) in factors.iter().enumerate() {
            if j != axis {
                partial = tmult(&partial, &factor.t(), j as isize).unwrap();
            }
        }
        let expected = partial.matricize(axis as isize).unwrap();
        assert_eq!(projected, expected, "axis {}", axis);
    }
}

#[test]
fn test_gram_hadamard_equals_design_gram() {
    // (B ⊙ C)ᵀ(B ⊙ C) = BᵀB ∗ CᵀC
    let b = array![[1.0, 2.0], [0.0, -1.0], [3.0, 1.0]];
    let c = array![[2.0, 1.0], [1.0, 1.0]];

    let design = kr(&b.view(), &c.view()).unwrap();
    let lhs = design.t().dot(&design);
    let rhs = hadamard(&b.t().dot(&b).view(), &c.t().dot(&c).view()).unwrap();
    assert_eq!(lhs, rhs);
}

#[test]
fn test_tmult_all_core_shape() {
    let tensor = DenseND::<f64>::ones(&[4, 5, 6]);
    let us = [
        Array2::<f64>::ones((4, 2)),
        Array2::<f64>::ones((5, 3)),
        Array2::<f64>::ones((6, 2)),
    ];
    let views: Vec<_> = us.iter().map(|u| u.view()).collect();

    let core = tmult_all(&tensor, &views, true).unwrap();
    assert_eq!(core.shape(), &[2, 3, 2]);
    // every core entry sums the whole tensor
    assert!(core.iter().all(|&v| v == 120.0));
}
