//! # tensorlib-kernels
//!
//! Matrix and tensor kernels used by the decompositions in `tensorlib-decomp`.
//!
//! - **Khatri-Rao product** ([`khatri_rao`] / [`kr`]): column-wise Kronecker
//!   product, plus [`khatri_rao_except`] which builds the CP design matrix for
//!   one axis
//! - **Kronecker product** ([`kronecker`], [`kronecker_except`]): used by the
//!   Tucker basis update
//! - **Hadamard product** ([`hadamard`], [`hadamard_inplace`]): combines Gram
//!   matrices
//! - **N-mode product** ([`tmult`], [`tmult_all`])
//!
//! All chains share the cyclic axis order of `DenseND::matricize`, so
//! `matricize(X, n) ≈ Fₙ · khatri_rao_except(F, n)ᵀ` holds for a CP model.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array2;
//! use tensorlib_core::DenseND;
//! use tensorlib_kernels::{kr, tmult};
//!
//! let a = Array2::<f64>::ones((10, 5));
//! let b = Array2::<f64>::ones((8, 5));
//! let ab = kr(&a.view(), &b.view()).unwrap();
//! assert_eq!(ab.shape(), &[80, 5]);
//!
//! let tensor = DenseND::<f64>::ones(&[3, 4, 5]);
//! let matrix = Array2::<f64>::ones((2, 3));
//! let result = tmult(&tensor, &matrix.view(), 0).unwrap();
//! assert_eq!(result.shape(), &[2, 4, 5]);
//! ```
//!
//! ## Errors
//!
//! Every kernel returns [`KernelResult`]; operand shape problems are
//! [`KernelError::DimensionMismatch`].

#![deny(warnings)]

pub mod error;
pub mod hadamard;
pub mod khatri_rao;
pub mod kronecker;
pub mod nmode;


pub use error::{KernelError, KernelResult};
pub use hadamard::{hadamard, hadamard_inplace};
pub use khatri_rao::{khatri_rao, khatri_rao_chain, khatri_rao_except, kr};
pub use kronecker::{kronecker, kronecker_chain, kronecker_except};
pub use nmode::{tmult, tmult_all};
