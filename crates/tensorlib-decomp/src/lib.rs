//! # tensorlib-decomp - CP and Tucker decompositions
//!
//! Alternating-least-squares solvers for dense tensors with three or more
//! axes.
//!
//! ### CP Decomposition (Canonical Polyadic / CANDECOMP/PARAFAC)
//!
//! ```text
//! X ≈ Σᵣ λᵣ (a₀ᵣ ∘ a₁ᵣ ∘ ... ∘ a_{N-1,r})
//! ```
//!
//! - [`cp`] / [`cp_with_rng`]: validate, initialize, run ALS
//! - [`cp_als_nway`]: general solver from given starting factors
//! - [`cp_als_3way`]: unrolled 3-axis solver, numerically identical to the
//!   general one
//!
//! ### Tucker Decomposition
//!
//! ```text
//! X ≈ G ×₀ U₀ ×₁ U₁ ×₂ ... ×_{N-1} U_{N-1}
//! ```
//!
//! - [`tucker`] / [`tucker_with_rng`], [`tucker_als_nway`], [`tucker_als_3way`]
//!
//! ### Initialization
//!
//! [`InitStrategy::Hosvd`] (default) takes the leading eigenvectors of each
//! unfolding's Gram matrix, sign-stabilized so results are reproducible.
//! [`InitStrategy::Random`] draws uniform [0, 1) entries from the
//! [`RandomState`] in the config.
//!
//! ## Quick Start
//!
//! ```
//! use tensorlib_core::DenseND;
//! use tensorlib_decomp::{cp, DecompConfig, InitStrategy};
//!
//! let tensor = DenseND::<f64>::random_uniform(&[8, 7, 6], 0.0, 1.0);
//! let config = DecompConfig::new(3)
//!     .with_init(InitStrategy::Random)
//!     .with_random_state(1999);
//!
//! let result = cp(&tensor, &config)?;
//! println!("{} sweeps, SSE {:.4}, converged: {}", result.iters, result.sse, result.converged);
//!
//! let factors = result.into_factors();
//! assert_eq!(factors.len(), 3);
//! # Ok::<(), tensorlib_decomp::DecompError>(())
//! ```
//!
//! ## Errors
//!
//! All entry points return [`DecompResult`]. A missing rank is
//! [`DecompError::InvalidParameter`], a tensor with fewer than three axes is
//! [`DecompError::ShapeMismatch`], and backend failures arrive unchanged in
//! [`DecompError::Linalg`]. Hitting `max_iter` is not an error.
//!
//! ## Logging
//!
//! Entry points open `tracing` spans; each sweep logs its SSE at `debug`
//! and the outcome is logged at `info`. Install a subscriber to see them.
//!
//! ## References
//!
//! - Kolda & Bader (2009), "Tensor Decompositions and Applications"
//! - De Lathauwer et al. (2000), "Multilinear Singular Value Decomposition"

#![deny(warnings)]

pub mod config;
pub mod cp;
pub mod error;
pub mod init;
pub mod linalg;
pub mod tucker;
pub mod validation;


pub use config::{DecompConfig, InitStrategy, RandomState, DEFAULT_MAX_ITER, DEFAULT_TOL};
pub use cp::{cp, cp_als_3way, cp_als_nway, cp_with_rng, CpDecomp};
pub use error::{DecompError, DecompResult};
pub use init::{hosvd_factors, random_factors};
pub use linalg::{pinv, sign_stabilize, Scalar};
pub use tucker::{tucker, tucker_als_3way, tucker_als_nway, tucker_with_rng, TuckerDecomp};
pub use validation::check_tensor;
