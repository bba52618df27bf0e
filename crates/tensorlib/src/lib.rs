//! # tensorlib - multilinear decompositions of dense tensors
//!
//! This is the **meta crate** that re-exports the tensorlib components.
//!
//! ## Quick Start
//!
//! ```
//! use tensorlib::prelude::*;
//!
//! let tensor = DenseND::<f64>::random_uniform(&[6, 5, 4], 0.0, 1.0);
//! let config = DecompConfig::new(2).with_random_state(1999);
//!
//! let result = cp(&tensor, &config)?;
//! assert_eq!(result.factors.len(), 3);
//! assert_eq!(result.factors[0].shape(), &[6, 2]);
//! # Ok::<(), tensorlib::decomp::DecompError>(())
//! ```
//!
//! ## Components
//!
//! ### Dense tensors ([`core`])
//!
//! `DenseND` storage, reshape/permute, axis matricization and its inverse,
//! axis metadata through `TensorHandle`.
//!
//! ```
//! use tensorlib::core::{ops::{matricize, unmatricize}, DenseND};
//!
//! let tensor = DenseND::<f64>::from_shape_fn(&[2, 3, 4], |idx| idx.iter().sum::<usize>() as f64);
//! let flat = matricize(&tensor, 1)?;
//! assert_eq!(flat.shape(), &[3, 8]);
//! assert_eq!(unmatricize(&flat, 1, tensor.shape())?, tensor);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! Khatri-Rao, Kronecker, Hadamard and n-mode products.
//!
//! ```
//! use scirs2_core::ndarray_ext::Array2;
//! use tensorlib::kernels::kr;
//!
//! let b = Array2::<f64>::ones((10, 5));
//! let c = Array2::<f64>::ones((8, 5));
//! let product = kr(&b.view(), &c.view())?;
//! assert_eq!(product.shape(), &[80, 5]);
//! # Ok::<(), tensorlib::kernels::KernelError>(())
//! ```
//!
//! ### Decompositions ([`decomp`])
//!
//! CP-ALS and Tucker-ALS with random or HOSVD initialization.

#![deny(warnings)]

pub use tensorlib_core as core;
pub use tensorlib_decomp as decomp;
pub use tensorlib_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```
    //! use tensorlib::prelude::*;
    //!
    //! let tensor = DenseND::<f64>::zeros(&[3, 4, 5]);
    //! assert_eq!(matricize(&tensor, -1).unwrap().shape(), &[5, 12]);
    //! ```

    pub use crate::core::ops::{matricize, unmatricize};
    pub use crate::core::{AxisMeta, DenseND, TensorHandle};

    pub use crate::decomp::{
        cp, hosvd_factors, tucker, CpDecomp, DecompConfig, DecompError, InitStrategy,
        RandomState, TuckerDecomp,
    };

    pub use crate::kernels::{hadamard, khatri_rao, kr, kronecker, tmult};
}
