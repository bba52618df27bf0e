//! # tensorlib-core
//!
//! Dense N-dimensional tensors and the axis algebra the decomposition engine
//! is built on.
//!
//! - [`DenseND`]: dense tensor over scirs2_core's dynamic-dimensional arrays
//! - [`DenseND::matricize`] / [`DenseND::unmatricize`]: unfold a tensor along
//!   one axis and fold it back, with negative-axis support
//! - [`TensorHandle`] / [`AxisMeta`]: tensors annotated with axis names and
//!   descriptive metadata
//!
//! ## Quick Start
//!
//! ```
//! use tensorlib_core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! let unfolded = tensor.matricize(1).unwrap();
//! assert_eq!(unfolded.shape(), &[3, 8]);
//!
//! let folded = DenseND::unmatricize(&unfolded, 1, &[2, 3, 4]).unwrap();
//! assert_eq!(folded, tensor);
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`, random numbers come
//! from `scirs2_core::random`.

#![deny(warnings)]

pub mod dense;
pub mod ops;
pub mod types;


pub use dense::normalize_axis;
pub use types::{Axis, AxisMeta, DenseND, Rank, Shape, TensorHandle};
