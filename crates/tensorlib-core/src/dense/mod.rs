//! Dense tensor implementation and operations
//!
//! The `DenseND` type is split over a few sub-modules by concern.

// Core type definition
pub mod types;

mod creation;
mod shape_ops;
mod statistics;

pub mod densend_traits;
pub(crate) mod functions;

pub use shape_ops::normalize_axis;
pub use types::DenseND;
