//! Core type definitions for tensorlib tensors.
//!
//! - Type aliases for tensor dimensions ([`Axis`], [`Rank`], [`Shape`])
//! - Axis metadata ([`AxisMeta`]) for symbolic axis naming
//! - [`TensorHandle`]: a dense tensor together with its axis names and a
//!   free-form metadata map, the form in which data loaders hand tensors to
//!   the decomposition engine
//!
//! # Examples
//!
//! ```
//! use tensorlib_core::{AxisMeta, DenseND, TensorHandle};
//!
//! let tensor = DenseND::<f64>::zeros(&[10, 11, 8]);
//! let handle = TensorHandle::from_dense(
//!     tensor,
//!     vec![
//!         AxisMeta::new("breads", 10),
//!         AxisMeta::new("attributes", 11),
//!         AxisMeta::new("assessors", 8),
//!     ],
//! )
//! .unwrap()
//! .with_meta("source", "sensory panel");
//!
//! assert_eq!(handle.rank(), 3);
//! assert_eq!(handle.axis_index("assessors"), Some(2));
//! assert_eq!(handle.meta("source"), Some("sensory panel"));
//! ```

use scirs2_core::numeric::Num;
use smallvec::SmallVec;
use std::collections::BTreeMap;

pub use crate::dense::DenseND;

/// Tensor axis index (zero-based).
pub type Axis = usize;

/// Tensor order (number of axes).
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Inline for tensors with up to 6 axes.
pub type Shape = SmallVec<[usize; 6]>;

/// Metadata for a single tensor axis.
///
/// ```
/// use tensorlib_core::AxisMeta;
///
/// let axis = AxisMeta::new("emission", 201);
/// assert_eq!(axis.name, "emission");
/// assert_eq!(axis.size, 201);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisMeta {
    /// Symbolic name for this axis (e.g. "samples", "channels", "time")
    pub name: String,
    /// Number of elements along this axis
    pub size: usize,
}

impl AxisMeta {
    /// Create new axis metadata.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A dense tensor plus the metadata its producer attached to it.
#[derive(Clone, Debug)]
pub struct TensorHandle<T>
where
    T: Clone + Num,
{
    /// The tensor data
    pub tensor: DenseND<T>,
    /// One entry per axis, in axis order
    pub axes: Vec<AxisMeta>,
    /// Free-form descriptive metadata (description, units, provenance)
    pub metadata: BTreeMap<String, String>,
}

impl<T> TensorHandle<T>
where
    T: Clone + Num + std::fmt::Debug,
{
    /// Wrap a tensor with explicit axis metadata.
    ///
    /// Fails if the number of axes or any axis size disagrees with the tensor.
    pub fn from_dense(tensor: DenseND<T>, axes: Vec<AxisMeta>) -> anyhow::Result<Self> {
        if tensor.rank() != axes.len() {
            anyhow::bail!(
                "Axis metadata length {} does not match tensor rank {}",
                axes.len(),
                tensor.rank()
            );
        }
        for (i, axis) in axes.iter().enumerate() {
            if axis.size != tensor.shape()[i] {
                anyhow::bail!(
                    "Axis {} ('{}') size mismatch: tensor has {}, metadata says {}",
                    i,
                    axis.name,
                    tensor.shape()[i],
                    axis.size
                );
            }
        }
        Ok(Self {
            tensor,
            axes,
            metadata: BTreeMap::new(),
        })
    }

    /// Wrap a tensor, naming its axes `axis_0`, `axis_1`, ...
    pub fn from_dense_auto(tensor: DenseND<T>) -> Self {
        let axes = tensor
            .shape()
            .iter()
            .enumerate()
            .map(|(i, &size)| AxisMeta::new(format!("axis_{}", i), size))
            .collect();
        Self {
            tensor,
            axes,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up a metadata entry.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn rank(&self) -> Rank {
        self.axes.len()
    }

    pub fn shape(&self) -> Shape {
        self.axes.iter().map(|a| a.size).collect()
    }

    /// Position of the axis with the given name.
    pub fn axis_index(&self, name: &str) -> Option<Axis> {
        self.axes.iter().position(|a| a.name == name)
    }

    /// Borrow the tensor for decomposition.
    pub fn as_dense(&self) -> &DenseND<T> {
        &self.tensor
    }

    /// Consume the handle and keep only the tensor.
    pub fn into_dense(self) -> DenseND<T> {
        self.tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dense_rank_mismatch() {
        let tensor = DenseND::<f64>::zeros(&[2, 3]);
        let result = TensorHandle::from_dense(tensor, vec![AxisMeta::new("a", 2)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_dense_size_mismatch() {
        let tensor = DenseND::<f64>::zeros(&[2, 3]);
        let result = TensorHandle::from_dense(
            tensor,
            vec![AxisMeta::new("a", 2), AxisMeta::new("b", 4)],
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("'b'"));
    }

    #[test]
    fn test_from_dense_auto_names() {
        let handle = TensorHandle::from_dense_auto(DenseND::<f64>::zeros(&[2, 3, 4]));
        assert_eq!(handle.axes[1].name, "axis_1");
        assert_eq!(&handle.shape()[..], &[2, 3, 4]);
        assert_eq!(handle.axis_index("axis_2"), Some(2));
        assert_eq!(handle.axis_index("missing"), None);
        assert_eq!(handle.into_dense().shape(), &[2, 3, 4]);
    }
}
