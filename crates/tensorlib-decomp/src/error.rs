//! Error type shared by every decomposition entry point.

use scirs2_linalg::LinalgError;
use tensorlib_kernels::KernelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecompError {
    /// A caller-supplied parameter is missing or out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The tensor or an intermediate matrix has the wrong shape
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Failure inside the linear-algebra backend, passed through unchanged
    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
}

pub type DecompResult<T> = Result<T, DecompError>;

impl DecompError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DecompError::InvalidParameter(message.into())
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        DecompError::ShapeMismatch(message.into())
    }

    /// True for [`DecompError::ShapeMismatch`] and kernel shape errors.
    pub fn is_shape_error(&self) -> bool {
        match self {
            DecompError::ShapeMismatch(_) => true,
            DecompError::Kernel(e) => e.is_shape_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = DecompError::invalid("rank is required");
        assert_eq!(err.to_string(), "Invalid parameter: rank is required");

        let err = DecompError::shape("need 3 axes");
        assert!(err.to_string().starts_with("Shape mismatch"));
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_kernel_error_conversion() {
        let kernel = KernelError::dimension_mismatch("khatri_rao", vec![2], vec![3], "");
        let err: DecompError = kernel.into();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("khatri_rao"));
    }
}
