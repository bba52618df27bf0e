//! Error types for tensor kernel operations

use std::fmt;

/// Error type for tensor kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Dimension mismatch between operands
    DimensionMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: String,
    },

    /// Axis index outside the tensor
    InvalidAxis {
        axis: isize,
        ndim: usize,
        context: String,
    },

    /// Empty input not allowed
    EmptyInput {
        operation: String,
        parameter: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::DimensionMismatch {
                operation,
                expected,
                actual,
                context,
            } => write!(
                f,
                "{}: dimension mismatch - expected {:?}, got {:?}. {}",
                operation, expected, actual, context
            ),

            KernelError::InvalidAxis { axis, ndim, context } => write!(
                f,
                "Invalid axis {} for tensor with {} axes. {}",
                axis, ndim, context
            ),

            KernelError::EmptyInput {
                operation,
                parameter,
            } => write!(
                f,
                "{}: empty input not allowed for parameter '{}'",
                operation, parameter
            ),
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: impl Into<String>,
    ) -> Self {
        KernelError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create an invalid axis error
    pub fn invalid_axis(axis: isize, ndim: usize, context: impl Into<String>) -> Self {
        KernelError::InvalidAxis {
            axis,
            ndim,
            context: context.into(),
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// True for errors caused by operand shapes rather than arguments.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, KernelError::DimensionMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = KernelError::dimension_mismatch(
            "khatri_rao",
            vec![10, 5],
            vec![10, 3],
            "Number of columns must match",
        );

        let msg = format!("{}", err);
        assert!(msg.contains("khatri_rao"));
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("[10, 5]"));
        assert!(msg.contains("[10, 3]"));
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_invalid_axis_display() {
        let err = KernelError::invalid_axis(-4, 3, "tmult");

        let msg = format!("{}", err);
        assert!(msg.contains("Invalid axis -4"));
        assert!(msg.contains("3 axes"));
        assert!(!err.is_shape_error());
    }

    #[test]
    fn test_empty_input_display() {
        let err = KernelError::empty_input("khatri_rao_chain", "factors");

        let msg = format!("{}", err);
        assert!(msg.contains("khatri_rao_chain"));
        assert!(msg.contains("'factors'"));
    }
}
