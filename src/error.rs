//! Error types for element, path and encoding operations

use thiserror::Error;

/// Errors raised by the library
///
/// Every failure is an argument problem detected before any side effect,
/// so there is a single kind carrying the operation that rejected it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SvgError {
    #[error("invalid argument to {method}: {reason}")]
    InvalidArgument { method: &'static str, reason: String },
}

impl SvgError {
    /// Create an invalid argument error for `method`
    pub fn invalid(method: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            method,
            reason: reason.into(),
        }
    }

    /// Name of the operation that rejected its arguments
    pub fn method(&self) -> &'static str {
        match self {
            SvgError::InvalidArgument { method, .. } => method,
        }
    }
}

pub type Result<T> = std::result::Result<T, SvgError>;

/// Reject NaN and infinities, reporting the offending argument
pub(crate) fn ensure_finite(method: &'static str, name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SvgError::invalid(
            method,
            format!("{} must be a finite number, got {}", name, value),
        ))
    }
}
