//! Error types for integration of tabulated functions.
//!
//! Every fallible routine returns [`Result`]. The coarse status code of a
//! failure is available through [`IntegrationError::kind`], and the
//! human-readable report through its `Display` implementation, which includes
//! any context notes attached with [`ResultExt::via`] on the way up.

use std::collections::TryReserveError;

use thiserror::Error;

/// Coarse classification of an [`IntegrationError`], independent of the
/// context notes wrapped around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadSelf,
    BadIntegrationInput,
    OtherInterpolation,
    UnsupportedInterpolation,
    BadNorm,
    DivByZero,
    MemoryAllocationFailure,
    DomainsNotMutual,
    XOutsideDomain,
    Quadrature,
    Integrand,
    Unrepresentable,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ErrorKind::BadSelf => "bad self",
            ErrorKind::BadIntegrationInput => "bad integration input",
            ErrorKind::OtherInterpolation => "other interpolation",
            ErrorKind::UnsupportedInterpolation => "unsupported interpolation",
            ErrorKind::BadNorm => "bad norm",
            ErrorKind::DivByZero => "divide by zero",
            ErrorKind::MemoryAllocationFailure => "memory allocation failure",
            ErrorKind::DomainsNotMutual => "domains not mutual",
            ErrorKind::XOutsideDomain => "x outside domain",
            ErrorKind::Quadrature => "quadrature failure",
            ErrorKind::Integrand => "integrand failure",
            ErrorKind::Unrepresentable => "unrepresentable number",
        };
        f.write_str(name)
    }
}

/// Errors raised while integrating, grouping or evaluating tabulated functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// The input function (or grid) is flagged as errored or is malformed.
    #[error("bad self: {reason}")]
    BadSelf {
        /// What is wrong with the input
        reason: String,
    },

    /// A value that must be positive for a logarithmic law is not.
    #[error(
        "0 or negative values for {axes} integration: x1 = {x1:.17e}, y1 = {y1:.17e}, x2 = {x2:.17e}, y2 = {y2:.17e}"
    )]
    BadIntegrationInput {
        /// Which axes are logarithmic, e.g. "log-y"
        axes: &'static str,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },

    /// The function uses an opaque interpolation law.
    #[error("other interpolation '{label}' not supported for integration")]
    OtherInterpolation {
        /// Label carried by the opaque law
        label: String,
    },

    /// The law is valid but not for the requested operation.
    #[error("unsupported interpolation '{label}' for {operation}")]
    UnsupportedInterpolation {
        /// Label of the offending law
        label: String,
        /// Operation that was requested
        operation: &'static str,
    },

    /// Missing or mismatched norm, or a zero total when normalizing.
    #[error("bad norm: {reason}")]
    BadNorm {
        /// Why the norm is unusable
        reason: String,
    },

    /// A per-bin norm entry is exactly zero.
    #[error("divide by 0: norm at index {index} is 0")]
    DivByZero {
        /// Bin index of the zero norm entry
        index: usize,
    },

    /// Reserving storage for an output failed.
    #[error("memory allocation failure: {0}")]
    MemoryAllocation(#[from] TryReserveError),

    /// Two functions cannot be merged because one ends with a non-zero value
    /// strictly inside the other's domain.
    #[error("domains not mutual: [{min1:e}, {max1:e}] vs [{min2:e}, {max2:e}]")]
    DomainsNotMutual {
        min1: f64,
        max1: f64,
        min2: f64,
        max2: f64,
    },

    /// A point evaluation was requested outside the bracketing segment.
    #[error("x = {x:e} outside [{min:e}, {max:e}]")]
    XOutsideDomain { x: f64, min: f64, max: f64 },

    /// Adaptive quadrature ran out of subdivisions before meeting its tolerance.
    #[error(
        "adaptive quadrature did not converge on [{a:e}, {b:e}] within {recursion_limit} subdivisions"
    )]
    QuadratureNotConverged { a: f64, b: f64, recursion_limit: usize },

    /// Requested Gauss-Legendre degree is outside the supported range.
    #[error("invalid quadrature degree {degree} (must be 1..={max})")]
    InvalidQuadratureDegree { degree: usize, max: usize },

    /// The caller-supplied integrand reported a failure.
    #[error("integrand failed at x = {x:e}: {reason}")]
    Integrand { x: f64, reason: String },

    /// A literal constant cannot be expressed in the working float type.
    #[error("value {0} is not representable in the working float type")]
    Unrepresentable(f64),

    /// Context note wrapped around a lower-level failure.
    #[error("{context}: {source}")]
    Via {
        context: &'static str,
        #[source]
        source: Box<IntegrationError>,
    },
}

/// A specialized `Result` type for integration routines.
pub type Result<T> = std::result::Result<T, IntegrationError>;

impl IntegrationError {
    /// Build an integrand failure, for use inside caller-supplied callbacks.
    pub fn integrand(x: f64, reason: impl Into<String>) -> Self {
        IntegrationError::Integrand {
            x,
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_self(reason: impl Into<String>) -> Self {
        IntegrationError::BadSelf {
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_norm(reason: impl Into<String>) -> Self {
        IntegrationError::BadNorm {
            reason: reason.into(),
        }
    }

    /// Status code of the innermost failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntegrationError::BadSelf { .. } => ErrorKind::BadSelf,
            IntegrationError::BadIntegrationInput { .. } => ErrorKind::BadIntegrationInput,
            IntegrationError::OtherInterpolation { .. } => ErrorKind::OtherInterpolation,
            IntegrationError::UnsupportedInterpolation { .. } => {
                ErrorKind::UnsupportedInterpolation
            }
            IntegrationError::BadNorm { .. } => ErrorKind::BadNorm,
            IntegrationError::DivByZero { .. } => ErrorKind::DivByZero,
            IntegrationError::MemoryAllocation(_) => ErrorKind::MemoryAllocationFailure,
            IntegrationError::DomainsNotMutual { .. } => ErrorKind::DomainsNotMutual,
            IntegrationError::XOutsideDomain { .. } => ErrorKind::XOutsideDomain,
            IntegrationError::QuadratureNotConverged { .. }
            | IntegrationError::InvalidQuadratureDegree { .. } => ErrorKind::Quadrature,
            IntegrationError::Integrand { .. } => ErrorKind::Integrand,
            IntegrationError::Unrepresentable(_) => ErrorKind::Unrepresentable,
            IntegrationError::Via { source, .. } => source.kind(),
        }
    }

    /// Innermost error, with all context notes stripped.
    pub fn root(&self) -> &IntegrationError {
        match self {
            IntegrationError::Via { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns `true` if the failure comes from the input data
    /// (bad function, non-positive log values, non-mutual domains).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::BadSelf | ErrorKind::BadIntegrationInput | ErrorKind::DomainsNotMutual
        )
    }

    /// Returns `true` if the failure concerns an interpolation law that
    /// cannot be used for the requested operation.
    pub fn is_interpolation_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::OtherInterpolation | ErrorKind::UnsupportedInterpolation
        )
    }

    /// Returns `true` if the failure concerns normalization.
    pub fn is_norm_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::BadNorm | ErrorKind::DivByZero)
    }
}

/// Attach a context note to the error of a `Result`.
pub trait ResultExt<T> {
    fn via(self, context: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[inline]
    fn via(self, context: &'static str) -> Result<T> {
        self.map_err(|source| IntegrationError::Via {
            context,
            source: Box::new(source),
        })
    }
}
