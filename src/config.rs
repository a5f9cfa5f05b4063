//! Tunable settings for adaptive quadrature and for domain mutualification.
//!
//! Both structs are plain data with sensible defaults; adjust them with the
//! `with_*` builders and check them with `validate()` before use.
//!
//! ```rust
//! use tabint::config::QuadratureSettings;
//!
//! let settings = QuadratureSettings::default()
//!     .with_degree(8)
//!     .with_tolerance(1e-12);
//! assert!(settings.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IntegrationError, Result};
use crate::quadrature::MAX_DEGREE;

/// Settings for [`crate::PointwiseXY::integrate_with_function`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadratureSettings {
    /// Number of Gauss-Legendre nodes per panel
    pub degree: usize,
    /// Maximum bisection depth of one breakpoint segment
    pub recursion_limit: usize,
    /// Relative tolerance between a panel and its two halves
    pub tolerance: f64,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            degree: 10,
            recursion_limit: 12,
            tolerance: 1e-10,
        }
    }
}

impl QuadratureSettings {
    pub fn new(degree: usize, recursion_limit: usize, tolerance: f64) -> Result<Self> {
        let settings = Self {
            degree,
            recursion_limit,
            tolerance,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    pub fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.degree == 0 || self.degree > MAX_DEGREE {
            return Err(IntegrationError::InvalidQuadratureDegree {
                degree: self.degree,
                max: MAX_DEGREE,
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(IntegrationError::bad_self(format!(
                "quadrature tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Settings for [`crate::pointwise::tweak_domains_to_mutualify`].
///
/// When one function ends with a non-zero value strictly inside the other's
/// domain, a zero-valued point is added just outside that end. It is placed
/// `max(epsilon_factor·ε·|x|, epsilon)` away from the end `x`, where `ε` is
/// the machine epsilon of the working float type, and never beyond the other
/// function's domain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MutualifySettings {
    pub epsilon_factor: f64,
    pub epsilon: f64,
    /// Never move a positive lower end to zero or below
    pub positive_x_only: bool,
}

impl Default for MutualifySettings {
    fn default() -> Self {
        Self {
            epsilon_factor: 4.0,
            epsilon: 0.0,
            positive_x_only: false,
        }
    }
}

impl MutualifySettings {
    pub fn with_epsilon_factor(mut self, epsilon_factor: f64) -> Self {
        self.epsilon_factor = epsilon_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_positive_x_only(mut self, positive_x_only: bool) -> Self {
        self.positive_x_only = positive_x_only;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.epsilon_factor) || !ok(self.epsilon) {
            return Err(IntegrationError::bad_self(format!(
                "mutualify offsets must be finite and non-negative, got factor {} and epsilon {}",
                self.epsilon_factor, self.epsilon
            )));
        }
        if self.epsilon_factor == 0.0 && self.epsilon == 0.0 {
            return Err(IntegrationError::bad_self(
                "mutualify needs a non-zero epsilon_factor or epsilon",
            ));
        }
        Ok(())
    }
}
