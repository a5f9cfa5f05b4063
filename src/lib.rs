//! Integration of tabulated piecewise functions, prioritizing exact closed
//! forms and numerically stable evaluation near degenerate segments.
//!
//! A [`PointwiseXY`] is an ordered list of `(x, y)` breakpoints joined by one
//! [`Interpolation`] law. Every law has a closed-form integral per segment, so
//! all operations below are exact up to rounding, except the adaptive
//! quadrature of an interpolant times an arbitrary callback.
//!
//! | Law       | Interpolant between breakpoints     | `∫ f` | `∫ f·x` | `∫ f·√x` |
//! |-----------|-------------------------------------|-------|---------|----------|
//! | `lin-lin` | linear                              | ✓     | ✓       | ✓        |
//! | `log-lin` | exponential in `x`                  | ✓     | ✓       |          |
//! | `lin-log` | linear in `ln x`                    | ✓     |         |          |
//! | `log-log` | power law                           | ✓     |         |          |
//! | `flat`    | step, holding the left value        | ✓     | ✓       | ✓        |
//!
//! Log-based laws require positive values on the relevant axis; segments
//! whose endpoints are nearly equal switch to series expansions instead of
//! dividing by a vanishing logarithm.
//!
//! # Example: Sub-domain Integrals and Normalization
//! ```rust
//! use tabint::{Interpolation, PointwiseXY};
//!
//! let mut f: PointwiseXY<f64> = PointwiseXY::new(
//!     [(2.0, 2.0), (4.0, 4.0), (6.0, 2.0), (8.0, 6.0)],
//!     Interpolation::LinLin,
//! )?;
//!
//! assert_eq!(f.integrate(2.0, 8.0)?, 20.0);
//! assert_eq!(f.integrate(3.0, 8.0)?, 17.5);
//! assert_eq!(f.integrate(8.0, 3.0)?, -17.5);
//! assert_eq!(f.running_integral()?, vec![0.0, 6.0, 12.0, 20.0]);
//!
//! f.normalize()?;
//! assert!((f.integrate_domain()? - 1.0).abs() < 1e-14);
//! # Ok::<(), tabint::IntegrationError>(())
//! ```
//!
//! # Example: Group Averages
//! ```rust
//! use tabint::{group_two_functions, GroupNorm, Interpolation, PointwiseXY};
//! use tabint::utils::geomspace;
//!
//! // Cross section and flux on a log-spaced energy grid
//! let sigma = PointwiseXY::new([(1e-5, 10.0), (1e7, 1.0)], Interpolation::LogLog)?;
//! let flux = PointwiseXY::new([(1e-5, 1.0), (1e7, 1.0)], Interpolation::LinLin)?;
//! let bounds = geomspace(1e-5, 1e7, 13)?;
//!
//! let groups = group_two_functions(&sigma, &flux, &bounds, GroupNorm::Dx)?;
//! assert_eq!(groups.len(), 12);
//! # Ok::<(), tabint::IntegrationError>(())
//! ```
//!
//! # Example: Interpolant Times a Callback
//! ```rust
//! use tabint::{Interpolation, PointwiseXY, QuadratureSettings};
//!
//! let f = PointwiseXY::new([(0.0, 0.0), (1.0, 1.0)], Interpolation::LinLin)?;
//! let settings = QuadratureSettings::default().with_tolerance(1e-12);
//! let q = f.integrate_with_function_counted(|x: f64| Ok(x.exp()), 0.0, 1.0, &settings)?;
//!
//! // ∫ x·e^x over [0, 1]
//! assert!((q.value - 1.0).abs() < 1e-10);
//! assert!(q.evaluations > 0);
//! # Ok::<(), tabint::IntegrationError>(())
//! ```
//!
//! # Logging
//! Diagnostics go through the [`log`] facade: `debug!` summaries of
//! normalization, grouping and quadrature runs, `trace!` for adaptive
//! bisections and domain tweaks, `warn!` on quadrature non-convergence.
// These "needless" range loops index several parallel arrays at once
#![allow(clippy::needless_range_loop)]

pub mod config;
pub use config::{MutualifySettings, QuadratureSettings};

pub mod error;
pub use error::{ErrorKind, IntegrationError, Result, ResultExt};

pub mod interpolation;
pub use interpolation::{Interpolation, Law, Segment, Weight};

pub mod pointwise;
pub use pointwise::{are_domains_mutual, tweak_domains_to_mutualify, Point, PointwiseXY};

pub mod integrate;
pub use integrate::{group_one_function, group_three_functions, group_two_functions, GroupNorm};

pub mod quadrature;
pub use quadrature::{adaptive_quadrature, GaussLegendre, Quadrature};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

use num_traits::Float;

/// Convert a literal constant into the working float type
#[inline]
pub(crate) fn cast<T: Float>(v: f64) -> Result<T> {
    T::from(v).ok_or(IntegrationError::Unrepresentable(v))
}

/// Widen a working value to `f64` for error reports and log lines
#[inline]
pub(crate) fn report<T: Float>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}
