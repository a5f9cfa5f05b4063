//! Adaptive Gauss-Legendre quadrature of a fallible integrand.
//!
//! Each panel is integrated with a fixed [`GaussLegendre`] rule and compared
//! with the sum over its two halves. Panels that disagree by more than the
//! tolerance are bisected again, up to a fixed depth.

pub mod gauss_legendre;

pub use gauss_legendre::{GaussLegendre, MAX_DEGREE};

use log::{debug, trace, warn};
use num_traits::Float;

use crate::error::{IntegrationError, Result};
use crate::report;

/// Result of an adaptive quadrature run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature<T> {
    /// Estimate of the integral
    pub value: T,
    /// Number of integrand evaluations performed
    pub evaluations: usize,
}

struct Adaptive<'a, T, F> {
    f: F,
    rule: &'a GaussLegendre<T>,
    recursion_limit: usize,
    tolerance: T,
    /// Absolute error allowed per unit width
    abs_density: T,
    evaluations: usize,
}

impl<T, F> Adaptive<'_, T, F>
where
    T: Float,
    F: FnMut(T) -> Result<T>,
{
    fn panel(&mut self, a: T, b: T) -> Result<(T, T)> {
        self.evaluations += self.rule.degree();
        self.rule.apply(&mut self.f, a, b)
    }

    fn refine(&mut self, a: T, b: T, coarse: T, depth: usize) -> Result<T> {
        let mid = (a + b) / (T::one() + T::one());
        let (left, _) = self.panel(a, mid)?;
        let (right, _) = self.panel(mid, b)?;
        let fine = left + right;

        let diff = (fine - coarse).abs();
        if diff <= self.tolerance * fine.abs() || diff <= self.abs_density * (b - a).abs() {
            return Ok(fine);
        }
        if depth >= self.recursion_limit {
            warn!(
                "adaptive quadrature not converged on [{:e}, {:e}] after {} bisections",
                report(a),
                report(b),
                depth
            );
            return Err(IntegrationError::QuadratureNotConverged {
                a: report(a),
                b: report(b),
                recursion_limit: self.recursion_limit,
            });
        }

        trace!(
            "bisecting [{:e}, {:e}] at depth {}, |fine - coarse| = {:e}",
            report(a),
            report(b),
            depth + 1,
            report(diff)
        );
        let left = self.refine(a, mid, left, depth + 1)?;
        let right = self.refine(mid, b, right, depth + 1)?;
        Ok(left + right)
    }
}

/// Integrate `f` over `[a, b]` by adaptive bisection.
///
/// A panel is accepted when its estimate and the sum over its halves agree
/// within `tolerance` relative to the panel estimate, or within `tolerance`
/// times the share of `∫|f|` proportional to the panel's width. More than
/// `recursion_limit` nested bisections fail with
/// [`IntegrationError::QuadratureNotConverged`]. The first error returned
/// by `f` is propagated unchanged.
pub fn adaptive_quadrature<T, F>(
    f: F,
    a: T,
    b: T,
    rule: &GaussLegendre<T>,
    recursion_limit: usize,
    tolerance: T,
) -> Result<Quadrature<T>>
where
    T: Float,
    F: FnMut(T) -> Result<T>,
{
    if a == b {
        return Ok(Quadrature {
            value: T::zero(),
            evaluations: 0,
        });
    }

    let mut state = Adaptive {
        f,
        rule,
        recursion_limit,
        tolerance,
        abs_density: T::zero(),
        evaluations: 0,
    };
    let (coarse, coarse_abs) = state.panel(a, b)?;
    state.abs_density = tolerance * coarse_abs / (b - a).abs();
    let value = state.refine(a, b, coarse, 0)?;

    debug!(
        "adaptive quadrature on [{:e}, {:e}]: {:e} with {} evaluations",
        report(a),
        report(b),
        report(value),
        state.evaluations
    );
    Ok(Quadrature {
        value,
        evaluations: state.evaluations,
    })
}
