//! Definite integrals over a sub-domain, and normalization to unit area.

use log::debug;
use num_traits::Float;

use super::ordered;
use crate::error::{IntegrationError, Result, ResultExt};
use crate::interpolation::Segment;
use crate::pointwise::PointwiseXY;
use crate::report;

impl<T: Float> PointwiseXY<T> {
    /// Sum `segment_integral` over every segment clipped to `[lo, hi]`.
    ///
    /// Clipped ends are interpolated on the unclipped segment, so a partial
    /// segment carries exactly the interpolant's values. Ranges that do not
    /// overlap the domain contribute nothing.
    pub(crate) fn sum_clipped<F>(&self, lo: T, hi: T, mut segment_integral: F) -> Result<T>
    where
        F: FnMut(&Segment<T>) -> Result<T>,
    {
        let mut sum = T::zero();
        let (x_first, x_last) = match self.domain() {
            Some(d) => d,
            None => return Ok(sum),
        };
        if !(hi > x_first && lo < x_last && hi > lo) {
            return Ok(sum);
        }

        // Segment holding `lo`, or the first one
        let start = self.points().partition_point(|p| p.x <= lo).saturating_sub(1);
        for i in start..self.len() - 1 {
            let seg = self.segment(i);
            if seg.x1 >= hi {
                break;
            }
            let mut clipped = seg;
            if seg.x1 < lo {
                clipped = clipped.with_left(lo, self.interpolation().interpolate(lo, &seg)?);
            }
            if seg.x2 > hi {
                clipped = clipped.with_right(hi, self.interpolation().interpolate(hi, &seg)?);
            }
            sum = sum + segment_integral(&clipped)?;
        }
        Ok(sum)
    }

    /// `∫ f(x) dx` over `[domain_min, domain_max]`.
    ///
    /// Reversed bounds give the negated integral. The parts of the range
    /// outside the function's domain contribute 0, as does a function with
    /// fewer than 2 points.
    ///
    /// ```rust
    /// use tabint::{Interpolation, PointwiseXY};
    ///
    /// let f = PointwiseXY::new(
    ///     [(2.0, 2.0), (4.0, 4.0), (6.0, 2.0), (8.0, 6.0)],
    ///     Interpolation::LinLin,
    /// )?;
    /// assert_eq!(f.integrate(3.0, 7.0)?, 12.5);
    /// assert_eq!(f.integrate(7.0, 3.0)?, -12.5);
    /// # Ok::<(), tabint::IntegrationError>(())
    /// ```
    pub fn integrate(&self, domain_min: T, domain_max: T) -> Result<T> {
        let (lo, hi, sign) = ordered(domain_min, domain_max);
        self.check()?;
        self.interpolation().ensure_integrable()?;
        if self.len() < 2 {
            return Ok(T::zero());
        }

        let sum = self.sum_clipped(lo, hi, |seg| self.interpolation().integrate_segment(seg))?;
        Ok(sign * sum)
    }

    /// `∫ f(x) dx` over the whole domain.
    pub fn integrate_domain(&self) -> Result<T> {
        self.check()?;
        self.interpolation().ensure_integrable()?;
        match self.domain() {
            Some((lo, hi)) => self.integrate(lo, hi),
            None => Ok(T::zero()),
        }
    }

    /// Rescale in place so that [`PointwiseXY::integrate_domain`] is 1.
    ///
    /// Fails with [`IntegrationError::BadNorm`] when the integral is exactly
    /// zero; the function is left untouched on every error path.
    pub fn normalize(&mut self) -> Result<()> {
        let sum = self.integrate_domain().via("normalize")?;
        if sum == T::zero() {
            return Err(IntegrationError::bad_norm("cannot normalize curve with 0 norm"));
        }
        debug!(
            "normalizing {} points of a {} function by {:e}",
            self.len(),
            self.interpolation(),
            report(sum)
        );
        self.divide_values(sum);
        Ok(())
    }
}
