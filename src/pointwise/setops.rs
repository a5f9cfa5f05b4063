//! Set operations on breakpoint lists used by group integration:
//! clipping to a grid, union with zero fill, and domain mutualification.

use core::iter::once;

use itertools::Itertools;
use log::trace;
use num_traits::Float;

use super::{validate_grid, Point, PointwiseXY};
use crate::config::MutualifySettings;
use crate::error::{IntegrationError, Result};
use crate::report;

impl<T: Float> PointwiseXY<T> {
    /// Restrict the function to the span of `grid`, adding a breakpoint at
    /// every grid value inside the overlap.
    ///
    /// Returns an empty function when the overlap has zero width.
    pub fn intersection_with_grid(&self, grid: &[T]) -> Result<PointwiseXY<T>> {
        self.check()?;
        validate_grid(grid)?;

        let (x_first, x_last) = match self.domain() {
            Some(d) => d,
            None => return Ok(PointwiseXY::empty(self.interpolation.clone())),
        };
        let lo = x_first.max(grid[0]);
        let hi = x_last.min(grid[grid.len() - 1]);
        if lo >= hi {
            return Ok(PointwiseXY::empty(self.interpolation.clone()));
        }

        let inside = |x: &T| *x > lo && *x < hi;
        let own = self.points.iter().map(|p| p.x).filter(inside);
        let bins = grid.iter().copied().filter(inside);
        let xs = once(lo).chain(own.merge(bins)).chain(once(hi)).dedup();

        let mut points = Vec::new();
        points.try_reserve_exact(self.len() + grid.len())?;
        for x in xs {
            points.push(Point::new(x, self.value_at(x)?));
        }

        Ok(PointwiseXY {
            points,
            interpolation: self.interpolation.clone(),
            error: None,
        })
    }

    /// Union of both breakpoint sets, carrying this function's values.
    ///
    /// Locations outside this function's domain are filled with 0. The result
    /// keeps this function's interpolation law. Fails with
    /// [`IntegrationError::DomainsNotMutual`] when the two domains could not
    /// be merged without introducing a jump.
    pub fn union_with(&self, other: &PointwiseXY<T>) -> Result<PointwiseXY<T>> {
        self.check()?;
        other.check()?;
        if !are_domains_mutual(self, other) {
            return Err(domains_not_mutual(self, other));
        }

        let domain = self.domain();
        let xs = self
            .points
            .iter()
            .map(|p| p.x)
            .merge(other.points.iter().map(|p| p.x))
            .dedup();

        let mut points = Vec::new();
        points.try_reserve_exact(self.len() + other.len())?;
        for x in xs {
            let y = match domain {
                Some((lo, hi)) if x >= lo && x <= hi => self.value_at(x)?,
                _ => T::zero(),
            };
            points.push(Point::new(x, y));
        }

        Ok(PointwiseXY {
            points,
            interpolation: self.interpolation.clone(),
            error: None,
        })
    }
}

fn domains_not_mutual<T: Float>(f: &PointwiseXY<T>, g: &PointwiseXY<T>) -> IntegrationError {
    let (min1, max1) = f.domain().unwrap_or((T::nan(), T::nan()));
    let (min2, max2) = g.domain().unwrap_or((T::nan(), T::nan()));
    IntegrationError::DomainsNotMutual {
        min1: report(min1),
        max1: report(max1),
        min2: report(min2),
        max2: report(max2),
    }
}

/// Whether `f` and `g` can be merged without a jump: at each end, the
/// function whose domain ends strictly inside the other's must be 0 there.
///
/// Functions with fewer than 2 points are mutual with anything.
pub fn are_domains_mutual<T: Float>(f: &PointwiseXY<T>, g: &PointwiseXY<T>) -> bool {
    let (fp, gp) = (f.points(), g.points());
    if fp.len() < 2 || gp.len() < 2 {
        return true;
    }
    let (f_lo, f_hi) = (fp[0], fp[fp.len() - 1]);
    let (g_lo, g_hi) = (gp[0], gp[gp.len() - 1]);

    let lower_ok = if f_lo.x < g_lo.x {
        g_lo.y == T::zero()
    } else if g_lo.x < f_lo.x {
        f_lo.y == T::zero()
    } else {
        true
    };
    let upper_ok = if f_hi.x > g_hi.x {
        g_hi.y == T::zero()
    } else if g_hi.x > f_hi.x {
        f_hi.y == T::zero()
    } else {
        true
    };
    lower_ok && upper_ok
}

/// Make `f` and `g` mutual by adding a zero-valued point just outside the
/// end of whichever function stops with a non-zero value inside the other.
pub fn tweak_domains_to_mutualify<T: Float>(
    f: &mut PointwiseXY<T>,
    g: &mut PointwiseXY<T>,
    settings: &MutualifySettings,
) -> Result<()> {
    settings.validate()?;
    f.check()?;
    g.check()?;
    let ((f_lo, f_hi), (g_lo, g_hi)) = match (f.domain(), g.domain()) {
        (Some(fd), Some(gd)) => (fd, gd),
        _ => return Ok(()),
    };
    let f_first = f.points[0].y;
    let f_last = f.points[f.len() - 1].y;
    let g_first = g.points[0].y;
    let g_last = g.points[g.len() - 1].y;

    if f_lo < g_lo && g_first != T::zero() {
        let x = lower_offset(g_lo, f_lo, settings)?;
        trace!("mutualify: zero point at {:e} below lower end {:e}", report(x), report(g_lo));
        g.set_value(x, T::zero())?;
    } else if g_lo < f_lo && f_first != T::zero() {
        let x = lower_offset(f_lo, g_lo, settings)?;
        trace!("mutualify: zero point at {:e} below lower end {:e}", report(x), report(f_lo));
        f.set_value(x, T::zero())?;
    }

    if f_hi > g_hi && g_last != T::zero() {
        let x = upper_offset(g_hi, f_hi, settings)?;
        trace!("mutualify: zero point at {:e} above upper end {:e}", report(x), report(g_hi));
        g.set_value(x, T::zero())?;
    } else if g_hi > f_hi && f_last != T::zero() {
        let x = upper_offset(f_hi, g_hi, settings)?;
        trace!("mutualify: zero point at {:e} above upper end {:e}", report(x), report(f_hi));
        f.set_value(x, T::zero())?;
    }

    Ok(())
}

/// Step away from `edge`, scaled by the larger magnitude of the two ends so a
/// zero or subnormal edge still moves by a few ulps.
fn offset<T: Float>(edge: T, outer: T, settings: &MutualifySettings) -> Result<T> {
    let factor: T = crate::cast(settings.epsilon_factor)?;
    let epsilon: T = crate::cast(settings.epsilon)?;
    let scale = edge.abs().max(outer.abs()).max(T::min_positive_value());
    Ok((factor * T::epsilon() * scale).max(epsilon))
}

/// New lower end for a function starting at `edge`, not below `outer`.
fn lower_offset<T: Float>(edge: T, outer: T, settings: &MutualifySettings) -> Result<T> {
    let mut x = edge - offset(edge, outer, settings)?;
    if settings.positive_x_only && edge > T::zero() && x <= T::zero() {
        x = edge / (T::one() + T::one());
    }
    Ok(x.max(outer))
}

/// New upper end for a function ending at `edge`, not above `outer`.
fn upper_offset<T: Float>(edge: T, outer: T, settings: &MutualifySettings) -> Result<T> {
    let x = edge + offset(edge, outer, settings)?;
    Ok(x.min(outer))
}
