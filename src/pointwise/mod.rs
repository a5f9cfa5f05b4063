//! Tabulated functions: an ordered list of `(x, y)` breakpoints joined by one
//! interpolation law.
//!
//! The breakpoint list is kept coalesced at all times (strictly increasing,
//! finite `x`), so the integration routines only ever need `&self`.

pub mod setops;

pub use setops::{are_domains_mutual, tweak_domains_to_mutualify};

use core::cmp::Ordering;

use itertools::Itertools;
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IntegrationError, Result};
use crate::interpolation::{Interpolation, Segment};
use crate::report;

/// One breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Piecewise function of one variable.
///
/// Construction sorts the breakpoints by `x`; for duplicated `x` the last
/// supplied point wins. A non-finite `x` is rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PointwiseXY<T> {
    points: Vec<Point<T>>,
    interpolation: Interpolation,
    error: Option<String>,
}

impl<T: Float> PointwiseXY<T> {
    /// Build a function from `(x, y)` pairs in any order.
    pub fn new<P>(points: impl IntoIterator<Item = P>, interpolation: Interpolation) -> Result<Self>
    where
        P: Into<Point<T>>,
    {
        let mut points: Vec<Point<T>> = points.into_iter().map(Into::into).collect();
        if let Some(p) = points.iter().find(|p| !p.x.is_finite()) {
            return Err(IntegrationError::bad_self(format!(
                "non-finite x = {} in breakpoints",
                report(p.x)
            )));
        }

        // Stable sort keeps the supply order among equal x
        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        let points = points
            .into_iter()
            .coalesce(|a, b| if a.x == b.x { Ok(b) } else { Err((a, b)) })
            .collect();

        Ok(Self {
            points,
            interpolation,
            error: None,
        })
    }

    /// Build a function from separate `x` and `y` slices of equal length.
    pub fn from_xy(x: &[T], y: &[T], interpolation: Interpolation) -> Result<Self> {
        if x.len() != y.len() {
            return Err(IntegrationError::bad_self(format!(
                "x and y lengths differ: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        Self::new(x.iter().copied().zip(y.iter().copied()), interpolation)
    }

    /// A function with no breakpoints.
    pub fn empty(interpolation: Interpolation) -> Self {
        Self {
            points: Vec::new(),
            interpolation,
            error: None,
        }
    }

    /// Mark the function as unusable. Every integration entry point then
    /// fails with [`IntegrationError::BadSelf`].
    pub fn flag_error(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
    }

    /// Reason given to [`PointwiseXY::flag_error`], if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fail if the function has been flagged as errored.
    #[inline]
    pub fn check(&self) -> Result<()> {
        match &self.error {
            Some(reason) => Err(IntegrationError::bad_self(reason.clone())),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }

    #[inline]
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest breakpoint, or `None` for fewer than 2 points.
    #[inline]
    pub fn domain_min(&self) -> Option<T> {
        self.domain().map(|(lo, _)| lo)
    }

    /// Highest breakpoint, or `None` for fewer than 2 points.
    #[inline]
    pub fn domain_max(&self) -> Option<T> {
        self.domain().map(|(_, hi)| hi)
    }

    /// `(x_first, x_last)`, or `None` for fewer than 2 points.
    pub fn domain(&self) -> Option<(T, T)> {
        match self.points.as_slice() {
            [first, .., last] => Some((first.x, last.x)),
            _ => None,
        }
    }

    /// Set `y` at `x`, replacing an existing breakpoint or inserting a new one.
    pub fn set_value(&mut self, x: T, y: T) -> Result<()> {
        if !x.is_finite() {
            return Err(IntegrationError::bad_self(format!(
                "non-finite x = {} in set_value",
                report(x)
            )));
        }
        let i = self.points.partition_point(|p| p.x < x);
        match self.points.get_mut(i) {
            Some(p) if p.x == x => p.y = y,
            _ => {
                self.points.try_reserve(1)?;
                self.points.insert(i, Point { x, y });
            }
        }
        Ok(())
    }

    /// Segment between breakpoints `i` and `i + 1`.
    #[inline]
    pub(crate) fn segment(&self, i: usize) -> Segment<T> {
        let (a, b) = (self.points[i], self.points[i + 1]);
        Segment::new(a.x, a.y, b.x, b.y)
    }

    /// All consecutive segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment<T>> + '_ {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| Segment::new(a.x, a.y, b.x, b.y))
    }

    /// Interpolated value at `x`, which must lie in the domain.
    pub(crate) fn value_at(&self, x: T) -> Result<T> {
        let (lo, hi) = self.domain().ok_or_else(|| {
            IntegrationError::bad_self("point evaluation needs at least 2 points")
        })?;
        if !(x >= lo && x <= hi) {
            return Err(IntegrationError::XOutsideDomain {
                x: report(x),
                min: report(lo),
                max: report(hi),
            });
        }
        // First breakpoint strictly above x, kept inside the last segment
        let k = self
            .points
            .partition_point(|p| p.x <= x)
            .clamp(1, self.points.len() - 1);
        self.interpolation.interpolate(x, &self.segment(k - 1))
    }

    /// Value of the function at `x`, or `None` outside its domain.
    ///
    /// At an interior breakpoint the value of the breakpoint itself is
    /// returned, which for [`Interpolation::Flat`] is the right-continuous value.
    pub fn evaluate(&self, x: T) -> Result<Option<T>> {
        self.check()?;
        match self.domain() {
            Some((lo, hi)) if x >= lo && x <= hi => self.value_at(x).map(Some),
            _ => Ok(None),
        }
    }

    /// Evaluate at every `x` into `out`, writing 0 outside the domain.
    pub fn evaluate_many(&self, x: &[T], out: &mut [T]) -> Result<()> {
        if x.len() != out.len() {
            return Err(IntegrationError::bad_self(format!(
                "dimension mismatch: {} locations but output has length {}",
                x.len(),
                out.len()
            )));
        }
        for (xi, yi) in x.iter().zip(out.iter_mut()) {
            *yi = self.evaluate(*xi)?.unwrap_or_else(T::zero);
        }
        Ok(())
    }

    /// Divide every `y` in place.
    pub(crate) fn divide_values(&mut self, divisor: T) {
        self.points.iter_mut().for_each(|p| p.y = p.y / divisor);
    }
}

/// Check that `grid` is a usable set of bin boundaries: finite, strictly
/// increasing, and at least one bin long.
pub fn validate_grid<T: Float>(grid: &[T]) -> Result<()> {
    if grid.len() < 2 {
        return Err(IntegrationError::bad_self(format!(
            "group boundaries need at least 2 values, got {}",
            grid.len()
        )));
    }
    if grid.iter().any(|g| !g.is_finite()) {
        return Err(IntegrationError::bad_self("non-finite group boundary"));
    }
    if let Some((i, _)) = grid
        .iter()
        .tuple_windows()
        .find_position(|(a, b)| a >= b)
    {
        return Err(IntegrationError::bad_self(format!(
            "group boundaries must be strictly increasing (index {i})"
        )));
    }
    Ok(())
}
