//! Interpolation laws between two consecutive breakpoints.
//!
//! The closed set of laws is represented by [`Interpolation`]. Each concrete
//! law is a zero-sized type implementing [`Law`], which bundles the three
//! per-segment capabilities used by the integrators:
//!
//! * closed-form segment integral ([`segment`])
//! * point evaluation inside the segment ([`point`])
//! * weighted segment integrals, where the law supports them ([`weighted`])
//!
//! Dispatch from [`Interpolation`] to a [`Law`] happens in exactly one place,
//! which is also the only place the opaque [`Interpolation::Other`] law is
//! rejected.

pub mod point;
pub mod segment;
pub mod weighted;

use core::fmt;

use num_traits::Float;

use crate::error::{IntegrationError, Result};

/// Two consecutive breakpoints `(x1, y1)` and `(x2, y2)` with `x1 <= x2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<T> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Float> Segment<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn width(&self) -> T {
        self.x2 - self.x1
    }

    /// Same segment with the left point moved to `(x, y)`.
    #[inline]
    pub(crate) fn with_left(&self, x: T, y: T) -> Self {
        Self {
            x1: x,
            y1: y,
            ..*self
        }
    }

    /// Same segment with the right point moved to `(x, y)`.
    #[inline]
    pub(crate) fn with_right(&self, x: T, y: T) -> Self {
        Self {
            x2: x,
            y2: y,
            ..*self
        }
    }
}

/// Weight applied to the interpolant in weighted integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    /// `∫ f(x)·x dx`
    X,
    /// `∫ f(x)·√x dx`
    SqrtX,
}

impl Weight {
    pub(crate) fn operation(self) -> &'static str {
        match self {
            Weight::X => "x-weighted integration",
            Weight::SqrtX => "sqrt(x)-weighted integration",
        }
    }
}

/// Per-segment capabilities of one interpolation law.
pub trait Law<T: Float> {
    /// Label used in reports, e.g. `"lin-lin"`.
    fn label(&self) -> &'static str;

    /// Exact integral of the interpolant over the segment.
    fn integrate(&self, seg: &Segment<T>) -> Result<T>;

    /// Interpolated value at `x`, which must lie inside the segment.
    fn interpolate(&self, x: T, seg: &Segment<T>) -> Result<T>;

    /// Whether [`Law::integrate_weighted`] is defined for `weight`.
    fn supports(&self, _weight: Weight) -> bool {
        false
    }

    /// Exact integral of the interpolant times `weight` over the segment.
    fn integrate_weighted(&self, weight: Weight, _seg: &Segment<T>) -> Result<T> {
        Err(IntegrationError::UnsupportedInterpolation {
            label: self.label().to_owned(),
            operation: weight.operation(),
        })
    }
}

/// x linear, y linear
#[derive(Debug, Clone, Copy, Default)]
pub struct LinLin;

/// x linear, y logarithmic
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLin;

/// x logarithmic, y linear
#[derive(Debug, Clone, Copy, Default)]
pub struct LinLog;

/// x logarithmic, y logarithmic
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLog;

/// Step function holding the left value
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat;

impl<T: Float> Law<T> for LinLin {
    fn label(&self) -> &'static str {
        "lin-lin"
    }

    #[inline]
    fn integrate(&self, seg: &Segment<T>) -> Result<T> {
        segment::lin_lin(seg)
    }

    #[inline]
    fn interpolate(&self, x: T, seg: &Segment<T>) -> Result<T> {
        point::lin_lin(x, seg)
    }

    fn supports(&self, _weight: Weight) -> bool {
        true
    }

    fn integrate_weighted(&self, weight: Weight, seg: &Segment<T>) -> Result<T> {
        match weight {
            Weight::X => weighted::lin_lin_x(seg),
            Weight::SqrtX => weighted::lin_lin_sqrt_x(seg),
        }
    }
}

impl<T: Float> Law<T> for LogLin {
    fn label(&self) -> &'static str {
        "log-lin"
    }

    #[inline]
    fn integrate(&self, seg: &Segment<T>) -> Result<T> {
        segment::log_lin(seg)
    }

    #[inline]
    fn interpolate(&self, x: T, seg: &Segment<T>) -> Result<T> {
        point::log_lin(x, seg)
    }

    fn supports(&self, weight: Weight) -> bool {
        weight == Weight::X
    }

    fn integrate_weighted(&self, weight: Weight, seg: &Segment<T>) -> Result<T> {
        match weight {
            Weight::X => weighted::log_lin_x(seg),
            Weight::SqrtX => Err(IntegrationError::UnsupportedInterpolation {
                label: <Self as Law<T>>::label(self).to_owned(),
                operation: weight.operation(),
            }),
        }
    }
}

impl<T: Float> Law<T> for LinLog {
    fn label(&self) -> &'static str {
        "lin-log"
    }

    #[inline]
    fn integrate(&self, seg: &Segment<T>) -> Result<T> {
        segment::lin_log(seg)
    }

    #[inline]
    fn interpolate(&self, x: T, seg: &Segment<T>) -> Result<T> {
        point::lin_log(x, seg)
    }
}

impl<T: Float> Law<T> for LogLog {
    fn label(&self) -> &'static str {
        "log-log"
    }

    #[inline]
    fn integrate(&self, seg: &Segment<T>) -> Result<T> {
        segment::log_log(seg)
    }

    #[inline]
    fn interpolate(&self, x: T, seg: &Segment<T>) -> Result<T> {
        point::log_log(x, seg)
    }
}

impl<T: Float> Law<T> for Flat {
    fn label(&self) -> &'static str {
        "flat"
    }

    #[inline]
    fn integrate(&self, seg: &Segment<T>) -> Result<T> {
        segment::flat(seg)
    }

    #[inline]
    fn interpolate(&self, x: T, seg: &Segment<T>) -> Result<T> {
        point::flat(x, seg)
    }

    fn supports(&self, _weight: Weight) -> bool {
        true
    }

    fn integrate_weighted(&self, weight: Weight, seg: &Segment<T>) -> Result<T> {
        match weight {
            Weight::X => weighted::flat_x(seg),
            Weight::SqrtX => weighted::flat_sqrt_x(seg),
        }
    }
}

/// Interpolation law of a whole tabulated function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    #[default]
    LinLin,
    LogLin,
    LinLog,
    LogLog,
    Flat,
    /// Opaque law identified only by its label; cannot be integrated.
    Other(String),
}

/// Bind the concrete [`Law`] of an [`Interpolation`] to `$law` and evaluate
/// `$body`, or fail for [`Interpolation::Other`].
macro_rules! with_law {
    ($interp:expr, $law:ident => $body:expr) => {
        match $interp {
            Interpolation::LinLin => {
                let $law = LinLin;
                $body
            }
            Interpolation::LogLin => {
                let $law = LogLin;
                $body
            }
            Interpolation::LinLog => {
                let $law = LinLog;
                $body
            }
            Interpolation::LogLog => {
                let $law = LogLog;
                $body
            }
            Interpolation::Flat => {
                let $law = Flat;
                $body
            }
            Interpolation::Other(label) => Err(IntegrationError::OtherInterpolation {
                label: label.clone(),
            }),
        }
    };
}

impl Interpolation {
    /// Label of the law, e.g. `"log-lin"` for y logarithmic in linear x.
    pub fn label(&self) -> &str {
        match self {
            Interpolation::LinLin => "lin-lin",
            Interpolation::LogLin => "log-lin",
            Interpolation::LinLog => "lin-log",
            Interpolation::LogLog => "log-log",
            Interpolation::Flat => "flat",
            Interpolation::Other(label) => label,
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self, Interpolation::Flat)
    }

    #[inline]
    pub fn is_other(&self) -> bool {
        matches!(self, Interpolation::Other(_))
    }

    /// Fail with [`IntegrationError::OtherInterpolation`] for the opaque law.
    pub fn ensure_integrable(&self) -> Result<()> {
        match self {
            Interpolation::Other(label) => Err(IntegrationError::OtherInterpolation {
                label: label.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Closed-form integral of one segment under this law.
    #[inline]
    pub fn integrate_segment<T: Float>(&self, seg: &Segment<T>) -> Result<T> {
        with_law!(self, law => law.integrate(seg))
    }

    /// Interpolated value at `x` inside `seg` under this law.
    #[inline]
    pub fn interpolate<T: Float>(&self, x: T, seg: &Segment<T>) -> Result<T> {
        with_law!(self, law => law.interpolate(x, seg))
    }

    /// Closed-form integral of one segment times `weight` under this law.
    #[inline]
    pub fn integrate_segment_weighted<T: Float>(
        &self,
        weight: Weight,
        seg: &Segment<T>,
    ) -> Result<T> {
        with_law!(self, law => law.integrate_weighted(weight, seg))
    }

    /// Check that weighted integration with `weight` is defined for this law.
    pub fn ensure_supports(&self, weight: Weight) -> Result<()> {
        let supported = match self {
            Interpolation::LinLin => Law::<f64>::supports(&LinLin, weight),
            Interpolation::LogLin => Law::<f64>::supports(&LogLin, weight),
            Interpolation::LinLog => Law::<f64>::supports(&LinLog, weight),
            Interpolation::LogLog => Law::<f64>::supports(&LogLog, weight),
            Interpolation::Flat => Law::<f64>::supports(&Flat, weight),
            Interpolation::Other(_) => false,
        };
        if supported {
            Ok(())
        } else {
            Err(IntegrationError::UnsupportedInterpolation {
                label: self.label().to_owned(),
                operation: weight.operation(),
            })
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Interpolation {
    /// Parse a law label; anything unrecognised becomes [`Interpolation::Other`].
    fn from(label: &str) -> Self {
        match label {
            "lin-lin" => Interpolation::LinLin,
            "log-lin" => Interpolation::LogLin,
            "lin-log" => Interpolation::LinLog,
            "log-log" => Interpolation::LogLog,
            "flat" => Interpolation::Flat,
            other => Interpolation::Other(other.to_owned()),
        }
    }
}
