//! Closed-form integrals of one segment for each interpolation law.
//!
//! Near-degenerate segments (ratio of consecutive values within
//! [`RATIO_SERIES_THRESHOLD`] of 1) switch to truncated series so that the
//! result does not suffer from catastrophic cancellation in `ln(r)`.

use num_traits::{Float, ToPrimitive};

use super::Segment;
use crate::error::{IntegrationError, Result};
use crate::{cast, report};

/// Relative distance from 1 below which a value ratio is treated with a
/// series expansion of its logarithm.
pub const RATIO_SERIES_THRESHOLD: f64 = 1e-4;

/// Relative distance from 1 of `x2/x1` below which the log-log integral is
/// evaluated with a binomial expansion.
pub const LOG_LOG_BINOMIAL_THRESHOLD: f64 = 1e-3;

pub(crate) fn bad_input<T: Float>(axes: &'static str, seg: &Segment<T>) -> IntegrationError {
    IntegrationError::BadIntegrationInput {
        axes,
        x1: report(seg.x1),
        y1: report(seg.y1),
        x2: report(seg.x2),
        y2: report(seg.y2),
    }
}

#[inline]
pub(crate) fn require_positive_y<T: Float>(seg: &Segment<T>) -> Result<()> {
    if seg.y1 <= T::zero() || seg.y2 <= T::zero() {
        return Err(bad_input("log-y", seg));
    }
    Ok(())
}

#[inline]
pub(crate) fn require_positive_x<T: Float>(seg: &Segment<T>) -> Result<()> {
    if seg.x1 <= T::zero() || seg.x2 <= T::zero() {
        return Err(bad_input("log-x", seg));
    }
    Ok(())
}

/// `q` such that `ln(1 + s) ≈ s·(1 + q)` for small `s`.
#[inline]
fn log_ratio_correction<T: Float>(s: T) -> Result<T> {
    let c2: T = cast(-0.5)?;
    let c3: T = cast(1.0 / 3.0)?;
    let c4: T = cast(-0.25)?;
    let c5: T = cast(0.2)?;
    Ok(s * (c2 + s * (c3 + s * (c4 + c5 * s))))
}

/// `ln(r)` where `r = v2 / v1`, using a 4-term series close to 1.
#[inline]
fn log_ratio<T: Float>(v1: T, v2: T) -> Result<T> {
    let threshold: T = cast(RATIO_SERIES_THRESHOLD)?;
    let r = v2 / v1;
    if (r - T::one()).abs() < threshold {
        let d = (v2 - v1) / v1;
        let half: T = cast(0.5)?;
        let third: T = cast(1.0 / 3.0)?;
        let quarter: T = cast(0.25)?;
        Ok(d * (T::one() + d * (-half + d * (third - quarter * d))))
    } else {
        Ok(r.ln())
    }
}

/// Trapezoid.
#[inline]
pub fn lin_lin<T: Float>(seg: &Segment<T>) -> Result<T> {
    let half: T = cast(0.5)?;
    Ok(half * (seg.y1 + seg.y2) * seg.width())
}

/// Exponential in x; requires positive `y`.
pub fn log_lin<T: Float>(seg: &Segment<T>) -> Result<T> {
    require_positive_y(seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    let threshold: T = cast(RATIO_SERIES_THRESHOLD)?;

    let r = y2 / y1;
    if (r - T::one()).abs() < threshold {
        let q = log_ratio_correction(r - T::one())?;
        Ok(y1 * (x2 - x1) / (T::one() + q))
    } else {
        Ok((y2 - y1) * (x2 - x1) / r.ln())
    }
}

/// Linear in `ln(x)`; requires positive `x`.
pub fn lin_log<T: Float>(seg: &Segment<T>) -> Result<T> {
    require_positive_x(seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    let threshold: T = cast(RATIO_SERIES_THRESHOLD)?;

    let r = x2 / x1;
    if (r - T::one()).abs() < threshold {
        let q = log_ratio_correction(r - T::one())?;
        Ok(x1 * (y2 - y1) * q / (T::one() + q) + y2 * (x2 - x1))
    } else {
        Ok((y1 - y2) * (x2 - x1) / r.ln() + x2 * y2 - x1 * y1)
    }
}

/// Power law `y = y1·(x/x1)^a`; requires positive `x` and `y`.
pub fn log_log<T: Float>(seg: &Segment<T>) -> Result<T> {
    if seg.x1 <= T::zero() || seg.x2 <= T::zero() || seg.y1 <= T::zero() || seg.y2 <= T::zero()
    {
        return Err(bad_input("log-x and log-y", seg));
    }
    let Segment { x1, y1, x2, y2 } = *seg;

    let ly = log_ratio(y1, y2)?;
    let lx = log_ratio(x1, x2)?;
    let a = ly / lx;

    let r = x2 / x1;
    let binomial_threshold: T = cast(LOG_LOG_BINOMIAL_THRESHOLD)?;
    if (r - T::one()).abs() < binomial_threshold {
        // Horner form of ((1 + z)^(a+1) - 1) / ((a+1)·z), truncated at n terms
        let z = (x2 - x1) / x1;
        let mut n = a.trunc().to_i64().unwrap_or(i64::MAX);
        if n > 10 {
            n = 12;
        }
        if n < 4 {
            n = 6;
        }
        let n_t: T = T::from(n).ok_or(IntegrationError::Unrepresentable(n as f64))?;

        let mut a = a - n_t + T::one();
        let mut f = n_t + T::one();
        let mut s = T::zero();
        for _ in 0..n {
            s = (T::one() + s) * a * z / f;
            a = a + T::one();
            f = f - T::one();
        }
        return Ok(y1 * (x2 - x1) * (T::one() + s));
    }

    // `a = -1` is the `1/x` law, whose integral is logarithmic
    let b = a + T::one();
    if b == T::zero() {
        Ok(y1 * x1 * lx)
    } else {
        Ok(y1 * x1 * (b * lx).exp_m1() / b)
    }
}

/// Step holding the left value.
#[inline]
pub fn flat<T: Float>(seg: &Segment<T>) -> Result<T> {
    Ok(seg.y1 * seg.width())
}
