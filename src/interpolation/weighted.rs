//! Closed-form integrals of one segment times `x` or `sqrt(x)`.

use num_traits::Float;

use super::segment::{bad_input, require_positive_y, RATIO_SERIES_THRESHOLD};
use super::Segment;
use crate::cast;
use crate::error::Result;

/// `∫ y·x dx` for the trapezoid interpolant.
#[inline]
pub fn lin_lin_x<T: Float>(seg: &Segment<T>) -> Result<T> {
    let Segment { x1, y1, x2, y2 } = *seg;
    let two: T = cast(2.0)?;
    let six: T = cast(6.0)?;
    Ok((x2 - x1) * (y1 * (two * x1 + x2) + y2 * (x1 + two * x2)) / six)
}

#[inline]
pub fn flat_x<T: Float>(seg: &Segment<T>) -> Result<T> {
    let Segment { x1, y1, x2, .. } = *seg;
    let half: T = cast(0.5)?;
    Ok(half * (x2 - x1) * y1 * (x1 + x2))
}

/// `∫ y·x dx` for `y = y1·exp(L·t)`, `t = (x - x1)/(x2 - x1)`, `L = ln(y2/y1)`.
///
/// Written as `w·y1·(x1·E1(L) + w·E2(L))` where `E1 = ∫ e^(Lt) dt` and
/// `E2 = ∫ t·e^(Lt) dt` over `[0, 1]`. Both moments switch to their Taylor
/// series when `y2/y1` is close to 1.
pub fn log_lin_x<T: Float>(seg: &Segment<T>) -> Result<T> {
    require_positive_y(seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    let w = x2 - x1;
    let threshold: T = cast(RATIO_SERIES_THRESHOLD)?;

    let d = (y2 - y1) / y1;
    let l = d.ln_1p();
    let (e1, e2) = if d.abs() < threshold {
        let c = |v: f64| cast::<T>(v);
        let e1 = T::one() + l * (c(0.5)? + l * (c(1.0 / 6.0)? + l * c(1.0 / 24.0)?));
        let e2 = c(0.5)? + l * (c(1.0 / 3.0)? + l * (c(0.125)? + l * c(1.0 / 30.0)?));
        (e1, e2)
    } else {
        let e1 = d / l;
        (e1, (T::one() + d - e1) / l)
    };
    Ok(w * y1 * (x1 * e1 + w * e2))
}

#[inline]
fn sqrt_terms<T: Float>(seg: &Segment<T>) -> Result<(T, T, T)> {
    if seg.x1 < T::zero() || seg.x2 < T::zero() {
        return Err(bad_input("sqrt-x", seg));
    }
    let s1 = seg.x1.sqrt();
    let s2 = seg.x2.sqrt();
    let two: T = cast(2.0)?;
    let c = two * (s1 * s2 + seg.x1 + seg.x2);
    Ok((s1, s2, c))
}

/// `∫ y1·sqrt(x) dx`.
pub fn flat_sqrt_x<T: Float>(seg: &Segment<T>) -> Result<T> {
    if seg.x1 == seg.x2 {
        return Ok(T::zero());
    }
    let (s1, s2, c) = sqrt_terms(seg)?;
    let scale: T = cast(2.0 / 15.0)?;
    let two_and_half: T = cast(2.5)?;
    Ok(scale * (s2 - s1) * seg.y1 * two_and_half * c)
}

/// `∫ y·sqrt(x) dx` for the trapezoid interpolant.
pub fn lin_lin_sqrt_x<T: Float>(seg: &Segment<T>) -> Result<T> {
    if seg.x1 == seg.x2 {
        return Ok(T::zero());
    }
    let (s1, s2, c) = sqrt_terms(seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    let scale: T = cast(2.0 / 15.0)?;
    let sum = s1 + s2;
    Ok(scale
        * (s2 - s1)
        * (y1 * (c + x1 * (T::one() + s2 / sum)) + y2 * (c + x2 * (T::one() + s1 / sum))))
}
