//! Point evaluation of the interpolant inside one segment.

use num_traits::Float;

use super::segment::{bad_input, require_positive_x, require_positive_y};
use super::Segment;
use crate::error::{IntegrationError, Result};
use crate::report;

#[inline]
fn check_bracket<T: Float>(x: T, seg: &Segment<T>) -> Result<()> {
    if x < seg.x1 || x > seg.x2 || x.is_nan() {
        return Err(IntegrationError::XOutsideDomain {
            x: report(x),
            min: report(seg.x1),
            max: report(seg.x2),
        });
    }
    Ok(())
}

#[inline]
pub fn lin_lin<T: Float>(x: T, seg: &Segment<T>) -> Result<T> {
    check_bracket(x, seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    if x == x1 {
        return Ok(y1);
    }
    if x == x2 {
        return Ok(y2);
    }
    Ok(y1 + (y2 - y1) * (x - x1) / (x2 - x1))
}

/// `y1·(y2/y1)^t` with `t` linear in x.
pub fn log_lin<T: Float>(x: T, seg: &Segment<T>) -> Result<T> {
    check_bracket(x, seg)?;
    require_positive_y(seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    if x == x1 {
        return Ok(y1);
    }
    if x == x2 {
        return Ok(y2);
    }
    Ok(y1 * ((y2 / y1).ln() * (x - x1) / (x2 - x1)).exp())
}

/// Linear in `ln(x)`.
pub fn lin_log<T: Float>(x: T, seg: &Segment<T>) -> Result<T> {
    check_bracket(x, seg)?;
    require_positive_x(seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    if x == x1 {
        return Ok(y1);
    }
    if x == x2 {
        return Ok(y2);
    }
    Ok(y1 + (y2 - y1) * (x / x1).ln() / (x2 / x1).ln())
}

/// Power law through both endpoints.
pub fn log_log<T: Float>(x: T, seg: &Segment<T>) -> Result<T> {
    check_bracket(x, seg)?;
    let Segment { x1, y1, x2, y2 } = *seg;
    if x1 <= T::zero() || x2 <= T::zero() || y1 <= T::zero() || y2 <= T::zero() {
        return Err(bad_input("log-x and log-y", seg));
    }
    if x == x1 {
        return Ok(y1);
    }
    if x == x2 {
        return Ok(y2);
    }
    Ok(y1 * ((y2 / y1).ln() * (x / x1).ln() / (x2 / x1).ln()).exp())
}

/// Left value everywhere except exactly at the right breakpoint.
#[inline]
pub fn flat<T: Float>(x: T, seg: &Segment<T>) -> Result<T> {
    check_bracket(x, seg)?;
    if x == seg.x2 {
        Ok(seg.y2)
    } else {
        Ok(seg.y1)
    }
}
