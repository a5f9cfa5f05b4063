//! Convenience methods for constructing group boundary grids in a way that
//! echoes, but does not exactly match, methods common in scripting languages.
//!
//! Both builders return exactly `start` and `stop` as the first and last
//! values, so the result can be fed straight to the group integrators.
use num_traits::Float;

use crate::cast;
use crate::error::{IntegrationError, Result};

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Result<Vec<T>>
where
    T: Float,
{
    check_count(n)?;
    let dx = (stop - start) / cast(n as f64 - 1.0)?;
    fill(n, start, stop, |i| Ok(start + cast::<T>(i as f64)? * dx))
}

/// Generates logarithmically spaced values from start to stop,
/// including the endpoint. Both ends must be positive.
pub fn geomspace<T>(start: T, stop: T, n: usize) -> Result<Vec<T>>
where
    T: Float,
{
    check_count(n)?;
    if !(start > T::zero() && stop > T::zero()) {
        return Err(IntegrationError::bad_self(format!(
            "geomspace needs positive ends, got {} and {}",
            crate::report(start),
            crate::report(stop)
        )));
    }
    let (lo, hi) = (start.ln(), stop.ln());
    let dx = (hi - lo) / cast(n as f64 - 1.0)?;
    fill(n, start, stop, |i| Ok((lo + cast::<T>(i as f64)? * dx).exp()))
}

fn check_count(n: usize) -> Result<()> {
    if n < 2 {
        return Err(IntegrationError::bad_self(format!(
            "a grid needs at least 2 values, got {n}"
        )));
    }
    Ok(())
}

fn fill<T: Float>(n: usize, start: T, stop: T, at: impl Fn(usize) -> Result<T>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(n)?;
    out.push(start);
    for i in 1..n - 1 {
        out.push(at(i)?);
    }
    out.push(stop);
    Ok(out)
}
