//! Cumulative integral at every breakpoint.

use num_traits::Float;

use crate::error::Result;
use crate::pointwise::PointwiseXY;

impl<T: Float> PointwiseXY<T> {
    /// `∫ f` from the first breakpoint up to each breakpoint in turn.
    ///
    /// The output has one entry per breakpoint and starts at 0.
    ///
    /// ```rust
    /// use tabint::{Interpolation, PointwiseXY};
    ///
    /// let f = PointwiseXY::new(
    ///     [(2.0, 2.0), (4.0, 4.0), (6.0, 2.0), (8.0, 6.0)],
    ///     Interpolation::LinLin,
    /// )?;
    /// assert_eq!(f.running_integral()?, vec![0.0, 6.0, 12.0, 20.0]);
    /// # Ok::<(), tabint::IntegrationError>(())
    /// ```
    pub fn running_integral(&self) -> Result<Vec<T>> {
        self.check()?;
        self.interpolation().ensure_integrable()?;

        let mut out = Vec::new();
        out.try_reserve_exact(self.len())?;
        if self.is_empty() {
            return Ok(out);
        }

        let mut sum = T::zero();
        out.push(sum);
        for seg in self.segments() {
            sum = sum + self.interpolation().integrate_segment(&seg)?;
            out.push(sum);
        }
        Ok(out)
    }
}
