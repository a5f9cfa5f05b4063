//! `∫ f(x)·x dx` and `∫ f(x)·√x dx` over a sub-domain.
//!
//! Only the laws with a closed form are supported:
//!
//! | Weight | Laws                        |
//! |--------|-----------------------------|
//! | `x`    | lin-lin, log-lin, flat      |
//! | `√x`   | lin-lin, flat               |

use num_traits::Float;

use super::ordered;
use crate::error::Result;
use crate::interpolation::Weight;
use crate::pointwise::PointwiseXY;

impl<T: Float> PointwiseXY<T> {
    /// `∫ f(x)·w(x) dx` over `[domain_min, domain_max]` for the given weight.
    pub fn integrate_with_weight(&self, weight: Weight, domain_min: T, domain_max: T) -> Result<T> {
        self.check()?;
        self.interpolation().ensure_supports(weight)?;
        if self.len() < 2 {
            return Ok(T::zero());
        }

        let (lo, hi, sign) = ordered(domain_min, domain_max);
        let law = self.interpolation();
        let sum = self.sum_clipped(lo, hi, |seg| law.integrate_segment_weighted(weight, seg))?;
        Ok(sign * sum)
    }

    /// `∫ f(x)·w(x) dx` over the whole domain.
    pub fn integrate_domain_with_weight(&self, weight: Weight) -> Result<T> {
        self.check()?;
        self.interpolation().ensure_supports(weight)?;
        match self.domain() {
            Some((lo, hi)) => self.integrate_with_weight(weight, lo, hi),
            None => Ok(T::zero()),
        }
    }

    #[inline]
    pub fn integrate_with_weight_x(&self, domain_min: T, domain_max: T) -> Result<T> {
        self.integrate_with_weight(Weight::X, domain_min, domain_max)
    }

    #[inline]
    pub fn integrate_domain_with_weight_x(&self) -> Result<T> {
        self.integrate_domain_with_weight(Weight::X)
    }

    /// Negative `x` inside the range fails with
    /// [`IntegrationError::BadIntegrationInput`](crate::IntegrationError::BadIntegrationInput).
    #[inline]
    pub fn integrate_with_weight_sqrt_x(&self, domain_min: T, domain_max: T) -> Result<T> {
        self.integrate_with_weight(Weight::SqrtX, domain_min, domain_max)
    }

    #[inline]
    pub fn integrate_domain_with_weight_sqrt_x(&self) -> Result<T> {
        self.integrate_domain_with_weight(Weight::SqrtX)
    }
}

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use crate::interpolation::Interpolation;
    use crate::pointwise::PointwiseXY;
    use crate::testing::{random_function, rng_fixed_seed};
    use crate::utils::linspace;

    #[test]
    fn test_x_weight_scenario() {
        let f: PointwiseXY<f64> = PointwiseXY::new(
            [(2.0, 2.0), (4.0, 4.0), (6.0, 2.0), (8.0, 6.0)],
            Interpolation::LinLin,
        )
        .unwrap();
        // Segment by segment: 56/3 + 88/3 + 172/3
        let expected = 316.0 / 3.0;
        let v = f.integrate_domain_with_weight_x().unwrap();
        assert!((v - expected).abs() < 1e-12);
        assert!((f.integrate_with_weight_x(8.0, 2.0).unwrap() + expected).abs() < 1e-12);

        // Clipping [3, 5]: y = x on [3, 4], y = 8 - x on [4, 5]
        let v = f.integrate_with_weight_x(3.0, 5.0).unwrap();
        let expected = (64.0 - 27.0) / 3.0 + (4.0 * 25.0 - 125.0 / 3.0) - (4.0 * 16.0 - 64.0 / 3.0);
        assert!((v - expected).abs() < 1e-12, "{v} vs {expected}");
    }

    #[test]
    fn test_sqrt_weight_scenario() {
        let f: PointwiseXY<f64> = PointwiseXY::new([(0.0, 1.0), (4.0, 1.0)], Interpolation::Flat).unwrap();
        let v = f.integrate_domain_with_weight_sqrt_x().unwrap();
        assert!((v - 16.0 / 3.0).abs() < 1e-14);
        // ∫_1^4 sqrt(x) = 14/3
        let v = f.integrate_with_weight_sqrt_x(1.0, 4.0).unwrap();
        assert!((v - 14.0 / 3.0).abs() < 1e-14);

        let g = PointwiseXY::new([(-1.0, 1.0), (4.0, 1.0)], Interpolation::LinLin).unwrap();
        let err = g.integrate_domain_with_weight_sqrt_x().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadIntegrationInput);
        // The negative part can be excluded by the range
        assert!(g.integrate_with_weight_sqrt_x(0.0, 4.0).is_ok());
    }

    #[test]
    fn test_log_lin_matches_fine_lin_lin() {
        // A log-lin function sampled finely and integrated lin-lin converges
        // to the closed form
        let rng = &mut rng_fixed_seed();
        let f = random_function(rng, 8, Interpolation::LogLin);
        let exact = f.integrate_domain_with_weight_x().unwrap();

        let (lo, hi) = f.domain().unwrap();
        let dense: Vec<(f64, f64)> = linspace(lo, hi, 100_001)
            .unwrap()
            .into_iter()
            .map(|x| (x, f.evaluate(x).unwrap().unwrap()))
            .collect();
        let dense = PointwiseXY::new(dense, Interpolation::LinLin).unwrap();
        let approx = dense.integrate_domain_with_weight_x().unwrap();
        assert!(((approx - exact) / exact).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_laws() {
        for (interp, x_ok, sqrt_ok) in [
            (Interpolation::LinLin, true, true),
            (Interpolation::LogLin, true, false),
            (Interpolation::LinLog, false, false),
            (Interpolation::LogLog, false, false),
            (Interpolation::Flat, true, true),
        ] {
            let f = PointwiseXY::new([(1.0, 1.0), (2.0, 2.0)], interp.clone()).unwrap();
            assert_eq!(f.integrate_domain_with_weight_x().is_ok(), x_ok, "{interp}");
            assert_eq!(f.integrate_domain_with_weight_sqrt_x().is_ok(), sqrt_ok, "{interp}");
            if !x_ok {
                let err = f.integrate_with_weight_x(1.0, 2.0).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::UnsupportedInterpolation);
            }
        }

        // Unsupported law is reported even without any segment
        let empty = PointwiseXY::<f64>::empty(Interpolation::LogLog);
        assert_eq!(
            empty.integrate_domain_with_weight_x().unwrap_err().kind(),
            ErrorKind::UnsupportedInterpolation
        );
    }

    #[test]
    fn test_flag_checked_before_law() {
        let mut f = PointwiseXY::new([(1.0, 1.0), (2.0, 2.0)], Interpolation::LogLog).unwrap();
        f.flag_error("stale");
        let err = f.integrate_with_weight_x(1.0, 2.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadSelf);
    }
}
