//! Gauss-Legendre rules on `[-1, 1]`, built once per degree.

use num_traits::Float;

use crate::cast;
use crate::error::{IntegrationError, Result};

/// Highest supported number of nodes.
pub const MAX_DEGREE: usize = 64;

/// Nodes and weights of an `n`-point Gauss-Legendre rule, exact for
/// polynomials up to degree `2n - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre<T> {
    nodes: Vec<T>,
    weights: Vec<T>,
}

impl<T: Float> GaussLegendre<T> {
    /// Build the `degree`-point rule. Nodes are found by Newton iteration on
    /// the Legendre polynomial, starting from the usual cosine estimate.
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 || degree > MAX_DEGREE {
            return Err(IntegrationError::InvalidQuadratureDegree {
                degree,
                max: MAX_DEGREE,
            });
        }

        let n = degree as f64;
        let mut nodes = vec![T::zero(); degree];
        let mut weights = vec![T::zero(); degree];
        for i in 0..(degree + 1) / 2 {
            let mut z = (core::f64::consts::PI * (i as f64 + 0.75) / (n + 0.5)).cos();
            let mut dp = 1.0;
            for _ in 0..100 {
                let (p, p_prev) = legendre(degree, z);
                dp = n * (z * p - p_prev) / (z * z - 1.0);
                let z_prev = z;
                z = z_prev - p / dp;
                if (z - z_prev).abs() <= 1e-15 {
                    break;
                }
            }
            // Recompute the derivative at the converged node
            let (p, p_prev) = legendre(degree, z);
            if z * z != 1.0 {
                dp = n * (z * p - p_prev) / (z * z - 1.0);
            }
            let w = 2.0 / ((1.0 - z * z) * dp * dp);

            nodes[i] = cast(-z)?;
            nodes[degree - 1 - i] = cast(z)?;
            weights[i] = cast(w)?;
            weights[degree - 1 - i] = cast(w)?;
        }

        Ok(Self { nodes, weights })
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Apply the rule on `[a, b]`, returning `∫ f` and `∫ |f|` estimates.
    #[inline]
    pub(crate) fn apply<F>(&self, f: &mut F, a: T, b: T) -> Result<(T, T)>
    where
        F: FnMut(T) -> Result<T>,
    {
        let two = T::one() + T::one();
        let half = (b - a) / two;
        let mid = (a + b) / two;

        let mut sum = T::zero();
        let mut abs_sum = T::zero();
        for (x, w) in self.nodes.iter().zip(self.weights.iter()) {
            let v = *w * f(mid + half * *x)?;
            sum = sum + v;
            abs_sum = abs_sum + v.abs();
        }
        Ok((sum * half, abs_sum * half.abs()))
    }
}

/// `(P_n(z), P_{n-1}(z))` by the three-term recurrence.
#[inline]
fn legendre(n: usize, z: f64) -> (f64, f64) {
    let mut p = 1.0;
    let mut p_prev = 0.0;
    for j in 1..=n {
        let j = j as f64;
        let p_prev2 = p_prev;
        p_prev = p;
        p = ((2.0 * j - 1.0) * z * p_prev - (j - 1.0) * p_prev2) / j;
    }
    (p, p_prev)
}
