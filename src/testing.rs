use rand::Rng;
use rand::SeedableRng;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;

use crate::interpolation::Interpolation;
use crate::pointwise::PointwiseXY;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// Random function with `n` breakpoints, valid under every law:
/// strictly increasing `x` in `[0.1, 10]` and `y` in `[0.5, 5]`.
pub fn random_function(rng: &mut StdRng, n: usize, interpolation: Interpolation) -> PointwiseXY<f64> {
    // Jittered steps keep the breakpoints distinct
    let steps: Vec<f64> = randn::<f64>(rng, n).into_iter().map(|u| 0.2 + u).collect();
    let total: f64 = steps.iter().sum();
    let mut x = 0.1;
    let points: Vec<(f64, f64)> = steps
        .iter()
        .zip(randn::<f64>(rng, n))
        .map(|(dx, u)| {
            let p = (x, 0.5 + 4.5 * u);
            x += 9.9 * dx / total;
            p
        })
        .collect();
    PointwiseXY::new(points, interpolation).unwrap()
}
