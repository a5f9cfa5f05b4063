//! Bin averages of one, two or three tabulated functions over a grid of
//! group boundaries.
//!
//! Each function is first clipped to the grid, so every grid value inside a
//! function's domain becomes one of its breakpoints. Several functions are
//! then brought onto one shared breakpoint set (mutualified, then union-merged
//! with zero fill) and walked together once. Within a segment the product of
//! the linear interpolants is integrated exactly:
//!
//! | Functions | Per-segment sum                                            |
//! |-----------|------------------------------------------------------------|
//! | 1         | `(f1 + f2)·dx / 2`                                         |
//! | 2         | `((f1 + f2)(g1 + g2) + f1·g1 + f2·g2)·dx / 6`              |
//! | 3         | `((f1 + f2)(g1 + g2)(h1 + h2) + 2·f1·g1·h1 + 2·f2·g2·h2)·dx / 12` |
//!
//! where a function with [`Interpolation::Flat`](crate::Interpolation::Flat)
//! uses its left value in place of its right one.
//!
//! A function that stops with a non-zero value inside another's domain gets a
//! zero point a few ulps past its end (`4·ε·max(|end|, |other end|)`). A bin
//! the function does not reach can therefore pick up a contribution of that
//! relative size instead of exactly 0.

use itertools::Itertools;
use log::debug;
use num_traits::Float;

use crate::cast;
use crate::config::MutualifySettings;
use crate::error::{IntegrationError, Result, ResultExt};
use crate::pointwise::{tweak_domains_to_mutualify, validate_grid, PointwiseXY};

/// How each bin sum is scaled after integration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GroupNorm<'a, T> {
    /// Plain integral over the bin
    #[default]
    None,
    /// Divide by the bin width
    Dx,
    /// Divide by one caller-supplied value per bin
    Norm(&'a [T]),
}

/// `∫ f dx` over each bin of `grid`.
///
/// ```rust
/// use tabint::{group_one_function, GroupNorm, Interpolation, PointwiseXY};
///
/// let f = PointwiseXY::new(
///     [(2.0, 2.0), (4.0, 4.0), (6.0, 2.0), (8.0, 6.0)],
///     Interpolation::LinLin,
/// )?;
/// let groups = group_one_function(&f, &[2.0, 4.0, 6.0, 8.0], GroupNorm::Dx)?;
/// assert_eq!(groups, vec![3.0, 3.0, 4.0]);
/// # Ok::<(), tabint::IntegrationError>(())
/// ```
pub fn group_one_function<T: Float>(
    f: &PointwiseXY<T>,
    grid: &[T],
    norm: GroupNorm<'_, T>,
) -> Result<Vec<T>> {
    validate_inputs(&[f], grid, norm)?;

    let ff = f.intersection_with_grid(grid).via("source1")?;
    if ff.is_empty() {
        return zeros(grid.len() - 1);
    }

    let sums = walk(grid, [&ff], |y1, y2| y1[0] + y2[0])?;
    finish(sums, grid, norm, cast(2.0)?)
}

/// `∫ f·g dx` over each bin of `grid`.
pub fn group_two_functions<T: Float>(
    f: &PointwiseXY<T>,
    g: &PointwiseXY<T>,
    grid: &[T],
    norm: GroupNorm<'_, T>,
) -> Result<Vec<T>> {
    validate_inputs(&[f, g], grid, norm)?;

    let mut ff = f.intersection_with_grid(grid).via("source1")?;
    let mut gg = g.intersection_with_grid(grid).via("source2")?;
    if ff.is_empty() || gg.is_empty() {
        return zeros(grid.len() - 1);
    }

    let settings = MutualifySettings::default();
    tweak_domains_to_mutualify(&mut ff, &mut gg, &settings)?;
    let f = ff.union_with(&gg)?;
    let g = gg.union_with(&f)?;

    let sums = walk(grid, [&f, &g], |y1, y2| {
        let [f1, g1] = *y1;
        let [f2, g2] = *y2;
        (f1 + f2) * (g1 + g2) + f1 * g1 + f2 * g2
    })?;
    finish(sums, grid, norm, cast(6.0)?)
}

/// `∫ f·g·h dx` over each bin of `grid`.
pub fn group_three_functions<T: Float>(
    f: &PointwiseXY<T>,
    g: &PointwiseXY<T>,
    h: &PointwiseXY<T>,
    grid: &[T],
    norm: GroupNorm<'_, T>,
) -> Result<Vec<T>> {
    validate_inputs(&[f, g, h], grid, norm)?;

    let mut ff = f.intersection_with_grid(grid).via("source1")?;
    let mut gg = g.intersection_with_grid(grid).via("source2")?;
    let mut hh = h.intersection_with_grid(grid).via("source3")?;
    if ff.is_empty() || gg.is_empty() || hh.is_empty() {
        return zeros(grid.len() - 1);
    }

    let settings = MutualifySettings::default();
    tweak_domains_to_mutualify(&mut ff, &mut gg, &settings)?;
    tweak_domains_to_mutualify(&mut ff, &mut hh, &settings)?;
    tweak_domains_to_mutualify(&mut gg, &mut hh, &settings)?;
    let fff = ff.union_with(&gg)?;
    let h = hh.union_with(&fff)?;
    let f = fff.union_with(&h)?;
    let g = gg.union_with(&h)?;

    let two = T::one() + T::one();
    let sums = walk(grid, [&f, &g, &h], |y1, y2| {
        let [f1, g1, h1] = *y1;
        let [f2, g2, h2] = *y2;
        (f1 + f2) * (g1 + g2) * (h1 + h2) + two * f1 * g1 * h1 + two * f2 * g2 * h2
    })?;
    finish(sums, grid, norm, cast(12.0)?)
}

const SOURCES: [&str; 3] = ["source1", "source2", "source3"];

fn validate_inputs<T: Float>(
    functions: &[&PointwiseXY<T>],
    grid: &[T],
    norm: GroupNorm<'_, T>,
) -> Result<()> {
    for (f, source) in functions.iter().zip(SOURCES) {
        f.check().via(source)?;
        f.interpolation().ensure_integrable().via(source)?;
    }
    validate_grid(grid).via("group boundaries")?;

    if let GroupNorm::Norm(values) = norm {
        let bins = grid.len() - 1;
        if values.len() != bins {
            return Err(IntegrationError::bad_norm(format!(
                "norm length = {} but there are {} groups",
                values.len(),
                bins
            )));
        }
    }
    Ok(())
}

fn zeros<T: Float>(n: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(n)?;
    out.resize(n, T::zero());
    Ok(out)
}

/// Walk the shared breakpoints of `columns` once, summing `term(y1, y2)·dx`
/// for every segment into the bin that contains it.
///
/// All columns must have identical breakpoint locations.
fn walk<T, const N: usize>(
    grid: &[T],
    columns: [&PointwiseXY<T>; N],
    term: impl Fn(&[T; N], &[T; N]) -> T,
) -> Result<Vec<T>>
where
    T: Float,
{
    debug_assert!(columns.iter().all(|c| c.len() == columns[0].len()));
    let mut sums = Vec::new();
    sums.try_reserve_exact(grid.len() - 1)?;

    let xs = columns[0].points();
    let flat = columns.map(|c| c.interpolation().is_flat());
    let mut x1 = xs[0].x;
    let mut y1 = columns.map(|c| c.points()[0].y);
    let mut i = 1;

    for &xg2 in &grid[1..] {
        let mut sum = T::zero();
        if xg2 > x1 {
            while i < xs.len() {
                let x2 = xs[i].x;
                if x2 > xg2 {
                    break;
                }
                let y2 = columns.map(|c| c.points()[i].y);
                let mut y2p = y2;
                for k in 0..N {
                    if flat[k] {
                        y2p[k] = y1[k];
                    }
                }
                sum = sum + term(&y1, &y2p) * (x2 - x1);
                x1 = x2;
                y1 = y2;
                i += 1;
            }
        }
        sums.push(sum);
    }

    debug!(
        "grouped {} function(s) on {} breakpoints into {} bins",
        N,
        xs.len(),
        sums.len()
    );
    Ok(sums)
}

/// Apply the bin normalization to every non-zero sum, then the rule's divisor.
fn finish<T: Float>(
    mut sums: Vec<T>,
    grid: &[T],
    norm: GroupNorm<'_, T>,
    divisor: T,
) -> Result<Vec<T>> {
    for (index, (sum, (lo, hi))) in sums
        .iter_mut()
        .zip(grid.iter().tuple_windows())
        .enumerate()
    {
        if *sum != T::zero() {
            match norm {
                GroupNorm::None => {}
                GroupNorm::Dx => *sum = *sum / (*hi - *lo),
                GroupNorm::Norm(values) => {
                    let n = values[index];
                    if n == T::zero() {
                        return Err(IntegrationError::DivByZero { index });
                    }
                    *sum = *sum / n;
                }
            }
        }
        *sum = *sum / divisor;
    }
    Ok(sums)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::interpolation::Interpolation;

    fn lin(points: &[(f64, f64)]) -> PointwiseXY<f64> {
        PointwiseXY::new(points.iter().copied(), Interpolation::LinLin).unwrap()
    }

    fn scenario() -> PointwiseXY<f64> {
        lin(&[(2.0, 2.0), (4.0, 4.0), (6.0, 2.0), (8.0, 6.0)])
    }

    fn assert_close(a: &[f64], b: &[f64], eps: f64) {
        assert_eq!(a.len(), b.len(), "{a:?} vs {b:?}");
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() <= eps * (1.0 + y.abs()), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_one_function() {
        let f = scenario();
        let grid = [2.0, 4.0, 6.0, 8.0];
        assert_eq!(group_one_function(&f, &grid, GroupNorm::None).unwrap(), vec![6.0, 6.0, 8.0]);
        assert_eq!(group_one_function(&f, &grid, GroupNorm::Dx).unwrap(), vec![3.0, 3.0, 4.0]);

        // Bin edges between breakpoints, grid wider than the domain
        let grid = [0.0, 3.0, 5.0, 7.0, 10.0];
        let groups = group_one_function(&f, &grid, GroupNorm::None).unwrap();
        assert_eq!(groups, vec![2.5, 7.0, 5.5, 5.0]);
        for (g, (lo, hi)) in groups.iter().zip(grid.iter().tuple_windows()) {
            assert_eq!(*g, f.integrate(*lo, *hi).unwrap());
        }
    }

    #[test]
    fn test_norm_vector() {
        let f = scenario();
        let grid = [2.0, 4.0, 6.0, 8.0];
        let groups = group_one_function(&f, &grid, GroupNorm::Norm(&[2.0, 3.0, 4.0])).unwrap();
        assert_close(&groups, &[3.0, 2.0, 2.0], 1e-15);

        let err = group_one_function(&f, &grid, GroupNorm::Norm(&[1.0, 0.0, 1.0])).unwrap_err();
        assert!(matches!(err.root(), IntegrationError::DivByZero { index: 1 }));
        assert!(err.is_norm_error());

        let err = group_one_function(&f, &grid, GroupNorm::Norm(&[1.0, 1.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadNorm);

        // A zero norm is fine where the bin sum is zero
        let grid = [0.0, 1.0, 2.0, 8.0];
        let groups = group_one_function(&f, &grid, GroupNorm::Norm(&[0.0, 0.0, 4.0])).unwrap();
        assert_eq!(groups, vec![0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_outside_grid_is_zero() {
        let f = scenario();
        let g = lin(&[(0.0, 1.0), (10.0, 1.0)]);
        let grids: [&[f64]; 3] = [&[10.0, 20.0, 30.0], &[0.0, 1.0, 2.0], &[8.0, 9.0]];
        for grid in grids {
            let n = grid.len() - 1;
            assert_eq!(group_one_function(&f, grid, GroupNorm::Dx).unwrap(), vec![0.0; n]);
            assert_eq!(group_two_functions(&f, &g, grid, GroupNorm::None).unwrap(), vec![0.0; n]);
            assert_eq!(
                group_three_functions(&g, &g, &f, grid, GroupNorm::None).unwrap(),
                vec![0.0; n]
            );
        }

        let empty = PointwiseXY::<f64>::empty(Interpolation::LinLin);
        assert_eq!(
            group_two_functions(&f, &empty, &[2.0, 8.0], GroupNorm::None).unwrap(),
            vec![0.0]
        );
    }

    #[test]
    fn test_flat_uses_left_value() {
        let f = PointwiseXY::new([(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)], Interpolation::Flat).unwrap();
        let groups = group_one_function(&f, &[0.0, 1.0, 2.0], GroupNorm::None).unwrap();
        assert_eq!(groups, vec![1.0, 2.0]);

        // Flat times a constant: same bins
        let one = lin(&[(0.0, 1.0), (2.0, 1.0)]);
        let groups = group_two_functions(&f, &one, &[0.0, 0.5, 2.0], GroupNorm::None).unwrap();
        assert_close(&groups, &[0.5, 2.5], 1e-14);
    }

    #[test]
    fn test_two_functions() {
        // Product of linear interpolants is integrated exactly
        let x = lin(&[(0.0, 0.0), (1.0, 1.0)]);
        let groups = group_two_functions(&x, &x, &[0.0, 0.5, 1.0], GroupNorm::None).unwrap();
        assert_close(&groups, &[1.0 / 24.0, 7.0 / 24.0], 1e-15);

        // Times 1 reduces to the single function
        let f = scenario();
        let one = lin(&[(2.0, 1.0), (8.0, 1.0)]);
        let grid = [0.0, 3.0, 5.0, 7.0, 10.0];
        let single = group_one_function(&f, &grid, GroupNorm::Dx).unwrap();
        let paired = group_two_functions(&f, &one, &grid, GroupNorm::Dx).unwrap();
        assert_close(&paired, &single, 1e-14);
        let paired = group_two_functions(&one, &f, &grid, GroupNorm::Dx).unwrap();
        assert_close(&paired, &single, 1e-14);
    }

    #[test]
    fn test_two_functions_different_domains() {
        // f ends with non-zero values inside g's domain
        let f = lin(&[(1.0, 1.0), (3.0, 1.0)]);
        let g = lin(&[(0.0, 1.0), (4.0, 1.0)]);
        let groups = group_two_functions(&f, &g, &[0.0, 2.0, 4.0], GroupNorm::None).unwrap();
        assert_close(&groups, &[1.0, 1.0], 1e-12);
        let groups = group_two_functions(&g, &f, &[0.0, 2.0, 4.0], GroupNorm::None).unwrap();
        assert_close(&groups, &[1.0, 1.0], 1e-12);
    }

    #[test]
    fn test_three_functions() {
        let x = lin(&[(0.0, 0.0), (1.0, 1.0)]);
        let groups = group_three_functions(&x, &x, &x, &[0.0, 0.5, 1.0], GroupNorm::None).unwrap();
        assert_close(&groups, &[1.0 / 64.0, 15.0 / 64.0], 1e-15);

        // 2·x·(1 - x) over [0, 1]
        let one_minus_x = lin(&[(0.0, 1.0), (1.0, 0.0)]);
        let two = lin(&[(0.0, 2.0), (1.0, 2.0)]);
        let groups =
            group_three_functions(&x, &one_minus_x, &two, &[0.0, 1.0], GroupNorm::Dx).unwrap();
        assert_close(&groups, &[1.0 / 3.0], 1e-15);

        // Times 1·1 reduces to the single function
        let f = scenario();
        let one = lin(&[(0.0, 1.0), (10.0, 1.0)]);
        let grid = [2.0, 3.0, 5.0, 8.0];
        let single = group_one_function(&f, &grid, GroupNorm::None).unwrap();
        for triple in [
            group_three_functions(&f, &one, &one, &grid, GroupNorm::None).unwrap(),
            group_three_functions(&one, &f, &one, &grid, GroupNorm::None).unwrap(),
            group_three_functions(&one, &one, &f, &grid, GroupNorm::None).unwrap(),
        ] {
            assert_close(&triple, &single, 1e-12);
        }
    }

    #[test]
    fn test_rejections() {
        let f = scenario();
        let other = PointwiseXY::new([(2.0, 1.0), (8.0, 1.0)], Interpolation::from("charged-particle"))
            .unwrap();
        let err = group_two_functions(&f, &other, &[2.0, 8.0], GroupNorm::None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OtherInterpolation);
        assert!(err.to_string().starts_with("source2"));

        let mut flagged = scenario();
        flagged.flag_error("stale");
        let err = group_three_functions(&f, &f, &flagged, &[2.0, 8.0], GroupNorm::None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadSelf);
        assert!(err.to_string().starts_with("source3"));

        let grids: [&[f64]; 3] = [&[2.0], &[4.0, 2.0], &[2.0, 2.0]];
        for grid in grids {
            let err = group_one_function(&f, grid, GroupNorm::None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadSelf);
        }
    }

    #[test]
    fn test_domain_starting_at_zero() {
        // g is absent from the first bin, whatever the location of its edge
        for shift in [0.0, 10.0] {
            let f = lin(&[(shift - 1.0, 1.0), (shift + 1.0, 1.0)]);
            let g = lin(&[(shift, 1.0), (shift + 1.0, 1.0)]);
            let grid = [shift - 1.0, shift, shift + 1.0];
            for groups in [
                group_two_functions(&f, &g, &grid, GroupNorm::None).unwrap(),
                group_two_functions(&g, &f, &grid, GroupNorm::None).unwrap(),
                group_three_functions(&f, &g, &f, &grid, GroupNorm::None).unwrap(),
            ] {
                assert!(groups[0].abs() < 1e-13, "{groups:?}");
                assert!((groups[1] - 1.0).abs() < 1e-13, "{groups:?}");
            }
        }
    }

    #[test]
    fn test_three_functions_with_flat() {
        // 2 then 4 held flat, times x, times a flat 3
        let f = PointwiseXY::new([(0.0, 2.0), (1.0, 4.0), (2.0, 4.0)], Interpolation::Flat).unwrap();
        let x = lin(&[(0.0, 0.0), (2.0, 2.0)]);
        let h = PointwiseXY::new([(0.0, 3.0), (2.0, 3.0)], Interpolation::Flat).unwrap();
        let grid = [0.0, 1.0, 2.0];
        for groups in [
            group_three_functions(&f, &x, &h, &grid, GroupNorm::None).unwrap(),
            group_three_functions(&x, &h, &f, &grid, GroupNorm::None).unwrap(),
            group_three_functions(&h, &f, &x, &grid, GroupNorm::None).unwrap(),
        ] {
            assert_close(&groups, &[3.0, 18.0], 1e-14);
        }
    }
}
