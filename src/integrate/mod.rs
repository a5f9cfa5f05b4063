//! Integration of [`PointwiseXY`](crate::PointwiseXY) functions.
//!
//! | Operation                                   | Module            |
//! |---------------------------------------------|-------------------|
//! | `∫ f` over a sub-domain, normalization      | [`domain`]        |
//! | `∫ f·x`, `∫ f·√x`                           | [`weighted`]      |
//! | bin averages of 1, 2 or 3 function products | [`group`]         |
//! | cumulative integral at every breakpoint     | [`running`]       |
//! | `∫ f·g` for an arbitrary callback `g`       | [`with_function`] |
//!
//! All routines that take a `(domain_min, domain_max)` pair return the
//! negated integral when the bounds are reversed.

pub mod domain;
pub mod group;
pub mod running;
pub mod weighted;
pub mod with_function;

pub use group::{group_one_function, group_three_functions, group_two_functions, GroupNorm};

use num_traits::Float;

/// Sorted bounds and the sign to apply to the integral over them.
#[inline]
pub(crate) fn ordered<T: Float>(domain_min: T, domain_max: T) -> (T, T, T) {
    if domain_max < domain_min {
        (domain_max, domain_min, -T::one())
    } else {
        (domain_min, domain_max, T::one())
    }
}
