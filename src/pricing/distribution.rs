//! Standard normal distribution functions.

use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Beyond this magnitude N(x) is exactly 0 or 1 in double precision.
pub const NORM_CDF_TAIL: f64 = 37.5;

/// Standard normal cumulative distribution function.
///
/// Computed as `½·erfc(−x/√2)`, which keeps full relative accuracy in the
/// lower tail. Saturates to 0 / 1 outside `±NORM_CDF_TAIL`.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    if x <= -NORM_CDF_TAIL {
        0.0
    } else if x >= NORM_CDF_TAIL {
        1.0
    } else {
        0.5 * erfc(-x * FRAC_1_SQRT_2)
    }
}

/// Standard normal probability density function.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
