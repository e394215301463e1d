//! Scalar math helpers
//!
//! These are deliberately not `libm`: the renderer only promises that every
//! result is reproducible against the formulas below.

use std::f32::consts::PI;

const TWO_PI: f32 = 2.0 * PI;

/// Beyond this magnitude the wrap loop of [`sin_approx`] is preceded by `%`
const SIN_WRAP_LIMIT: f32 = TWO_PI * 1024.0;

/// Square root with a zero floor
///
/// Returns `0.0` for `x <= 0.0` (and for NaN), otherwise the correctly rounded
/// square root, which is bit-identical to the lane-wise `f32x4::sqrt`.
#[inline(always)]
pub fn sqrt_approx(x: f32) -> f32 {
    if x > 0.0 {
        x.sqrt()
    } else {
        0.0
    }
}

/// Sine via range reduction to `[-π, π]` and a 7th order Taylor polynomial
#[inline]
pub fn sin_approx(x: f32) -> f32 {
    let mut x = x;
    if x.abs() > SIN_WRAP_LIMIT {
        x %= TWO_PI;
    }
    while x > PI {
        x -= TWO_PI;
    }
    while x < -PI {
        x += TWO_PI;
    }
    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    x - x3 / 6.0 + x5 / 120.0 - x7 / 5040.0
}

/// `a > b ? a : b`
#[inline(always)]
pub fn maxf(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

/// `a < b ? a : b`
#[inline(always)]
pub fn minf(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

/// `minf(maxf(x, lo), hi)`
#[inline(always)]
pub fn clampf(x: f32, lo: f32, hi: f32) -> f32 {
    minf(maxf(x, lo), hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_floor() {
        assert_eq!(sqrt_approx(-4.0), 0.0);
        assert_eq!(sqrt_approx(0.0), 0.0);
        assert_eq!(sqrt_approx(f32::NAN), 0.0);
        assert_eq!(sqrt_approx(16.0), 4.0);
    }

    #[test]
    fn test_sin_close_to_libm() {
        let mut x = -10.0f32;
        while x < 10.0 {
            // 7th order Taylor on [-π, π] stays within ~0.08 at the ends
            assert!((sin_approx(x) - x.sin()).abs() < 0.08, "x = {}", x);
            x += 0.1;
        }
    }

    #[test]
    fn test_sin_small_angles() {
        assert_eq!(sin_approx(0.0), 0.0);
        assert!((sin_approx(0.5) - 0.5f32.sin()).abs() < 1e-5);
    }

    #[test]
    fn test_sin_large_input_terminates() {
        let s = sin_approx(1.0e9);
        assert!((-1.1..=1.1).contains(&s));
    }

    #[test]
    fn test_clamp_helpers() {
        assert_eq!(maxf(1.0, 2.0), 2.0);
        assert_eq!(minf(1.0, 2.0), 1.0);
        assert_eq!(clampf(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clampf(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clampf(0.25, 0.0, 1.0), 0.25);
    }
}
