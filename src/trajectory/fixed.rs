//! Fixed-point time and angle arithmetic.
//!
//! Time is kept in microseconds (`i32`, wrapping), speed in counts per second
//! and acceleration in counts per second squared. Angles are carried
//! internally as a single [`Angle`] in thousandths of a count and only split
//! into `(count, count_ext)` at the API boundary.

use core::ops::{Add, AddAssign, Neg, Sub};

/// Microseconds per millisecond.
pub const US_PER_MS: i64 = 1000;

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;

/// Microseconds per second.
pub const US_PER_SECOND: i64 = US_PER_MS * MS_PER_SECOND;

/// Sub-counts per count.
pub const EXT_PER_COUNT: i64 = 1000;

/// Longest maneuver that may be requested, in milliseconds.
pub const MAX_DURATION_MS: i32 = 15 * 60 * 1000;

/// Elapsed time after which a running trajectory is re-anchored.
///
/// Twice the maximum maneuver duration, which still fits the `i32`
/// microsecond clock.
pub const REBASE_AFTER_US: i32 = 2 * MAX_DURATION_MS * US_PER_MS as i32;

/// High-resolution angle in thousandths of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(i64);

impl Angle {
    /// Zero angle.
    pub const ZERO: Self = Self(0);

    /// Combine a count and its sub-count remainder.
    #[inline]
    pub const fn from_parts(count: i32, count_ext: i32) -> Self {
        Self(count as i64 * EXT_PER_COUNT + count_ext as i64)
    }

    /// Create from whole counts.
    #[inline]
    pub const fn from_counts(count: i32) -> Self {
        Self::from_parts(count, 0)
    }

    /// Create from thousandths of a count.
    #[inline]
    pub const fn from_millicounts(millicounts: i64) -> Self {
        Self(millicounts)
    }

    /// Get the raw value in thousandths of a count.
    #[inline]
    pub const fn millicounts(self) -> i64 {
        self.0
    }

    /// Whole counts, rounded toward negative infinity.
    ///
    /// Wraps like a hardware encoder counter once the angle leaves the `i32`
    /// range.
    #[inline]
    pub fn count(self) -> i32 {
        self.0.div_euclid(EXT_PER_COUNT) as i32
    }

    /// Sub-count remainder, always in `0..1000`.
    #[inline]
    pub fn count_ext(self) -> i32 {
        self.0.rem_euclid(EXT_PER_COUNT) as i32
    }

    /// Split into `(count, count_ext)`.
    #[inline]
    pub fn split(self) -> (i32, i32) {
        (self.count(), self.count_ext())
    }

    /// Mirror this angle about `origin`.
    #[inline]
    pub fn mirror(self, origin: Angle) -> Self {
        Self(2 * origin.0 - self.0)
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// `a * b / d` with a 128-bit intermediate, saturated to `i64`.
#[inline]
pub(crate) fn mul_div(a: i64, b: i64, d: i64) -> i64 {
    let q = (a as i128 * b as i128) / d as i128;
    q.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[inline]
pub(crate) fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Angle traveled at `rate` for `time` microseconds.
#[inline]
pub fn scaled_product(rate: i32, time: i32) -> Angle {
    Angle(rate as i64 * time as i64 / US_PER_MS)
}

/// Angle traveled from rest at `accel` for `time` microseconds, `½·a·t²`.
#[inline]
pub fn scaled_quadratic(accel: i32, time: i32) -> Angle {
    // a·t/ms is the speed gain in thousandths of a count per second.
    let gain = accel as i64 * time as i64 / US_PER_MS;
    Angle(mul_div(gain, time as i64, 2 * US_PER_MS * US_PER_MS))
}

/// Speed gained at `accel` over `time` microseconds.
#[inline]
pub fn speed_gain(accel: i32, time: i32) -> i32 {
    saturate(accel as i64 * time as i64 / US_PER_SECOND)
}

/// Microseconds needed to change speed by `delta` at `accel`.
///
/// Zero acceleration never completes a speed change, reported as zero time.
#[inline]
pub fn ramp_time(delta: i64, accel: i64) -> i64 {
    if accel == 0 {
        return 0;
    }
    mul_div(delta, US_PER_SECOND, accel)
}

/// Microseconds needed to cover `distance` at constant `rate`.
#[inline]
pub fn cruise_time(distance: Angle, rate: i32) -> i64 {
    if rate == 0 {
        return 0;
    }
    mul_div(distance.0, US_PER_MS, rate as i64)
}

/// Angle covered while ramping from `w_start` to `w_end` at `accel`.
#[inline]
pub fn ramp_angle(w_end: i64, w_start: i64, accel: i64) -> Angle {
    if accel == 0 {
        return Angle::ZERO;
    }
    Angle(mul_div(w_end * w_end - w_start * w_start, EXT_PER_COUNT, 2 * accel))
}

/// Floor of the square root; zero for non-positive input.
pub fn isqrt(value: i64) -> i64 {
    if value <= 0 {
        return 0;
    }
    let mut root = libm::sqrt(value as f64) as i64;
    while root > 0 && root.checked_mul(root).map_or(true, |sq| sq > value) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= value) {
        root += 1;
    }
    root
}
