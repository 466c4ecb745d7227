//! Segment synthesis for time-based and angle-based commands.
//!
//! Both entry points flip backward requests into forward ones, solve the
//! forward case, and mirror the result back. Only forward motion is derived
//! in full.

use crate::error::{Error, Result, TrajectoryError};

use super::command::TrajectoryCommand;
use super::fixed::{
    cruise_time, isqrt, ramp_angle, ramp_time, saturate, scaled_product, scaled_quadratic, Angle,
    EXT_PER_COUNT, MAX_DURATION_MS, MS_PER_SECOND, US_PER_MS, US_PER_SECOND,
};
use super::Trajectory;

const EXT: i128 = EXT_PER_COUNT as i128;

#[inline]
fn sq(w: i64) -> i128 {
    w as i128 * w as i128
}

#[inline]
fn root(value: i128) -> i64 {
    isqrt(value.clamp(0, i64::MAX as i128) as i64)
}

impl Trajectory {
    /// Solve a maneuver of fixed duration.
    ///
    /// The direction of motion follows the sign of `speed_target`. A zero
    /// duration gives a stationary trajectory.
    ///
    /// # Errors
    ///
    /// - `InvalidDuration` if `duration` is negative or exceeds
    ///   [`MAX_DURATION_MS`].
    /// - `InvalidAcceleration` if acceleration or deceleration is not positive.
    /// - `NegativeSegment` if the solve produced an unrealizable profile.
    pub fn new_time_command(command: &TrajectoryCommand) -> Result<Self> {
        let mut c = *command;

        if c.duration < 0 || c.duration / US_PER_MS as i32 > MAX_DURATION_MS {
            warn!("time command rejected: duration {} us", c.duration);
            return Err(TrajectoryError::InvalidDuration {
                duration: c.duration,
                max_ms: MAX_DURATION_MS,
            }
            .into());
        }

        if c.duration == 0 {
            return Ok(Self::constant(c.time_start, c.start_angle(), 0, false));
        }

        check_ramps(&c)?;

        let backward = c.speed_target < 0;
        if backward {
            c.speed_target = c.speed_target.saturating_neg();
            c.speed_start = c.speed_start.saturating_neg();
        }
        c.speed_target = c.speed_target.min(c.speed_max.max(0));

        let mut trj = forward_time_command(&c);
        trj.check_segments()?;

        if backward {
            trj.reverse();
        }
        Ok(trj)
    }

    /// Solve a maneuver to a fixed target angle.
    ///
    /// The direction of motion follows `angle_end` relative to `angle_start`;
    /// only the magnitude of `speed_target` is used. The maneuver starts on
    /// the whole count `angle_start`, so the displacement is exactly
    /// `angle_end - angle_start` counts. A zero distance or zero speed gives a
    /// stationary trajectory.
    ///
    /// # Errors
    ///
    /// - `TooLong` if the distance at the target speed would take longer than
    ///   [`MAX_DURATION_MS`], or the solved profile does.
    /// - `InvalidAcceleration` if acceleration or deceleration is not positive.
    /// - `NegativeSegment` if the solve produced an unrealizable profile.
    pub fn new_angle_command(command: &TrajectoryCommand) -> Result<Self> {
        let mut c = *command;
        let speed = c.speed_target.saturating_abs().min(c.speed_max.max(0));

        if c.angle_end == c.angle_start || speed == 0 {
            return Ok(Self::constant(c.time_start, c.start_angle(), 0, false));
        }

        let start = Angle::from_counts(c.angle_start);
        let mut end = Angle::from_counts(c.angle_end);

        // Distance in millicounts over counts/s is milliseconds.
        let estimated_ms = (end - start).millicounts().abs() / speed as i64 + MS_PER_SECOND;
        if estimated_ms > MAX_DURATION_MS as i64 {
            warn!("angle command rejected: estimated {} ms", estimated_ms);
            return Err(TrajectoryError::TooLong {
                estimated_ms,
                max_ms: MAX_DURATION_MS,
            }
            .into());
        }

        check_ramps(&c)?;
        c.speed_target = speed;

        let backward = end < start;
        if backward {
            end = end.mirror(start);
            c.speed_start = c.speed_start.saturating_neg();
        }

        let mut trj = forward_angle_command(&c, start, end)?;
        trj.check_segments()?;

        if backward {
            trj.reverse();
        }
        Ok(trj)
    }

    fn check_segments(&self) -> Result<()> {
        for (segment, duration) in self.segment_durations().into_iter().enumerate() {
            if duration < 0 {
                return Err(TrajectoryError::NegativeSegment {
                    segment: segment as u8,
                    duration,
                }
                .into());
            }
        }
        Ok(())
    }
}

fn check_ramps(c: &TrajectoryCommand) -> Result<()> {
    if c.acceleration <= 0 || c.deceleration <= 0 {
        warn!(
            "command rejected: acceleration {} deceleration {}",
            c.acceleration,
            c.deceleration
        );
        return Err(TrajectoryError::InvalidAcceleration {
            acceleration: c.acceleration,
            deceleration: c.deceleration,
        }
        .into());
    }
    Ok(())
}

/// Solve a timed command assuming non-negative target speed.
fn forward_time_command(c: &TrajectoryCommand) -> Trajectory {
    let duration = c.duration as i64;
    let accel = c.acceleration as i64;
    let decel = c.deceleration as i64;
    let accel_max = accel.max(decel);

    let mut w3 = c.final_speed() as i64;

    // Bind the initial speed so that the first ramp fits in the duration.
    let mut w0 = c.speed_start as i64;
    if w0 * US_PER_SECOND < -accel * duration {
        w0 = -(accel * duration / US_PER_SECOND);
    }
    if (w0 - w3) * US_PER_SECOND > accel_max * duration {
        w0 = w3 + accel_max * duration / US_PER_SECOND;
    }

    // Bind the target speed so that the final ramp fits. Rounded up so that a
    // bound below one count per second still leaves a ramp to solve.
    let mut wt = c.speed_target as i64;
    if (wt - w3) * US_PER_SECOND > decel * duration {
        wt = w3 + (decel * duration + US_PER_SECOND - 1) / US_PER_SECOND;
    }

    // Accelerate toward a higher target, decelerate toward a lower one.
    let a0 = if w0 < wt { accel } else { -accel };
    let a2 = -decel;

    let mut t1mt0 = ramp_time(wt - w0, a0);
    let mut t3mt2 = ramp_time(w3 - wt, a2);
    let mut t2mt1 = duration - t1mt0 - t3mt2;
    let mut w1 = wt;

    if t2mt1 < 0 {
        if c.continue_running && a0 > 0 {
            // Not enough time to reach the final speed: accelerate throughout.
            debug!("time command: accelerating for the full {} us", duration);
            t1mt0 = duration;
            t2mt1 = 0;
            t3mt2 = 0;
            w1 = w0 + a0 * duration / US_PER_SECOND;
            w3 = w1;
        } else {
            // Intersection of w0 + a0·t with the final ramp w3 - a2·(T - t).
            t1mt0 = if a0 == a2 {
                0
            } else {
                ((w3 - w0) * US_PER_SECOND - a2 * duration) / (a0 - a2)
            };
            t1mt0 = t1mt0.clamp(0, duration);
            t2mt1 = 0;
            t3mt2 = duration - t1mt0;
            w1 = w0 + a0 * t1mt0 / US_PER_SECOND;
            debug!("time command: triangle, peak {} at {} us", w1, t1mt0);
        }
    }

    let d0 = saturate(t1mt0);
    let d1 = saturate(t2mt1);
    let d2 = saturate(t3mt2);
    let (w0, w1, w3) = (saturate(w0), saturate(w1), saturate(w3));
    let (a0, a2) = (saturate(a0), saturate(a2));

    let th0 = c.start_angle();
    let th1 = th0 + scaled_product(w0, d0) + scaled_quadratic(a0, d0);
    let th2 = th1 + scaled_product(w1, d1);
    let th3 = th2 + scaled_product(w1, d2) + scaled_quadratic(a2, d2);

    let t0 = c.time_start;
    let t1 = t0.wrapping_add(d0);
    Trajectory {
        t0,
        t1,
        t2: t1.wrapping_add(d1),
        t3: t0.wrapping_add(c.duration),
        th0,
        th1,
        th2,
        th3,
        w0,
        w1,
        w3,
        a0,
        a2,
    }
}

/// Solve an angle command assuming `th3 > th0`.
fn forward_angle_command(c: &TrajectoryCommand, th0: Angle, th3: Angle) -> Result<Trajectory> {
    let accel = c.acceleration as i64;
    let decel = c.deceleration as i64;
    let accel_max = accel.max(decel);
    let distance = (th3 - th0).millicounts() as i128;

    let mut w3 = c.final_speed() as i64;

    // Compare squared speeds against 2·a·Δθ so the square root is only taken
    // when a bound is actually violated. Negative initial speeds are always
    // feasible.
    let mut w0 = c.speed_start as i64;
    if w0 > 0 && (sq(w0) - sq(w3)) * EXT > 2 * accel_max as i128 * distance {
        w0 = root(sq(w3) + 2 * accel_max as i128 * distance / EXT);
    }

    let mut wt = c.speed_target as i64;
    if (sq(wt) - sq(w3)) * EXT > 2 * decel as i128 * distance {
        wt = root(sq(w3) + 2 * decel as i128 * distance / EXT);
    }

    let a0 = if w0 < wt { accel } else { -accel };
    let a2 = -decel;

    // Angle at which the initial ramp would cross zero speed.
    let thf = th0 - ramp_angle(w0, 0, a0);

    let th1 = thf + ramp_angle(wt, 0, a0);
    let th2 = th3 + ramp_angle(wt, w3, a2);
    let mut w1 = wt;

    if th2 < th1 {
        if c.continue_running && a0 > 0 {
            // Not enough room to reach the final speed: accelerate throughout.
            w1 = root(2 * a0 as i128 * (th3 - thf).millicounts() as i128 / EXT).max(w0);
            w3 = w1;
            debug!("angle command: accelerating to {} over the full distance", w1);
        } else {
            // w² = 2·a0·(θ - thf) meets w² = w3² + 2·a2·(θ - th3).
            if a0 != a2 {
                let num = sq(w3) * EXT + 2 * a0 as i128 * thf.millicounts() as i128
                    - 2 * a2 as i128 * th3.millicounts() as i128;
                let theta = num / (2 * (a0 - a2) as i128);
                let peak_sq = 2 * a0 as i128 * (theta - thf.millicounts() as i128) / EXT;
                w1 = root(peak_sq);
                // Slowing into a steeper final ramp covers more ground the
                // lower the peak, so the peak is rounded up there.
                if a0 < 0 && accel < decel && sq(w1) < peak_sq {
                    w1 += 1;
                }
            }
            w1 = if a0 > 0 { w1.max(w0) } else { w1.min(w0).max(w3) };
            debug!("angle command: triangle, peak {}", w1);
        }
    }

    let max_us = MAX_DURATION_MS as i64 * US_PER_MS;
    let d0 = ramp_time(w1 - w0, a0);
    let d2 = ramp_time(w3 - w1, a2);
    if d0 > max_us || d2 > max_us {
        return Err(too_long(d0.saturating_add(d2)));
    }

    let (d0, d2) = (saturate(d0), saturate(d2));
    let (w0, w1, w3) = (saturate(w0), saturate(w1), saturate(w3));
    let (a0, a2) = (saturate(a0), saturate(a2));

    // The first ramp is rebuilt forward from th0 and the last one backward
    // from th3, so th3 stays exact. Cruise covers what lies between them.
    let th1 = th0 + scaled_product(w0, d0) + scaled_quadratic(a0, d0);
    let th2 = th3 - scaled_product(w1, d2) - scaled_quadratic(a2, d2);
    let gap = th2 - th1;
    let d1 = if gap > Angle::ZERO {
        cruise_time(gap, w1).max(1)
    } else {
        0
    };

    let total = d0 as i64 + d1 + d2 as i64;
    if total > max_us {
        return Err(too_long(total));
    }
    let d1 = saturate(d1);

    let t0 = c.time_start;
    let t1 = t0.wrapping_add(d0);
    let t2 = t1.wrapping_add(d1);
    let mut trj = Trajectory {
        t0,
        t1,
        t2,
        t3: t2.wrapping_add(d2),
        th0,
        th1,
        th2,
        th3,
        w0,
        w1,
        w3,
        a0,
        a2,
    };
    trj.close_cruise();
    Ok(trj)
}

fn too_long(duration_us: i64) -> Error {
    let estimated_ms = duration_us / US_PER_MS;
    warn!("angle command rejected: solved {} ms", estimated_ms);
    TrajectoryError::TooLong {
        estimated_ms,
        max_ms: MAX_DURATION_MS,
    }
    .into()
}
