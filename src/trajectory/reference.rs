//! Evaluating a trajectory at a point in time.

use super::fixed::{
    mul_div, scaled_product, scaled_quadratic, speed_gain, Angle, REBASE_AFTER_US,
};
use super::Trajectory;

/// Segment of a trajectory that a given time falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Initial ramp toward the cruise speed.
    Accelerating,
    /// Constant cruise speed.
    Cruising,
    /// Final ramp toward the terminal speed.
    Decelerating,
    /// Maneuver complete, moving at the terminal speed (possibly zero).
    Complete,
}

/// Where the axis should be at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reference {
    /// Time in microseconds.
    pub time: i32,
    /// High-resolution angle.
    pub angle: Angle,
    /// Speed in counts/s.
    pub rate: i32,
    /// Acceleration in counts/s².
    pub acceleration: i32,
    /// Segment the time falls in.
    pub phase: MotionPhase,
}

impl Reference {
    /// Whole counts of the reference angle.
    #[inline]
    pub fn count(&self) -> i32 {
        self.angle.count()
    }

    /// Sub-count remainder of the reference angle (0-999).
    #[inline]
    pub fn count_ext(&self) -> i32 {
        self.angle.count_ext()
    }
}

impl Trajectory {
    /// Segment containing `time`.
    ///
    /// The boundaries are `[t0, t1)`, `[t1, t2]`, `(t2, t3]`, and anything
    /// after `t3`. Times before `t0` extrapolate the initial ramp.
    pub fn phase_at(&self, time: i32) -> MotionPhase {
        if time.wrapping_sub(self.t1) < 0 {
            MotionPhase::Accelerating
        } else if time.wrapping_sub(self.t2) <= 0 {
            MotionPhase::Cruising
        } else if time.wrapping_sub(self.t3) <= 0 {
            MotionPhase::Decelerating
        } else {
            MotionPhase::Complete
        }
    }

    /// Evaluate angle, speed and acceleration at `time`.
    ///
    /// Never fails; after `t3` the axis keeps moving at `w3`. Every knot is
    /// reproduced exactly, so the angle is continuous across segment
    /// boundaries. Long-running trajectories must be re-anchored with
    /// [`rebased`](Self::rebased) to keep the elapsed time within the clock
    /// range.
    pub fn reference(&self, time: i32) -> Reference {
        let phase = self.phase_at(time);
        let [d10, d21, d32] = self.segment_durations();
        let (angle, rate, acceleration) = match phase {
            MotionPhase::Accelerating => {
                let dt = time.wrapping_sub(self.t0);
                (
                    along(self.th0, self.th1, self.w0, self.a0, dt, d10),
                    self.w0.saturating_add(speed_gain(self.a0, dt)),
                    self.a0,
                )
            }
            MotionPhase::Cruising => {
                let dt = time.wrapping_sub(self.t1);
                (along(self.th1, self.th2, self.w1, 0, dt, d21), self.w1, 0)
            }
            MotionPhase::Decelerating => {
                let dt = time.wrapping_sub(self.t2);
                (
                    along(self.th2, self.th3, self.w1, self.a2, dt, d32),
                    self.w1.saturating_add(speed_gain(self.a2, dt)),
                    self.a2,
                )
            }
            MotionPhase::Complete => {
                let dt = time.wrapping_sub(self.t3);
                (self.th3 + scaled_product(self.w3, dt), self.w3, 0)
            }
        };

        Reference {
            time,
            angle,
            rate,
            acceleration,
            phase,
        }
    }

    /// Replacement trajectory once this one has been running too long.
    ///
    /// Returns a trajectory anchored at `reference` that continues at `w3`
    /// when more than [`REBASE_AFTER_US`] have passed since `t0`, and `None`
    /// otherwise. The caller replaces its trajectory with the result.
    pub fn rebased(&self, reference: &Reference) -> Option<Self> {
        let elapsed = reference.time.wrapping_sub(self.t0);
        if elapsed <= REBASE_AFTER_US || reference.phase != MotionPhase::Complete {
            return None;
        }
        debug!("rebasing trajectory after {} us", elapsed);
        Some(Self::constant(reference.time, reference.angle, self.w3, true))
    }

    /// Starting knot of the segment containing `time`.
    ///
    /// Unlike [`reference`](Self::reference) nothing is interpolated, and
    /// each boundary belongs to the segment it starts.
    pub fn last_vertex(&self, time: i32) -> Reference {
        if time.wrapping_sub(self.t1) < 0 {
            Self::knot(self.t0, self.th0, self.w0, self.a0, MotionPhase::Accelerating)
        } else if time.wrapping_sub(self.t2) < 0 {
            Self::knot(self.t1, self.th1, self.w1, 0, MotionPhase::Cruising)
        } else if time.wrapping_sub(self.t3) < 0 {
            Self::knot(self.t2, self.th2, self.w1, self.a2, MotionPhase::Decelerating)
        } else {
            self.endpoint()
        }
    }

    /// Final knot: `t3`, `th3` and `w3`.
    pub fn endpoint(&self) -> Reference {
        Self::knot(self.t3, self.th3, self.w3, 0, MotionPhase::Complete)
    }

    /// Duration of the maneuver in microseconds.
    #[inline]
    pub fn duration(&self) -> i32 {
        self.t3.wrapping_sub(self.t0)
    }

    fn knot(time: i32, angle: Angle, rate: i32, acceleration: i32, phase: MotionPhase) -> Reference {
        Reference {
            time,
            angle,
            rate,
            acceleration,
            phase,
        }
    }
}

/// Angle `dt` into a segment of `length` µs running from `from` to `to`.
///
/// The rounded kinematic terms can miss `to` by a few millicounts at the end
/// of the segment; the miss is spread linearly over the segment.
fn along(from: Angle, to: Angle, rate: i32, accel: i32, dt: i32, length: i32) -> Angle {
    let travel = |t| scaled_product(rate, t) + scaled_quadratic(accel, t);
    let mut angle = from + travel(dt);
    if length != 0 {
        let miss = (to - from - travel(length)).millicounts();
        angle += Angle::from_millicounts(mul_div(miss, dt as i64, length as i64));
    }
    angle
}
