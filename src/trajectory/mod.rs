//! Trajectory module for servo-trajectory.
//!
//! Synthesizes three-segment constant-acceleration trajectories from time- or
//! angle-based commands, re-times them for multi-axis synchronization, and
//! evaluates them at arbitrary times.

mod command;
mod direction;
pub mod fixed;
mod reference;
mod stretch;
mod synthesis;

pub use command::{CommandBuilder, TrajectoryCommand};
pub use fixed::{Angle, MAX_DURATION_MS, REBASE_AFTER_US};
pub use reference::{MotionPhase, Reference};

/// Accelerate / cruise / decelerate trajectory.
///
/// Segment 0 runs from `t0` to `t1` at acceleration `a0`, segment 1 from `t1`
/// to `t2` at constant speed `w1`, segment 2 from `t2` to `t3` at acceleration
/// `a2`. After `t3` the axis keeps moving at `w3`, which is zero unless the
/// maneuver was asked to continue running. Any segment may have zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Trajectory {
    /// Start time (µs).
    pub t0: i32,
    /// End of the initial ramp (µs).
    pub t1: i32,
    /// Start of the final ramp (µs).
    pub t2: i32,
    /// End of the maneuver (µs).
    pub t3: i32,
    /// Angle at `t0`.
    pub th0: Angle,
    /// Angle at `t1`.
    pub th1: Angle,
    /// Angle at `t2`.
    pub th2: Angle,
    /// Angle at `t3`.
    pub th3: Angle,
    /// Speed at `t0` (counts/s).
    pub w0: i32,
    /// Cruise speed between `t1` and `t2` (counts/s).
    pub w1: i32,
    /// Speed at and after `t3` (counts/s).
    pub w3: i32,
    /// Acceleration of the initial ramp (counts/s²).
    pub a0: i32,
    /// Acceleration of the final ramp (counts/s²).
    pub a2: i32,
}

impl Trajectory {
    /// A trajectory that stays at `angle` from `time` on.
    ///
    /// All knots coincide. The axis moves at `speed` after `time` if
    /// `continue_running` is set and stands still otherwise.
    pub fn constant(time: i32, angle: Angle, speed: i32, continue_running: bool) -> Self {
        Self {
            t0: time,
            t1: time,
            t2: time,
            t3: time,
            th0: angle,
            th1: angle,
            th2: angle,
            th3: angle,
            w0: speed,
            w1: speed,
            w3: if continue_running { speed } else { 0 },
            a0: 0,
            a2: 0,
        }
    }

    /// Durations of the three segments in microseconds.
    #[inline]
    pub fn segment_durations(&self) -> [i32; 3] {
        [
            self.t1.wrapping_sub(self.t0),
            self.t2.wrapping_sub(self.t1),
            self.t3.wrapping_sub(self.t2),
        ]
    }

    /// Total angle traveled between `t0` and `t3`.
    #[inline]
    pub fn displacement(&self) -> Angle {
        self.th3 - self.th0
    }

    /// Without a cruise segment both cruise knots must coincide. The ramp
    /// that is left takes up whatever separated them.
    fn close_cruise(&mut self) {
        let [_, d21, d32] = self.segment_durations();
        if d21 == 0 {
            if d32 > 0 {
                self.th2 = self.th1;
            } else {
                self.th1 = self.th2;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let trj = Trajectory::constant(5, Angle::from_parts(7, 1), 300, false);
        assert_eq!(trj.segment_durations(), [0, 0, 0]);
        assert_eq!(trj.displacement(), Angle::ZERO);
        assert_eq!(trj.w1, 300);
        assert_eq!(trj.w3, 0);

        let running = Trajectory::constant(5, Angle::ZERO, 300, true);
        assert_eq!(running.w3, 300);
    }
}
