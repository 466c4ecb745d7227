//! Per-axis control-loop state.

use crate::config::{AxisConfig, AxisLimits};
use crate::error::Result;
use crate::trajectory::{Angle, CommandBuilder, Reference, Trajectory, TrajectoryCommand};

/// Owns the live trajectory of one axis.
///
/// New maneuvers start from the reference of the current trajectory at the
/// requested time, so interrupting a maneuver never makes the reference
/// jump. Evaluating through [`reference`](Self::reference) keeps long-running
/// trajectories re-anchored.
#[derive(Debug, Clone)]
pub struct AxisTracker {
    limits: AxisLimits,
    trajectory: Trajectory,
}

impl AxisTracker {
    /// Create a tracker holding still at `angle` from `time` on.
    pub fn new(limits: AxisLimits, time: i32, angle: Angle) -> Self {
        Self {
            limits,
            trajectory: Trajectory::constant(time, angle, 0, false),
        }
    }

    /// Create a tracker using the limits of an axis configuration.
    pub fn from_config(config: &AxisConfig, time: i32, angle: Angle) -> Self {
        Self::new(config.limits, time, angle)
    }

    /// Get the kinematic limits.
    #[inline]
    pub fn limits(&self) -> &AxisLimits {
        &self.limits
    }

    /// Replace the kinematic limits used by subsequent maneuvers.
    pub fn set_limits(&mut self, limits: AxisLimits) {
        self.limits = limits;
    }

    /// Get the live trajectory.
    #[inline]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Evaluate the live trajectory at `time`, re-anchoring it if it has
    /// been running for too long.
    pub fn reference(&mut self, time: i32) -> Reference {
        let reference = self.trajectory.reference(time);
        if let Some(rebased) = self.trajectory.rebased(&reference) {
            self.trajectory = rebased;
        }
        reference
    }

    /// Run at `speed` for `duration` microseconds starting at `time`.
    ///
    /// The sign of `speed` sets the direction. On error the previous
    /// trajectory stays active.
    pub fn run_time(
        &mut self,
        time: i32,
        duration: i32,
        speed: i32,
        continue_running: bool,
    ) -> Result<&Trajectory> {
        let command = self
            .command_from(time)
            .duration(duration)
            .speed(speed)
            .continue_running(continue_running)
            .build();
        self.trajectory = Trajectory::new_time_command(&command)?;
        Ok(&self.trajectory)
    }

    /// Run to `target` counts at `speed` starting at `time`.
    ///
    /// Only the magnitude of `speed` is used, and the maneuver starts on the
    /// whole count of the current reference angle. On error the previous
    /// trajectory stays active.
    pub fn run_target(
        &mut self,
        time: i32,
        target: i32,
        speed: i32,
        continue_running: bool,
    ) -> Result<&Trajectory> {
        let command = self
            .command_from(time)
            .target(target)
            .speed(speed)
            .continue_running(continue_running)
            .build();
        self.trajectory = Trajectory::new_angle_command(&command)?;
        Ok(&self.trajectory)
    }

    /// Stop at the current reference angle.
    pub fn hold(&mut self, time: i32) -> &Trajectory {
        let reference = self.reference(time);
        self.trajectory = Trajectory::constant(time, reference.angle, 0, false);
        &self.trajectory
    }

    /// Re-time the live trajectory onto `leader`.
    pub fn stretch_to(&mut self, leader: &Trajectory) {
        self.trajectory.stretch(leader);
    }

    /// Starting knot of the segment containing `time`.
    pub fn last_vertex(&self, time: i32) -> Reference {
        self.trajectory.last_vertex(time)
    }

    /// Final knot of the live trajectory.
    pub fn endpoint(&self) -> Reference {
        self.trajectory.endpoint()
    }

    /// Duration of the live trajectory in microseconds.
    pub fn duration(&self) -> i32 {
        self.trajectory.duration()
    }

    /// Check if the maneuver has reached its final knot at `time`.
    pub fn is_done(&self, time: i32) -> bool {
        time.wrapping_sub(self.trajectory.t3) >= 0
    }

    fn command_from(&mut self, time: i32) -> CommandBuilder {
        let reference = self.reference(time);
        TrajectoryCommand::builder()
            .start(time, reference.angle)
            .start_speed(reference.rate)
            .limits(&self.limits)
    }
}
