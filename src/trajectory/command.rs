//! Maneuver requests and a builder for creating them.

use crate::config::AxisLimits;

use super::fixed::Angle;

/// A requested maneuver, either by duration or by target angle.
///
/// Which fields are authoritative depends on the entry point:
/// [`Trajectory::new_time_command`](super::Trajectory::new_time_command) reads
/// `duration`, [`Trajectory::new_angle_command`](super::Trajectory::new_angle_command)
/// reads `angle_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrajectoryCommand {
    /// Start time in microseconds.
    pub time_start: i32,

    /// Duration in microseconds (time-based commands).
    pub duration: i32,

    /// Start angle in counts.
    pub angle_start: i32,

    /// Sub-count remainder of the start angle (0-999).
    pub angle_start_ext: i32,

    /// Target angle in counts (angle-based commands).
    pub angle_end: i32,

    /// Speed at the start of the maneuver in counts/s.
    pub speed_start: i32,

    /// Requested cruise speed in counts/s.
    pub speed_target: i32,

    /// Speed limit in counts/s.
    pub speed_max: i32,

    /// Acceleration magnitude in counts/s².
    pub acceleration: i32,

    /// Deceleration magnitude in counts/s².
    pub deceleration: i32,

    /// Keep running at `speed_target` once the maneuver completes.
    pub continue_running: bool,
}

impl TrajectoryCommand {
    /// Create a command builder.
    pub fn builder() -> CommandBuilder {
        CommandBuilder::new()
    }

    /// Start angle including the sub-count remainder.
    #[inline]
    pub fn start_angle(&self) -> Angle {
        Angle::from_parts(self.angle_start, self.angle_start_ext)
    }

    /// Terminal speed: the target speed if running on, zero otherwise.
    #[inline]
    pub fn final_speed(&self) -> i32 {
        if self.continue_running {
            self.speed_target
        } else {
            0
        }
    }
}

/// Builder for [`TrajectoryCommand`].
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    command: TrajectoryCommand,
}

impl CommandBuilder {
    /// Create a new builder with everything zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start time and start angle.
    pub fn start(mut self, time: i32, angle: Angle) -> Self {
        let (count, count_ext) = angle.split();
        self.command.time_start = time;
        self.command.angle_start = count;
        self.command.angle_start_ext = count_ext;
        self
    }

    /// Set the start speed.
    pub fn start_speed(mut self, speed: i32) -> Self {
        self.command.speed_start = speed;
        self
    }

    /// Set the duration in microseconds.
    pub fn duration(mut self, duration: i32) -> Self {
        self.command.duration = duration;
        self
    }

    /// Set the target angle in counts.
    pub fn target(mut self, angle: i32) -> Self {
        self.command.angle_end = angle;
        self
    }

    /// Set the target speed.
    pub fn speed(mut self, speed: i32) -> Self {
        self.command.speed_target = speed;
        self
    }

    /// Take speed and acceleration limits from an axis configuration.
    pub fn limits(mut self, limits: &AxisLimits) -> Self {
        self.command.speed_max = limits.speed_max;
        self.command.acceleration = limits.acceleration;
        self.command.deceleration = limits.deceleration;
        self
    }

    /// Set asymmetric acceleration/deceleration magnitudes.
    pub fn ramps(mut self, acceleration: i32, deceleration: i32) -> Self {
        self.command.acceleration = acceleration;
        self.command.deceleration = deceleration;
        self
    }

    /// Set the speed limit.
    pub fn speed_max(mut self, speed_max: i32) -> Self {
        self.command.speed_max = speed_max;
        self
    }

    /// Keep running at the target speed after the maneuver.
    pub fn continue_running(mut self, continue_running: bool) -> Self {
        self.command.continue_running = continue_running;
        self
    }

    /// Finish the command.
    pub fn build(self) -> TrajectoryCommand {
        self.command
    }
}
