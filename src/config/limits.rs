//! Kinematic limits of an axis.

use serde::Deserialize;

/// Speed and acceleration bounds applied to every maneuver of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisLimits {
    /// Maximum speed in counts/s.
    pub speed_max: i32,

    /// Acceleration magnitude in counts/s².
    pub acceleration: i32,

    /// Deceleration magnitude in counts/s².
    pub deceleration: i32,
}

impl AxisLimits {
    /// Create new limits.
    pub const fn new(speed_max: i32, acceleration: i32, deceleration: i32) -> Self {
        Self {
            speed_max,
            acceleration,
            deceleration,
        }
    }

    /// Check if every bound is positive.
    pub fn is_valid(&self) -> bool {
        self.speed_max > 0 && self.acceleration > 0 && self.deceleration > 0
    }

    /// Check if deceleration differs from acceleration.
    pub fn is_asymmetric(&self) -> bool {
        self.acceleration != self.deceleration
    }
}
