//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motor::{Direction, MotorKind, Port};

use super::limits::AxisLimits;

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Hub port the motor is plugged into, as a letter.
    pub port: Port,

    /// Rotation that counts as positive.
    #[serde(default, rename = "positive_direction")]
    pub direction: Direction,

    /// Motor hardware family.
    #[serde(default)]
    pub kind: MotorKind,

    /// Speed and acceleration bounds.
    pub limits: AxisLimits,

    /// Voltage bound in millivolts. Defaults to the limit of the motor kind.
    #[serde(default, rename = "max_voltage_mv")]
    pub max_voltage: Option<i32>,
}

impl AxisConfig {
    /// Effective voltage bound in millivolts.
    pub fn max_voltage_mv(&self) -> i32 {
        self.max_voltage
            .unwrap_or_else(|| self.kind.voltage_limit_mv())
    }
}
