//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Supply voltage is positive
/// - Speed, acceleration and deceleration limits are positive
/// - Maximum voltage is within the motor kind's limit
/// - No two axes share a port
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.nominal_supply_mv <= 0 {
        return Err(Error::Config(ConfigError::InvalidSupplyVoltage(
            config.nominal_supply_mv,
        )));
    }

    for (index, (_, axis)) in config.axes.iter().enumerate() {
        validate_axis(axis)?;

        // Port must not be taken by an earlier axis
        if config.axes.values().take(index).any(|other| other.port == axis.port) {
            return Err(Error::Config(ConfigError::DuplicatePort(axis.port.letter())));
        }
    }

    Ok(())
}

pub(crate) fn validate_axis(axis: &AxisConfig) -> Result<()> {
    let limits = &axis.limits;

    if limits.speed_max <= 0 {
        return Err(Error::Config(ConfigError::InvalidSpeedMax(limits.speed_max)));
    }

    if limits.acceleration <= 0 || limits.deceleration <= 0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration {
            acceleration: limits.acceleration,
            deceleration: limits.deceleration,
        }));
    }

    let limit = axis.kind.voltage_limit_mv();
    let requested = axis.max_voltage_mv();
    if !(0..=limit).contains(&requested) {
        return Err(Error::Config(ConfigError::InvalidMaxVoltage { requested, limit }));
    }

    Ok(())
}
