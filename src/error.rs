//! Error types for servo-trajectory.
//!
//! Provides unified error handling across configuration, trajectory synthesis,
//! and motor actuation.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all servo-trajectory operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Trajectory synthesis error
    Trajectory(TrajectoryError),
    /// Motor actuation error
    Motor(MotorError),
}

/// Coarse classification of a synthesis failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// The command itself is out of range.
    InvalidArgument,
    /// The solver produced an unrealizable profile.
    Failed,
}

/// Trajectory synthesis errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrajectoryError {
    /// Duration is negative or longer than the maximum maneuver duration
    InvalidDuration {
        /// Requested duration in microseconds
        duration: i32,
        /// Maximum duration in milliseconds
        max_ms: i32,
    },
    /// Estimated duration of an angle maneuver exceeds the maximum
    TooLong {
        /// Estimated duration in milliseconds
        estimated_ms: i64,
        /// Maximum duration in milliseconds
        max_ms: i32,
    },
    /// Acceleration or deceleration is zero or negative
    InvalidAcceleration {
        /// Requested acceleration magnitude
        acceleration: i32,
        /// Requested deceleration magnitude
        deceleration: i32,
    },
    /// A solved segment ended up with negative duration
    NegativeSegment {
        /// Segment index (0 = accelerate, 1 = cruise, 2 = decelerate)
        segment: u8,
        /// Offending duration in microseconds
        duration: i32,
    },
}

impl TrajectoryError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrajectoryError::InvalidDuration { .. }
            | TrajectoryError::TooLong { .. }
            | TrajectoryError::InvalidAcceleration { .. } => ErrorKind::InvalidArgument,
            TrajectoryError::NegativeSegment { .. } => ErrorKind::Failed,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Two axes are configured on the same port
    DuplicatePort(char),
    /// Port letter or index does not name a motor port
    InvalidPort(u8),
    /// Maximum speed must be > 0
    InvalidSpeedMax(i32),
    /// Acceleration and deceleration must be > 0
    InvalidAcceleration {
        /// Configured acceleration
        acceleration: i32,
        /// Configured deceleration
        deceleration: i32,
    },
    /// Maximum voltage outside 0..=hardware limit
    InvalidMaxVoltage {
        /// Requested maximum voltage in millivolts
        requested: i32,
        /// Hardware limit in millivolts
        limit: i32,
    },
    /// Supply voltage must be > 0
    InvalidSupplyVoltage(i32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor actuation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// PWM or direction pin operation failed
    PinError,
    /// No motor is attached to the requested port
    NotAttached(char),
    /// Maximum voltage outside 0..=hardware limit
    InvalidMaxVoltage {
        /// Requested maximum voltage in millivolts
        requested: i32,
        /// Hardware limit in millivolts
        limit: i32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Trajectory(e) => write!(f, "Trajectory error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::Failed => write!(f, "failed"),
        }
    }
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryError::InvalidDuration { duration, max_ms } => {
                write!(f, "Duration {} us outside 0..={} ms", duration, max_ms)
            }
            TrajectoryError::TooLong { estimated_ms, max_ms } => {
                write!(f, "Maneuver would take {} ms, maximum is {} ms", estimated_ms, max_ms)
            }
            TrajectoryError::InvalidAcceleration { acceleration, deceleration } => write!(
                f,
                "Acceleration {} and deceleration {} must both be > 0",
                acceleration, deceleration
            ),
            TrajectoryError::NegativeSegment { segment, duration } => {
                write!(f, "Segment {} has negative duration {} us", segment, duration)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::DuplicatePort(port) => write!(f, "Port {} used by more than one axis", port),
            ConfigError::InvalidPort(v) => write!(f, "Invalid port: {}", v),
            ConfigError::InvalidSpeedMax(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::InvalidAcceleration { acceleration, deceleration } => write!(
                f,
                "Invalid acceleration {} / deceleration {}. Both must be > 0",
                acceleration, deceleration
            ),
            ConfigError::InvalidMaxVoltage { requested, limit } => {
                write!(f, "Invalid max voltage {} mV. Must be 0..={} mV", requested, limit)
            }
            ConfigError::InvalidSupplyVoltage(v) => {
                write!(f, "Invalid supply voltage: {} mV. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "PWM or GPIO pin operation failed"),
            MotorError::NotAttached(port) => write!(f, "No motor attached to port {}", port),
            MotorError::InvalidMaxVoltage { requested, limit } => {
                write!(f, "Invalid max voltage {} mV. Must be 0..={} mV", requested, limit)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<TrajectoryError> for Error {
    fn from(e: TrajectoryError) -> Self {
        Error::Trajectory(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for TrajectoryError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let e = TrajectoryError::InvalidDuration { duration: -5, max_ms: 900_000 };
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);

        let e = TrajectoryError::NegativeSegment { segment: 2, duration: -1 };
        assert_eq!(e.kind(), ErrorKind::Failed);
    }

    #[test]
    fn test_conversion() {
        let e: Error = TrajectoryError::TooLong { estimated_ms: 1, max_ms: 0 }.into();
        assert!(matches!(e, Error::Trajectory(TrajectoryError::TooLong { .. })));
    }
}
