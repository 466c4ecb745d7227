//! # servo-trajectory
//!
//! Fixed-point trapezoidal trajectory planning for servo and DC motor axes.
//!
//! ## Features
//!
//! - **Time and angle commands**: Run for a duration or to a target angle
//! - **Asymmetric profiles**: Independent acceleration and deceleration rates
//! - **Triangle resolution**: Short maneuvers collapse the cruise segment
//! - **Synchronization**: Stretch several axes onto a common timeline
//! - **Overflow-safe evaluation**: 64-bit sub-count angles, wrapping µs clock
//! - **embedded-hal 1.0**: DC motor wrapper over `SetDutyCycle` and `OutputPin`
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use servo_trajectory::{AxisLimits, AxisTracker, Angle};
//!
//! let mut axis = AxisTracker::new(AxisLimits::new(1000, 2000, 2000), now_us, Angle::ZERO);
//! axis.run_target(now_us, 360, 500, false)?;
//!
//! // Every control tick
//! let reference = axis.reference(now_us);
//! controller.track(reference.count(), reference.rate);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod log;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod trajectory;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, AxisLimits, SystemConfig};
pub use error::{Error, ErrorKind, Result};
pub use motion::{synchronize, synchronize_axes, AxisTracker};
pub use motor::{DcMotor, Direction, MotorKind, MotorPorts, Port};
pub use trajectory::{
    Angle, CommandBuilder, MotionPhase, Reference, Trajectory, TrajectoryCommand,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
