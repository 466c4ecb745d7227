//! Configuration module for servo-trajectory.
//!
//! Provides types for loading and validating axis configurations from TOML
//! files (with `std` feature) or pre-parsed data.

mod axis;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod system;
mod validation;

pub use axis::AxisConfig;
pub use limits::AxisLimits;
pub use system::{SystemConfig, DEFAULT_SUPPLY_MV};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
