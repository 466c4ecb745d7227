//! Motion module for servo-trajectory.
//!
//! Provides per-axis maneuver tracking and multi-axis synchronization.

mod axis;
mod sync;

pub use axis::AxisTracker;
pub use sync::{synchronize, synchronize_axes};
