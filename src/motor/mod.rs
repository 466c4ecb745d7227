//! Motor module for servo-trajectory.
//!
//! Provides the DC motor actuation wrapper and the per-port motor table.

mod dcmotor;
mod port;
mod ports;

pub use dcmotor::{DcMotor, MotorKind};
pub use port::{Direction, Port};
pub use ports::MotorPorts;
