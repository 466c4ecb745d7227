//! Table of motors indexed by port.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{MotorError, Result};

use super::dcmotor::DcMotor;
use super::port::Port;

/// Motors attached to the hub, one optional slot per [`Port`].
///
/// Owned by the controller context and passed where needed; there is no
/// global motor table.
///
/// # Example
///
/// ```rust,ignore
/// use servo_trajectory::motor::{DcMotor, Direction, MotorKind, MotorPorts, Port};
///
/// let mut ports = MotorPorts::new();
/// ports.attach(Port::A, DcMotor::new(pwm_a, dir_a, Direction::Clockwise, MotorKind::Standard, 8300));
/// ports.get_mut(Port::A)?.set_voltage(4000)?;
/// ports.coast_all()?;
/// ```
pub struct MotorPorts<M> {
    slots: [Option<M>; Port::COUNT],
}

impl<M> MotorPorts<M> {
    /// Create a table with every port empty.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Attach a motor, returning whatever was attached to the port before.
    pub fn attach(&mut self, port: Port, motor: M) -> Option<M> {
        debug!("attaching motor to port {}", port.letter());
        self.slots[port.index()].replace(motor)
    }

    /// Detach and return the motor on `port`.
    pub fn detach(&mut self, port: Port) -> Option<M> {
        self.slots[port.index()].take()
    }

    /// Check if a motor is attached to `port`.
    pub fn is_attached(&self, port: Port) -> bool {
        self.slots[port.index()].is_some()
    }

    /// Get the motor on `port`.
    pub fn get(&self, port: Port) -> Option<&M> {
        self.slots[port.index()].as_ref()
    }

    /// Get the motor on `port` for actuation.
    ///
    /// # Errors
    ///
    /// Returns `NotAttached` if the port is empty.
    pub fn get_mut(&mut self, port: Port) -> Result<&mut M> {
        self.slots[port.index()]
            .as_mut()
            .ok_or_else(|| MotorError::NotAttached(port.letter()).into())
    }

    /// Iterate over attached motors in port order.
    pub fn iter(&self) -> impl Iterator<Item = (Port, &M)> {
        Port::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(port, slot)| slot.as_ref().map(|m| (*port, m)))
    }

    /// Get the number of attached motors.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if no motor is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M> Default for MotorPorts<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<PWM, DIR> MotorPorts<DcMotor<PWM, DIR>>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    /// Coast every attached motor.
    ///
    /// All motors are visited even if one fails; the first error is
    /// returned.
    pub fn coast_all(&mut self) -> Result<()> {
        let mut result = Ok(());
        for motor in self.slots.iter_mut().flatten() {
            if let Err(e) = motor.coast() {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}
