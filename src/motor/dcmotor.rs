//! DC motor driver.
//!
//! Generic over embedded-hal 1.0 PWM and pin types. The PWM channel sets the
//! magnitude, the DIR pin sets the polarity.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use serde::Deserialize;

use crate::config::AxisConfig;
use crate::error::{MotorError, Result};

use super::port::Direction;

/// Motor hardware family, which bounds the allowed voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorKind {
    /// Regular motors, rated for 9 V.
    #[default]
    Standard,
    /// Small motors, rated for 6 V.
    Small,
}

impl MotorKind {
    /// Highest voltage the motor may be driven with, in millivolts.
    #[inline]
    pub const fn voltage_limit_mv(self) -> i32 {
        match self {
            MotorKind::Standard => 9000,
            MotorKind::Small => 6000,
        }
    }
}

/// DC motor on a PWM channel and a direction pin.
///
/// Generic over:
/// - `PWM`: duty cycle output (must implement `SetDutyCycle`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
pub struct DcMotor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    pwm: PWM,

    /// DIR pin (high = positive voltage at the terminals).
    dir_pin: DIR,

    /// Rotation that counts as positive.
    direction: Direction,

    kind: MotorKind,

    /// Voltage bound in millivolts.
    max_voltage_mv: i32,

    /// Supply voltage used to turn voltage into duty cycle.
    supply_mv: i32,

    /// Last applied voltage, in the axis' own sign convention.
    voltage_mv: i32,

    coasting: bool,

    /// DIR pin level (cached to avoid unnecessary pin writes).
    dir_high: Option<bool>,
}

impl<PWM, DIR> DcMotor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    /// Create a coasting motor allowed the full voltage of its kind.
    pub fn new(pwm: PWM, dir_pin: DIR, direction: Direction, kind: MotorKind, supply_mv: i32) -> Self {
        Self {
            pwm,
            dir_pin,
            direction,
            kind,
            max_voltage_mv: kind.voltage_limit_mv(),
            supply_mv,
            voltage_mv: 0,
            coasting: true,
            dir_high: None,
        }
    }

    /// Create a motor from an axis configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaxVoltage` if the configured voltage exceeds what the
    /// motor kind allows.
    pub fn from_config(pwm: PWM, dir_pin: DIR, config: &AxisConfig, supply_mv: i32) -> Result<Self> {
        let mut motor = Self::new(pwm, dir_pin, config.direction, config.kind, supply_mv);
        motor.set_max_voltage(config.max_voltage_mv())?;
        Ok(motor)
    }

    /// Drive the motor at `voltage_mv`, clamped to the maximum voltage.
    ///
    /// Positive voltage turns the shaft in the configured positive
    /// direction.
    pub fn set_voltage(&mut self, voltage_mv: i32) -> Result<()> {
        let voltage = voltage_mv.clamp(-self.max_voltage_mv, self.max_voltage_mv);
        let terminal = voltage * self.direction.sign();

        self.set_dir(terminal >= 0)?;

        let max_duty = self.pwm.max_duty_cycle();
        let duty = (terminal.unsigned_abs() as u64 * max_duty as u64 / self.supply_mv.max(1) as u64)
            .min(max_duty as u64) as u16;
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| MotorError::PinError)?;

        trace!("voltage {} mV, duty {}/{}", voltage, duty, max_duty);
        self.voltage_mv = voltage;
        self.coasting = false;
        Ok(())
    }

    /// Stop driving the motor and let it spin freely.
    pub fn coast(&mut self) -> Result<()> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| MotorError::PinError)?;
        self.voltage_mv = 0;
        self.coasting = true;
        Ok(())
    }

    /// Change the voltage bound.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaxVoltage` if `max_voltage_mv` is negative or above
    /// the limit of the motor kind.
    pub fn set_max_voltage(&mut self, max_voltage_mv: i32) -> Result<()> {
        let limit = self.kind.voltage_limit_mv();
        if !(0..=limit).contains(&max_voltage_mv) {
            warn!("max voltage {} mV rejected, limit {} mV", max_voltage_mv, limit);
            return Err(MotorError::InvalidMaxVoltage {
                requested: max_voltage_mv,
                limit,
            }
            .into());
        }
        self.max_voltage_mv = max_voltage_mv;
        Ok(())
    }

    /// Get the voltage bound in millivolts.
    #[inline]
    pub fn max_voltage(&self) -> i32 {
        self.max_voltage_mv
    }

    /// Get the last applied voltage in millivolts.
    #[inline]
    pub fn voltage(&self) -> i32 {
        self.voltage_mv
    }

    /// Check if the motor is coasting.
    #[inline]
    pub fn is_coasting(&self) -> bool {
        self.coasting
    }

    /// Give back the PWM channel and DIR pin.
    pub fn release(self) -> (PWM, DIR) {
        (self.pwm, self.dir_pin)
    }

    fn set_dir(&mut self, high: bool) -> Result<()> {
        if self.dir_high == Some(high) {
            return Ok(());
        }

        if high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.dir_high = Some(high);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::pwm::ErrorType;

    struct Pwm(u16);

    impl ErrorType for Pwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for Pwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
            self.0 = duty;
            Ok(())
        }
    }

    struct Pin(bool);

    impl PinErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    fn motor(direction: Direction) -> DcMotor<Pwm, Pin> {
        DcMotor::new(Pwm(0), Pin(false), direction, MotorKind::Standard, 9000)
    }

    #[test]
    fn test_voltage_to_duty() {
        let mut m = motor(Direction::Clockwise);
        m.set_voltage(4500).unwrap();
        assert_eq!(m.voltage(), 4500);
        assert!(!m.is_coasting());

        let (pwm, pin) = m.release();
        assert_eq!(pwm.0, 500);
        assert!(pin.0);
    }

    #[test]
    fn test_voltage_clamped() {
        let mut m = motor(Direction::Clockwise);
        m.set_max_voltage(3000).unwrap();
        m.set_voltage(-9000).unwrap();
        assert_eq!(m.voltage(), -3000);

        let (pwm, pin) = m.release();
        assert_eq!(pwm.0, 333);
        assert!(!pin.0);
    }

    #[test]
    fn test_counterclockwise_flips_polarity() {
        let mut m = motor(Direction::CounterClockwise);
        m.set_voltage(9000).unwrap();
        let (pwm, pin) = m.release();
        assert_eq!(pwm.0, 1000);
        assert!(!pin.0);
    }

    #[test]
    fn test_coast() {
        let mut m = motor(Direction::Clockwise);
        m.set_voltage(1000).unwrap();
        m.coast().unwrap();
        assert!(m.is_coasting());
        assert_eq!(m.voltage(), 0);
        assert_eq!(m.release().0 .0, 0);
    }

    #[test]
    fn test_max_voltage_bounds() {
        let mut m = DcMotor::new(Pwm(0), Pin(false), Direction::Clockwise, MotorKind::Small, 9000);
        assert_eq!(m.max_voltage(), 6000);
        assert!(m.set_max_voltage(-1).is_err());
        assert!(matches!(
            m.set_max_voltage(7000),
            Err(crate::error::Error::Motor(MotorError::InvalidMaxVoltage { limit: 6000, .. }))
        ));
        assert!(m.set_max_voltage(6000).is_ok());
    }
}
