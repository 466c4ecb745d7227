//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use servo_trajectory::load_config;
///
/// let config = load_config("drivebase.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::{Direction, Port};

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[axes.arm]
name = "Arm"
port = "C"

[axes.arm.limits]
speed_max = 1000
acceleration = 2000
deceleration = 2000
"#;

        let config = parse_config(toml).unwrap();
        let arm = config.axis("arm").unwrap();
        assert_eq!(arm.port, Port::C);
        assert_eq!(arm.direction, Direction::Clockwise);
        assert_eq!(arm.max_voltage_mv(), 9000);
        assert_eq!(config.nominal_supply_mv, 7200);
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        let toml = r#"
[axes.arm]
name = "Arm"
port = "Q"

[axes.arm.limits]
speed_max = 1000
acceleration = 2000
deceleration = 2000
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/servo.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
