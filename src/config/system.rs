//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::motor::Port;

use super::axis::AxisConfig;

/// Supply voltage assumed when the configuration does not give one.
pub const DEFAULT_SUPPLY_MV: i32 = 7200;

fn default_supply_mv() -> i32 {
    DEFAULT_SUPPLY_MV
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 8>,

    /// Nominal supply voltage in millivolts, used to turn voltage into duty
    /// cycle.
    #[serde(default = "default_supply_mv")]
    pub nominal_supply_mv: i32,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get an axis configuration by name, with error if not found.
    pub fn require_axis(&self, name: &str) -> Result<&AxisConfig> {
        self.axis(name).ok_or_else(|| {
            ConfigError::AxisNotFound(String::try_from(name).unwrap_or_default()).into()
        })
    }

    /// Get the axis configured on `port`.
    pub fn axis_on(&self, port: Port) -> Option<(&str, &AxisConfig)> {
        self.axes
            .iter()
            .find(|(_, v)| v.port == port)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            axes: FnvIndexMap::new(),
            nominal_supply_mv: DEFAULT_SUPPLY_MV,
        }
    }
}
