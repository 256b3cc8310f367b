//! Session configuration.

use crate::error::{DeviceError, DeviceResult};
use serde::{Deserialize, Serialize};

/// Identifier the driver stamps on the prints it produces.
pub const DRIVER_ID: &str = "tudor";

/// Configuration for a device session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Driver identifier prints must carry to be accepted.
    pub driver_id: String,
    /// Logical sensor name, used as the pairing data key on the host.
    pub sensor_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            driver_id: DRIVER_ID.to_string(),
            sensor_name: "default".to_string(),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration for the named sensor.
    pub fn for_sensor(sensor_name: impl Into<String>) -> Self {
        Self {
            sensor_name: sensor_name.into(),
            ..Default::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// The sensor name travels to the host as a NUL-terminated string, so a
    /// name containing a NUL is rejected here.
    pub fn from_json(json: &str) -> DeviceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.sensor_name.contains('\0') {
            return Err(DeviceError::Config(serde::de::Error::custom(
                "sensor_name contains a NUL byte",
            )));
        }
        Ok(config)
    }
}
