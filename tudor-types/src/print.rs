//! Print metadata as seen by the driver.

use crate::record::{PrintIdentity, Record};
use crate::value::Value;

/// Metadata of an application-level print object.
pub trait PrintMetadata {
    /// Identifier of the driver that produced the print.
    fn driver(&self) -> &str;

    /// Whether the print lives in the device's record store rather than
    /// being a host-independent template.
    fn is_device_stored(&self) -> bool;

    /// Driver-private metadata attached to the print.
    fn data(&self) -> Option<&Value>;
}

/// A plain print object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Print {
    driver: String,
    device_stored: bool,
    data: Option<Value>,
}

impl Print {
    /// Creates a print with no metadata that is not device-stored.
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            device_stored: false,
            data: None,
        }
    }

    /// Creates a device-stored print describing a host record.
    pub fn for_record(driver: impl Into<String>, record: &Record, reserved: &[u8]) -> Self {
        Self::new(driver)
            .with_device_stored(true)
            .with_data(record.identity().to_value(reserved))
    }

    /// Sets whether the print lives in the sensor's on-device storage.
    pub fn with_device_stored(mut self, device_stored: bool) -> Self {
        self.device_stored = device_stored;
        self
    }

    /// Attaches the driver-specific metadata value.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Shorthand for [`PrintIdentity::from_print`].
    pub fn identity(&self, driver_id: &str) -> Option<PrintIdentity> {
        PrintIdentity::from_print(self, driver_id)
    }
}

impl PrintMetadata for Print {
    fn driver(&self) -> &str {
        &self.driver
    }

    fn is_device_stored(&self) -> bool {
        self.device_stored
    }

    fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}
