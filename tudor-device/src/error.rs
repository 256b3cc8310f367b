//! Error types for device operations.

use thiserror::Error;
use tudor_ipc::IpcError;

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors a device operation completes with.
///
/// None of these are retried internally. Whatever the error, the record
/// cache is left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The host process was already dead; nothing was sent.
    #[error("device unresponsive: host process is not running")]
    Unresponsive,

    /// The print does not carry a usable record identity for this driver.
    #[error("invalid print data: {0}")]
    DataInvalid(String),

    /// The request failed in flight or the reply was malformed.
    #[error("I/O failure: {0}")]
    Io(#[from] IpcError),

    /// The session configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
