//! Sandboxed side of the tudor fingerprint driver's record storage.
//!
//! The driver cannot touch the sensor's pairing secrets or its enrollment
//! record store. Both live in a trusted host process; this crate keeps a
//! session with that host and a local mirror of its records.
//!
//! # Operations
//!
//! - **Pairing data**: load and store the opaque per-sensor blob
//! - **Delete**: remove the host record behind a device-stored print
//! - **Clear storage**: remove every host record
//! - **Refresh**: rebuild the local mirror from the host's listing
//!
//! Every record store mutation follows the same path: check the host is
//! alive, send one command, wait for one reply, and only then touch the
//! local cache. A failure at any step leaves the cache untouched.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tudor_device::{DeviceSession, SessionConfig};
//! use tudor_ipc::MockHost;
//!
//! let host = Arc::new(MockHost::new());
//! let session = DeviceSession::new(host, SessionConfig::for_sensor("synaTudor0"));
//! assert!(session.records().is_empty());
//! ```

mod cache;
mod command;
mod config;
mod error;
mod pairing;
mod session;

pub use cache::RecordCache;
pub use command::{await_ack, ensure_host_alive};
pub use config::{SessionConfig, DRIVER_ID};
pub use error::{DeviceError, DeviceResult};
pub use pairing::{load_pairing_data, store_pairing_data, PairingData};
pub use session::DeviceSession;
