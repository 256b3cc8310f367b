//! Host process channel for the tudor driver.
//!
//! The driver runs sandboxed and cannot reach the sensor's pairing secrets or
//! the record store on its own. A trusted host process owns both; this crate
//! defines how the driver talks to it.
//!
//! # Components
//!
//! - **Protocol**: method names and signatures for pairing data calls, and
//!   the tagged [`Command`]/[`Reply`] messages for the record store
//! - **Transport**: the [`HostChannel`] trait, plus an in-memory
//!   [`MockHost`] for tests

mod error;
pub mod protocol;
pub mod transport;

pub use error::{IpcError, IpcResult};
pub use protocol::{
    Command, Reply, LOAD_PAIRING_DATA_ARGS, LOAD_PAIRING_DATA_METHOD, LOAD_PAIRING_DATA_REPLY,
    STORE_PAIRING_DATA_ARGS, STORE_PAIRING_DATA_METHOD,
};
pub use transport::mock::MockHost;
pub use transport::HostChannel;
