//! Messages exchanged with the host process.
//!
//! Two kinds of traffic share the channel:
//! 1. Method calls (pairing data load/store) carrying structured values
//! 2. Acknowledged commands that mutate the host's record store
//!
//! Commands and replies are tagged messages: each serializes as an object
//! with a `type` field naming the variant. Framing is left to the transport.

use crate::error::{IpcError, IpcResult};
use serde::{Deserialize, Serialize};
use tudor_types::{FingerTag, PrintIdentity, Record, RecordGuid};

/// Host method returning the stored pairing data for a sensor.
pub const LOAD_PAIRING_DATA_METHOD: &str = "LoadPairingData";

/// Host method persisting pairing data for a sensor.
pub const STORE_PAIRING_DATA_METHOD: &str = "StorePairingData";

/// Argument signature of [`LOAD_PAIRING_DATA_METHOD`]: `(sensor_name)`.
pub const LOAD_PAIRING_DATA_ARGS: &str = "(s)";

/// Reply signature of [`LOAD_PAIRING_DATA_METHOD`]: `(has_data, payload)`.
pub const LOAD_PAIRING_DATA_REPLY: &str = "(bay)";

/// Argument signature of [`STORE_PAIRING_DATA_METHOD`]: `(sensor_name, payload)`.
pub const STORE_PAIRING_DATA_ARGS: &str = "(say)";

/// A command for the host's record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Delete one record.
    DeleteRecord { guid: RecordGuid, finger: FingerTag },

    /// Delete every record.
    ClearRecords,

    /// Enumerate every record.
    ListRecords,
}

impl Command {
    /// Creates a delete command for the given identity.
    pub fn delete_record(identity: &PrintIdentity) -> Self {
        Self::DeleteRecord {
            guid: identity.guid,
            finger: identity.finger,
        }
    }

    /// Short name of the command, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeleteRecord { .. } => "delete_record",
            Self::ClearRecords => "clear_records",
            Self::ListRecords => "list_records",
        }
    }

    /// Name of the reply variant this command must be answered with.
    pub fn expected_reply(&self) -> &'static str {
        match self {
            Self::DeleteRecord { .. } | Self::ClearRecords => "ack",
            Self::ListRecords => "records",
        }
    }

    /// Checks that `reply` has the shape this command expects.
    pub fn check_reply(&self, reply: Reply) -> IpcResult<Reply> {
        if reply.name() != self.expected_reply() {
            return Err(IpcError::UnexpectedReply {
                expected: self.expected_reply().to_string(),
                got: reply.name().to_string(),
            });
        }
        Ok(reply)
    }

    /// Encodes the command as a tagged message.
    pub fn encode(&self) -> IpcResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a command from a tagged message.
    pub fn decode(bytes: &[u8]) -> IpcResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// The host's answer to a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// The command was carried out and persisted.
    Ack,

    /// Every record currently in the host's store.
    Records { records: Vec<Record> },
}

impl Reply {
    /// Short name of the reply, matching its wire tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ack => "ack",
            Self::Records { .. } => "records",
        }
    }

    /// Encodes the reply as a tagged message.
    pub fn encode(&self) -> IpcResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a reply from a tagged message.
    pub fn decode(bytes: &[u8]) -> IpcResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
