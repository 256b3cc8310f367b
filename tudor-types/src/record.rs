//! Host records and the identity blob embedded in device-stored prints.

use crate::ids::{FingerTag, RecordGuid};
use crate::print::PrintMetadata;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature of the identity blob: `(reserved, finger, guid)`.
pub const RECORD_SIGNATURE: &str = "(ayyay)";

/// A record known to exist in the host's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub guid: RecordGuid,
    pub finger: FingerTag,
}

impl Record {
    pub fn new(guid: RecordGuid, finger: FingerTag) -> Self {
        Self { guid, finger }
    }

    /// The identity this record is matched against.
    pub fn identity(&self) -> PrintIdentity {
        PrintIdentity {
            guid: self.guid,
            finger: self.finger,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.guid, self.finger)
    }
}

impl PartialEq<PrintIdentity> for Record {
    fn eq(&self, other: &PrintIdentity) -> bool {
        self.guid == other.guid && self.finger == other.finger
    }
}

/// The (GUID, finger) pair carried in a print's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrintIdentity {
    pub guid: RecordGuid,
    pub finger: FingerTag,
}

impl PrintIdentity {
    /// Decodes an identity from a `(ayyay)` value.
    ///
    /// Returns `None` if the value has any other shape, or if the GUID array
    /// is not exactly 16 bytes. The GUID is never truncated or padded.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_of_type(RECORD_SIGNATURE) {
            return None;
        }
        let [_reserved, finger, guid] = value.as_tuple()? else {
            return None;
        };

        let finger = FingerTag::from_u8(finger.as_byte()?);
        let guid = RecordGuid::from_slice(guid.as_bytes()?)?;
        Some(Self { guid, finger })
    }

    /// Encodes the identity as a `(ayyay)` value with the given reserved
    /// prefix.
    pub fn to_value(&self, reserved: &[u8]) -> Value {
        Value::Tuple(vec![
            Value::Bytes(reserved.to_vec()),
            Value::Byte(self.finger.as_u8()),
            Value::Bytes(self.guid.as_bytes().to_vec()),
        ])
    }

    /// Extracts the identity of a print owned by `driver_id`.
    ///
    /// The print must belong to this driver and be stored on the device;
    /// otherwise its metadata is not looked at.
    pub fn from_print<P: PrintMetadata + ?Sized>(print: &P, driver_id: &str) -> Option<Self> {
        if print.driver() != driver_id {
            return None;
        }
        if !print.is_device_stored() {
            return None;
        }
        Self::from_value(print.data()?)
    }
}

impl From<PrintIdentity> for Record {
    fn from(identity: PrintIdentity) -> Self {
        Self {
            guid: identity.guid,
            finger: identity.finger,
        }
    }
}
