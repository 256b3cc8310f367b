//! Record identifiers and finger tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Size of a record GUID in bytes.
pub const GUID_SIZE: usize = 16;

/// Identifier of one enrolled print inside the host's record store.
///
/// GUIDs are assigned by the host and compared byte-wise; no particular
/// UUID version or byte order is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordGuid(Uuid);

impl RecordGuid {
    /// Creates a random GUID. Real GUIDs come from the host; this is for
    /// host doubles and tests.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a GUID from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; GUID_SIZE]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Creates a GUID from a slice, failing unless it is exactly
    /// [`GUID_SIZE`] bytes long.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; GUID_SIZE] = bytes.try_into().ok()?;
        Some(Self::from_bytes(bytes))
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; GUID_SIZE] {
        self.0.as_bytes()
    }
}

impl Default for RecordGuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which physical finger a record belongs to.
///
/// Stored as the raw byte used on the wire. `0` means unknown, `1..=10`
/// enumerate the digits from the left thumb to the right little finger.
/// Values outside that range are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerTag(u8);

impl FingerTag {
    pub const UNKNOWN: Self = Self(0);
    pub const LEFT_THUMB: Self = Self(1);
    pub const LEFT_INDEX: Self = Self(2);
    pub const LEFT_MIDDLE: Self = Self(3);
    pub const LEFT_RING: Self = Self(4);
    pub const LEFT_LITTLE: Self = Self(5);
    pub const RIGHT_THUMB: Self = Self(6);
    pub const RIGHT_INDEX: Self = Self(7);
    pub const RIGHT_MIDDLE: Self = Self(8);
    pub const RIGHT_RING: Self = Self(9);
    pub const RIGHT_LITTLE: Self = Self(10);

    const NAMES: [&'static str; 11] = [
        "unknown",
        "left-thumb",
        "left-index",
        "left-middle",
        "left-ring",
        "left-little",
        "right-thumb",
        "right-index",
        "right-middle",
        "right-ring",
        "right-little",
    ];

    /// Wraps a raw finger byte.
    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw finger byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Whether the tag is one of the eleven defined values.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.0 <= Self::RIGHT_LITTLE.0
    }

    /// Human-readable name, if the tag is known.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES.get(usize::from(self.0)).copied()
    }
}

impl From<u8> for FingerTag {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FingerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "finger#{}", self.0),
        }
    }
}
