//! Core type definitions for the tudor driver.
//!
//! This crate defines the types shared between the sandboxed driver and its
//! host process:
//! - Record identifiers (16-byte GUIDs) and finger tags
//! - The structured value tree used for print metadata and host calls,
//!   together with its binary serialization
//! - Print identities and the print metadata interface they are read from
//!
//! Nothing in here performs I/O.

mod ids;
mod print;
mod record;
mod value;

pub use ids::{FingerTag, RecordGuid, GUID_SIZE};
pub use print::{Print, PrintMetadata};
pub use record::{PrintIdentity, Record, RECORD_SIGNATURE};
pub use value::{Value, ValueType};

/// Result type alias for structured value operations.
pub type ValueResult<T> = std::result::Result<T, ValueError>;

/// Errors that can occur while parsing signatures or (de)serializing values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid type signature: {0:?}")]
    InvalidSignature(String),

    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("string is not NUL-terminated or contains an interior NUL")]
    BadStringTerminator,

    #[error("string contains an interior NUL")]
    InteriorNul,

    #[error("unit tuple byte must be zero, got {0:#04x}")]
    InvalidUnit(u8),

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("framing offset {offset} out of bounds for container of {len} bytes")]
    InvalidOffset { offset: usize, len: usize },
}
