//! Error types for the host channel.

use thiserror::Error;
use tudor_types::ValueError;

/// Result type for host channel operations.
pub type IpcResult<T> = Result<T, IpcError>;

/// Errors that can occur while talking to the host process.
#[derive(Debug, Error)]
pub enum IpcError {
    /// The host process exited or was found dead while a request was pending.
    #[error("host process died")]
    HostDied,

    /// The channel to the host was closed.
    #[error("channel closed")]
    ChannelClosed,

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The host answered a method call with an error.
    #[error("host method {method} failed: {message}")]
    MethodFailed { method: String, message: String },

    /// The reply did not have the shape the request expects.
    #[error("unexpected reply: expected {expected}, got {got}")]
    UnexpectedReply { expected: String, got: String },

    /// A structured value could not be (de)serialized.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A tagged message could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IpcError {
    /// Whether the error means the host is gone for good.
    pub fn is_host_dead(&self) -> bool {
        matches!(self, Self::HostDied | Self::ChannelClosed)
    }
}
