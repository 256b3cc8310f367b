//! Acknowledged commands.
//!
//! A record store mutation is one command answered by one reply. The host's
//! liveness is checked before anything is sent; a dead host short-circuits
//! with [`DeviceError::Unresponsive`]. Failures after sending surface as
//! [`DeviceError::Io`].

use crate::error::{DeviceError, DeviceResult};
use tracing::{debug, warn};
use tudor_ipc::{Command, HostChannel, Reply};

/// Fails with [`DeviceError::Unresponsive`] if the host process is gone.
pub fn ensure_host_alive(channel: &dyn HostChannel) -> DeviceResult<()> {
    if channel.is_alive() {
        Ok(())
    } else {
        warn!("Host process is dead, not sending command");
        Err(DeviceError::Unresponsive)
    }
}

/// Sends `command` and waits for its reply, which must have the shape the
/// command expects.
///
/// Callers are expected to have run [`ensure_host_alive`] first.
pub async fn await_ack(channel: &dyn HostChannel, command: Command) -> DeviceResult<Reply> {
    debug!("Sending {} command to host", command.name());

    let reply = match channel.send_and_await_ack(command.clone()).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Host failed to acknowledge {} command: {}", command.name(), e);
            return Err(e.into());
        }
    };
    let reply = command.check_reply(reply).inspect_err(|e| {
        warn!("Malformed reply to {} command: {}", command.name(), e);
    })?;

    debug!("Host acknowledged {} command", command.name());
    Ok(reply)
}
