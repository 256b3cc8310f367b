//! Pairing data transfer.
//!
//! The sensor's pairing data is secret material the sandboxed driver may
//! hold in memory but never persist itself. It is fetched from and written
//! back to the host with one method call each.

use crate::error::DeviceResult;
use tracing::info;
use tudor_ipc::{
    HostChannel, IpcError, LOAD_PAIRING_DATA_METHOD, LOAD_PAIRING_DATA_REPLY,
    STORE_PAIRING_DATA_METHOD,
};
use std::mem;
use tudor_types::{Value, ValueError};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Opaque pairing data for one sensor, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PairingData {
    bytes: Vec<u8>,
}

impl PairingData {
    /// Takes ownership of raw pairing data.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for PairingData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl std::fmt::Debug for PairingData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairingData")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Asks the host for the pairing data stored for `sensor_name`.
///
/// Returns `Ok(None)` if the host has none; any payload sent along with a
/// negative answer is discarded.
pub async fn load_pairing_data(
    channel: &dyn HostChannel,
    sensor_name: &str,
) -> DeviceResult<Option<PairingData>> {
    let args = sensor_args(sensor_name, None)?;
    let mut reply = channel.call(LOAD_PAIRING_DATA_METHOD, &args).await?;

    let got = reply.signature();
    let fields: &mut [Value] = match &mut reply {
        Value::Tuple(fields) if got == LOAD_PAIRING_DATA_REPLY => fields.as_mut_slice(),
        _ => &mut [],
    };
    // Move the payload out so the only copy ends up in `PairingData`.
    let parts = match fields {
        [Value::Bool(has_data), Value::Bytes(payload)] => Some((*has_data, mem::take(payload))),
        _ => None,
    };
    reply.zeroize();
    let Some((has_data, mut payload)) = parts else {
        return Err(IpcError::UnexpectedReply {
            expected: LOAD_PAIRING_DATA_REPLY.to_string(),
            got,
        }
        .into());
    };

    if !has_data {
        payload.zeroize();
        info!("Loaded pairing data for tudor sensor '{}' - no stored data", sensor_name);
        return Ok(None);
    }

    let data = PairingData::from_bytes(payload);
    info!(
        "Loaded pairing data for tudor sensor '{}' - {} bytes",
        sensor_name,
        data.len()
    );
    Ok(Some(data))
}

/// Hands `data` to the host to persist for `sensor_name`.
///
/// Either the host has durably stored the whole blob when this returns
/// `Ok`, or the previously stored data is to be assumed unchanged.
pub async fn store_pairing_data(
    channel: &dyn HostChannel,
    sensor_name: &str,
    data: &PairingData,
) -> DeviceResult<()> {
    let args = Zeroizing::new(sensor_args(sensor_name, Some(data))?);
    channel.call(STORE_PAIRING_DATA_METHOD, &args).await?;

    info!(
        "Stored pairing data for tudor sensor '{}' - {} bytes",
        sensor_name,
        data.len()
    );
    Ok(())
}

/// Builds the `(s)` or `(say)` argument tuple for a pairing call.
///
/// The sensor name is sent NUL-terminated, so one containing a NUL cannot
/// be addressed and nothing is sent.
fn sensor_args(sensor_name: &str, data: Option<&PairingData>) -> DeviceResult<Value> {
    if sensor_name.contains('\0') {
        return Err(IpcError::Value(ValueError::InteriorNul).into());
    }
    let mut fields = vec![Value::from(sensor_name)];
    if let Some(data) = data {
        fields.push(Value::Bytes(data.as_bytes().to_vec()));
    }
    Ok(Value::Tuple(fields))
}
