//! Device session.
//!
//! A session owns the host channel, the configuration and the record cache
//! for one sensor. Operations that mutate the host's record store take
//! `&mut self`, so at most one acknowledged command is ever in flight.

use crate::cache::RecordCache;
use crate::command::{await_ack, ensure_host_alive};
use crate::config::SessionConfig;
use crate::error::{DeviceError, DeviceResult};
use crate::pairing::{self, PairingData};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tudor_ipc::{Command, HostChannel, IpcError, Reply};
use tudor_types::{PrintIdentity, PrintMetadata, Record};

/// Driver-side state for one sensor.
pub struct DeviceSession {
    channel: Arc<dyn HostChannel>,
    config: SessionConfig,
    records: RecordCache,
}

impl DeviceSession {
    /// Creates a session with an empty record cache.
    pub fn new(channel: Arc<dyn HostChannel>, config: SessionConfig) -> Self {
        Self {
            channel,
            config,
            records: RecordCache::new(),
        }
    }

    /// Seeds the record cache, e.g. from an earlier listing.
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = RecordCache::from_records(records);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn driver_id(&self) -> &str {
        &self.config.driver_id
    }

    pub fn sensor_name(&self) -> &str {
        &self.config.sensor_name
    }

    /// The records the driver believes the host holds.
    pub fn records(&self) -> &RecordCache {
        &self.records
    }

    /// Extracts the record identity of a print, if it belongs to this driver
    /// and is device-stored.
    pub fn print_identity<P: PrintMetadata + ?Sized>(&self, print: &P) -> Option<PrintIdentity> {
        PrintIdentity::from_print(print, &self.config.driver_id)
    }

    /// Local existence hint; the host may know better.
    pub fn has_record(&self, identity: &PrintIdentity) -> bool {
        self.records.contains(identity)
    }

    /// Records an enrollment the host has already confirmed.
    pub fn insert_record(&mut self, record: Record) {
        debug!("Caching record {}", record);
        self.records.insert(record);
    }

    // ── Pairing data ─────────────────────────────────────────────

    /// Loads this sensor's pairing data from the host.
    pub async fn load_pairing_data(&self) -> DeviceResult<Option<PairingData>> {
        pairing::load_pairing_data(self.channel.as_ref(), &self.config.sensor_name).await
    }

    /// Persists this sensor's pairing data on the host.
    pub async fn store_pairing_data(&self, data: &PairingData) -> DeviceResult<()> {
        pairing::store_pairing_data(self.channel.as_ref(), &self.config.sensor_name, data).await
    }

    // ── Record store ─────────────────────────────────────────────

    /// Deletes the host record behind `print`.
    ///
    /// On success one matching cache entry is dropped. A missing cache entry
    /// is not an error: the host's answer is what counts.
    pub async fn delete<P: PrintMetadata + ?Sized>(&mut self, print: &P) -> DeviceResult<()> {
        ensure_host_alive(self.channel.as_ref())?;

        let Some(identity) = self.print_identity(print) else {
            warn!("Print to delete carries no record identity for this driver");
            return Err(DeviceError::DataInvalid(
                "print is not a device-stored print of this driver".into(),
            ));
        };

        await_ack(self.channel.as_ref(), Command::delete_record(&identity)).await?;

        match self.records.remove_first(&identity) {
            Some(record) => debug!("Removed record {} from cache", record),
            None => debug!(
                "Deleted record {} ({}) was not cached",
                identity.guid, identity.finger
            ),
        }
        Ok(())
    }

    /// Deletes every record on the host and empties the cache.
    pub async fn clear_storage(&mut self) -> DeviceResult<()> {
        ensure_host_alive(self.channel.as_ref())?;
        await_ack(self.channel.as_ref(), Command::ClearRecords).await?;

        debug!("Cleared {} cached records", self.records.len());
        self.records.clear();
        Ok(())
    }

    /// Rebuilds the cache from the host's listing.
    pub async fn refresh_records(&mut self) -> DeviceResult<()> {
        ensure_host_alive(self.channel.as_ref())?;
        let reply = await_ack(self.channel.as_ref(), Command::ListRecords).await?;

        let records = match reply {
            Reply::Records { records } => records,
            other => {
                return Err(IpcError::UnexpectedReply {
                    expected: Command::ListRecords.expected_reply().to_string(),
                    got: other.name().to_string(),
                }
                .into());
            }
        };
        info!("Host reports {} stored records", records.len());
        self.records.replace(records);
        Ok(())
    }
}

impl std::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSession")
            .field("config", &self.config)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
