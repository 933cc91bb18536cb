use crate::store::SnapshotStore;
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "snapshots";

/// Snapshot store backed by a fjall keyspace on disk.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path.join("db"))
            .open()
            .with_context(|| format!("Failed to open database in {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open snapshot partition")?;
        debug!("Opened disk store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl SnapshotStore for DiskStore {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>> {
        let value = self.partition.get(slot)?;
        match &value {
            Some(bytes) => debug!("Read {} bytes from slot {slot}", bytes.len()),
            None => debug!("Slot {slot} is empty"),
        }
        Ok(value.map(|bytes| bytes.to_vec()))
    }

    fn write(&self, slot: &str, bytes: &[u8]) -> Result<()> {
        self.partition.insert(slot, bytes)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Wrote {} bytes to slot {slot}", bytes.len());
        Ok(())
    }
}
