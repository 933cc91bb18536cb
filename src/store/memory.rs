use crate::store::SnapshotStore;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory snapshot store; contents are lost when it is dropped.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `bytes` already written to `slot`.
    pub fn with_slot(slot: &str, bytes: &[u8]) -> Self {
        let store = Self::new();
        store
            .slots
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(slot.to_string(), bytes.to_vec());
        store
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        debug!("Memory store READ for slot: {slot}");
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, bytes: &[u8]) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        debug!("Memory store WRITE for slot: {slot}");
        slots.insert(slot.to_string(), bytes.to_vec());
        Ok(())
    }
}
