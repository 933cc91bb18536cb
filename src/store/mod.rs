pub mod disk;
pub mod memory;

use anyhow::Result;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Durable storage holding whole snapshots under named slots.
///
/// A write replaces the slot's previous contents entirely.
pub trait SnapshotStore: Send + Sync {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, slot: &str, bytes: &[u8]) -> Result<()>;
}
