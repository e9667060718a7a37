//! Storage backends for the persistence gateway.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::core::LedgerError;

/// Slot key for the persisted resource pool.
pub const KEY_RESOURCE_POOL: &str = "resource-pool";
/// Slot key for the persisted reservation collection.
pub const KEY_RESERVATIONS: &str = "reservations";
/// Slot key for the persisted application settings.
pub const KEY_SETTINGS: &str = "settings";

/// Durable key-value storage of JSON-encoded text.
///
/// Backends report failures as results; they never panic across this
/// boundary. Availability is probed by the gateway, not by the backend.
pub trait StorageBackend: Send {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;
    /// Write `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &str) -> Result<(), LedgerError>;
    /// Remove the value stored under `key`; absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<(), LedgerError>;
    /// Bytes currently consumed by stored values, for diagnostics.
    fn used_bytes(&self) -> u64;
}
