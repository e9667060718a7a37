//! Infrastructure adapters: storage backends and the persistence gateway.

pub mod persistence;
pub mod storage;

pub use persistence::{ExportDocument, PersistenceManager, StorageInfo, SCHEMA_VERSION};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
