//! File-backed storage backend: one JSON file per slot key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::LedgerError;
use crate::infra::storage::StorageBackend;

/// Storage backend persisting each slot as `<data_dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `data_dir`, creating the directory if
    /// needed. A directory that cannot be created is reported as a backend
    /// error; the gateway probe downgrades that to unavailable.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .map_err(|e| LedgerError::Backend(format!("create {}: {e}", data_dir.display())))?;
        Ok(Self { data_dir })
    }

    /// Directory holding the slot files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::Backend(format!("read slot {key}: {e}"))),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let path = self.slot_path(key);
        // Write via a temp file then rename so a crash mid-write cannot
        // leave a truncated slot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| LedgerError::Backend(format!("write slot {key}: {e}")))?;
        fs::rename(&tmp, &path)
            .map_err(|e| LedgerError::Backend(format!("commit slot {key}: {e}")))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LedgerError::Backend(format!("remove slot {key}: {e}"))),
        }
    }

    fn used_bytes(&self) -> u64 {
        fs::read_dir(&self.data_dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter_map(|entry| entry.metadata().ok())
                    .filter(|meta| meta.is_file())
                    .map(|meta| meta.len())
                    .sum()
            })
            .unwrap_or(0)
    }
}
