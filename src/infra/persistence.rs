//! Persistence gateway: durable storage of the pool, reservations, and
//! settings, with export/import/clear and an availability fallback.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{AppSettings, SettingsPatch};
use crate::core::model::{PersistedSnapshot, Reservation, ResourcePool, SnapshotPatch};
use crate::core::LedgerError;
use crate::infra::storage::{
    StorageBackend, KEY_RESERVATIONS, KEY_RESOURCE_POOL, KEY_SETTINGS,
};
use crate::util::clock::Clock;

/// Schema version stamped on persisted snapshots and exports.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Estimated capacity of the backing medium, for [`StorageInfo`] only.
const ESTIMATED_LIMIT_BYTES: u64 = 5 * 1024 * 1024;

const PROBE_KEY: &str = "__storage_probe__";

/// Versioned export document for out-of-band backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Persisted ledger data.
    pub data: PersistedSnapshot,
    /// Persisted application settings.
    pub settings: AppSettings,
    /// Milliseconds since epoch when the export was produced.
    pub exported_at: u128,
    /// Export format version.
    pub version: String,
}

/// Sections of an imported document; either may be absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportDocument {
    #[serde(default)]
    data: Option<SnapshotPatch>,
    #[serde(default)]
    settings: Option<SettingsPatch>,
}

/// Diagnostic estimate of backing-medium usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Bytes consumed by stored slots.
    pub used: u64,
    /// Estimated bytes remaining.
    pub available: u64,
    /// Usage against the estimated limit, in percent.
    pub percentage: f64,
}

/// Gateway over a [`StorageBackend`], owning the slot layout and the
/// availability state.
///
/// Availability is probed once at construction with a trivial write+delete.
/// When the probe fails every subsequent operation is a safe no-op
/// returning [`LedgerError::StorageUnavailable`]; data lives only in
/// memory for that session.
pub struct PersistenceManager<B: StorageBackend> {
    backend: B,
    available: bool,
    clock: Arc<dyn Clock>,
}

impl<B: StorageBackend> PersistenceManager<B> {
    /// Construct the gateway and probe the backend.
    pub fn new(mut backend: B, clock: Arc<dyn Clock>) -> Self {
        let available = Self::probe(&mut backend);
        if !available {
            tracing::warn!("storage unavailable, operating in-memory only");
        }
        Self {
            backend,
            available,
            clock,
        }
    }

    fn probe(backend: &mut B) -> bool {
        backend
            .put(PROBE_KEY, "probe")
            .and_then(|()| backend.remove(PROBE_KEY))
            .is_ok()
    }

    /// Whether the durable medium was reachable at construction time.
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Parse one slot, substituting `None` for an absent, unreadable, or
    /// corrupt value so the other slots stay usable.
    fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.backend.get(key) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("slot {key} corrupt, using default: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("slot {key} unreadable, using default: {e}");
                None
            }
        }
    }

    fn write_slot<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), LedgerError> {
        let text = serde_json::to_string(value)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        self.backend.put(key, &text)
    }

    /// Merge the patch onto the previously persisted snapshot, stamp
    /// `lastUpdated` and `version`, and write both data slots.
    pub fn save_data(&mut self, patch: SnapshotPatch) -> Result<(), LedgerError> {
        if !self.available {
            return Err(LedgerError::StorageUnavailable);
        }
        let mut snapshot = self.load_data();
        if let Some(pool) = patch.resource_pool {
            snapshot.resource_pool = pool;
        }
        if let Some(reservations) = patch.reservations {
            snapshot.reservations = reservations;
        }
        snapshot.last_updated = self.clock.now_ms();
        snapshot.version = SCHEMA_VERSION.to_string();

        // The two slots are written in sequence; a failure on the second
        // write can leave them from different snapshots. Per-slot fallback
        // in load_data keeps each slot usable on its own.
        self.write_slot(KEY_RESOURCE_POOL, &snapshot.resource_pool)?;
        self.write_slot(KEY_RESERVATIONS, &snapshot.reservations)?;
        tracing::debug!(
            reservations = snapshot.reservations.len(),
            "persisted ledger data"
        );
        Ok(())
    }

    /// Read the persisted snapshot. Each slot falls back to its
    /// compiled-in default independently: a corrupt reservations slot does
    /// not invalidate a valid pool slot.
    pub fn load_data(&self) -> PersistedSnapshot {
        let resource_pool: ResourcePool = if self.available {
            self.read_slot(KEY_RESOURCE_POOL).unwrap_or_default()
        } else {
            ResourcePool::default()
        };
        let reservations: Vec<Reservation> = if self.available {
            self.read_slot(KEY_RESERVATIONS).unwrap_or_default()
        } else {
            Vec::new()
        };
        PersistedSnapshot {
            resource_pool,
            reservations,
            last_updated: self.clock.now_ms(),
            version: SCHEMA_VERSION.to_string(),
        }
    }

    /// Merge a settings patch onto the stored settings and persist.
    /// A patch producing invalid settings is rejected without writing.
    pub fn save_settings(&mut self, patch: SettingsPatch) -> Result<(), LedgerError> {
        if !self.available {
            return Err(LedgerError::StorageUnavailable);
        }
        let mut settings = self.load_settings();
        settings.apply(patch);
        settings.validate().map_err(LedgerError::Validation)?;
        self.write_slot(KEY_SETTINGS, &settings)
    }

    /// Read the persisted settings, falling back to defaults when the slot
    /// is absent, corrupt, or holds values that fail validation. A slot
    /// with a zero refresh interval is as unusable as an unparseable one.
    pub fn load_settings(&self) -> AppSettings {
        if !self.available {
            return AppSettings::default();
        }
        let settings: AppSettings = self.read_slot(KEY_SETTINGS).unwrap_or_default();
        if let Err(e) = settings.validate() {
            tracing::warn!("stored settings invalid, using defaults: {e}");
            return AppSettings::default();
        }
        settings
    }

    /// Serialize the persisted snapshot plus settings into one versioned
    /// JSON blob suitable for out-of-band backup.
    pub fn export_data(&self) -> Result<String, LedgerError> {
        let document = ExportDocument {
            data: self.load_data(),
            settings: self.load_settings(),
            exported_at: self.clock.now_ms(),
            version: SCHEMA_VERSION.to_string(),
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Import a previously exported blob. Malformed input fails without
    /// mutating any stored state; well-formed input overwrites existing
    /// data unconditionally.
    pub fn import_data(&mut self, blob: &str) -> Result<(), LedgerError> {
        let document: ImportDocument = serde_json::from_str(blob).map_err(|e| {
            tracing::warn!("import rejected: {e}");
            LedgerError::Serialization(e.to_string())
        })?;
        if let Some(data) = document.data {
            self.save_data(data)?;
        }
        if let Some(settings) = document.settings {
            self.save_settings(settings)?;
        }
        tracing::info!("import applied");
        Ok(())
    }

    /// Remove all persisted slots.
    pub fn clear_data(&mut self) -> Result<(), LedgerError> {
        if !self.available {
            return Err(LedgerError::StorageUnavailable);
        }
        self.backend.remove(KEY_RESOURCE_POOL)?;
        self.backend.remove(KEY_RESERVATIONS)?;
        self.backend.remove(KEY_SETTINGS)?;
        tracing::info!("persisted ledger data cleared");
        Ok(())
    }

    /// Usage estimate of the backing medium.
    pub fn storage_info(&self) -> StorageInfo {
        if !self.available {
            return StorageInfo {
                used: 0,
                available: 0,
                percentage: 0.0,
            };
        }
        let used = self.backend.used_bytes();
        let available = ESTIMATED_LIMIT_BYTES.saturating_sub(used);
        #[allow(clippy::cast_precision_loss)]
        let percentage = used as f64 / ESTIMATED_LIMIT_BYTES as f64 * 100.0;
        StorageInfo {
            used,
            available,
            percentage,
        }
    }
}
