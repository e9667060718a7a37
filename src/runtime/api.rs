//! Presentation-facing service surface.
//!
//! [`Ledger`] wires the store, gateway, and scheduler together at startup
//! and exposes the synchronous API a UI layer consumes. All components are
//! injected rather than global, so tests can substitute an in-memory
//! backend and a fixed clock.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::{AppSettings, SettingsPatch};
use crate::core::model::{
    PoolUpdate, Reservation, ReservationBreakdown, ReservationDraft, ReservationUpdate,
    ResourcePool, ResourceUtilization,
};
use crate::core::store::ResourceStore;
use crate::core::LedgerError;
use crate::infra::persistence::{PersistenceManager, StorageInfo};
use crate::infra::storage::StorageBackend;
use crate::runtime::autosave::AutoSaveScheduler;
use crate::util::clock::Clock;

/// Application service owning the store behind a mutex shared with the
/// auto-save scheduler callback.
pub struct Ledger<B: StorageBackend + 'static> {
    store: Arc<Mutex<ResourceStore<B>>>,
    scheduler: AutoSaveScheduler,
    interval: Duration,
}

impl<B: StorageBackend + 'static> Ledger<B> {
    /// Construct the service: probe storage, read persisted settings,
    /// hydrate the store, and rewire the auto-save scheduler.
    ///
    /// The auto-save flag is persisted in settings; restoring the flag
    /// alone is not enough, so initialization also restarts the timer
    /// whenever the persisted flag is on.
    pub fn new(backend: B, clock: Arc<dyn Clock>, handle: tokio::runtime::Handle) -> Self {
        let persistence = PersistenceManager::new(backend, Arc::clone(&clock));
        let settings = persistence.load_settings();
        let mut store = ResourceStore::new(persistence, clock);
        store.set_auto_save(settings.auto_save);
        store.load_data();

        let store = Arc::new(Mutex::new(store));
        let mut scheduler = AutoSaveScheduler::new(handle);
        let interval = Duration::from_millis(settings.refresh_interval_ms);
        if settings.auto_save {
            Self::start_scheduler(&mut scheduler, &store, interval);
        }
        Self {
            store,
            scheduler,
            interval,
        }
    }

    fn start_scheduler(
        scheduler: &mut AutoSaveScheduler,
        store: &Arc<Mutex<ResourceStore<B>>>,
        interval: Duration,
    ) {
        let store = Arc::clone(store);
        scheduler.start(
            move || {
                let mut guard = store.lock();
                if let Err(e) = guard.save_data() {
                    tracing::warn!("periodic auto-save failed: {e}");
                }
            },
            interval,
        );
    }

    /// Merge a partial capacity update into the pool.
    pub fn update_resource_pool(&self, update: PoolUpdate) {
        self.store.lock().update_resource_pool(update);
    }

    /// Create a reservation from a draft; returns the stored record with
    /// its assigned id and color.
    pub fn add_reservation(&self, draft: ReservationDraft) -> Result<Reservation, LedgerError> {
        self.store.lock().add_reservation(draft)
    }

    /// Remove a reservation by id; no-op when absent.
    pub fn remove_reservation(&self, id: &str) {
        self.store.lock().remove_reservation(id);
    }

    /// Merge a partial update into a reservation; no-op when absent.
    pub fn update_reservation(&self, id: &str, update: ReservationUpdate) {
        self.store.lock().update_reservation(id, update);
    }

    /// Persist the current pool and reservations.
    pub fn save_data(&self) -> Result<(), LedgerError> {
        self.store.lock().save_data()
    }

    /// Reload canonical state from storage.
    pub fn load_data(&self) {
        self.store.lock().load_data();
    }

    /// Export the persisted snapshot plus settings as a versioned blob.
    pub fn export_data(&self) -> Result<String, LedgerError> {
        self.store.lock().export_data()
    }

    /// Import a previously exported blob and reload state.
    pub fn import_data(&self, blob: &str) -> Result<(), LedgerError> {
        self.store.lock().import_data(blob)
    }

    /// Clear persisted slots and reset state to defaults.
    pub fn clear_data(&self) -> Result<(), LedgerError> {
        self.store.lock().clear_data()
    }

    /// Flip auto-save: persists the flag in settings and starts or stops
    /// the periodic task accordingly. Returns the new flag value.
    pub fn toggle_auto_save(&mut self) -> bool {
        let enabled = {
            let mut store = self.store.lock();
            let enabled = !store.auto_save();
            store.set_auto_save(enabled);
            if let Err(e) = store.save_settings(SettingsPatch {
                auto_save: Some(enabled),
                ..SettingsPatch::default()
            }) {
                tracing::warn!("failed to persist auto-save flag: {e}");
            }
            enabled
        };
        if enabled {
            Self::start_scheduler(&mut self.scheduler, &self.store, self.interval);
        } else {
            self.scheduler.stop();
        }
        enabled
    }

    /// Current pool capacities.
    pub fn pool(&self) -> ResourcePool {
        self.store.lock().pool().clone()
    }

    /// Current reservations, in insertion order.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.store.lock().reservations().to_vec()
    }

    /// Derived utilization for all resource kinds.
    pub fn utilization(&self) -> ResourceUtilization {
        self.store.lock().utilization().clone()
    }

    /// Derived per-kind breakdown.
    pub fn breakdown(&self) -> ReservationBreakdown {
        self.store.lock().breakdown().clone()
    }

    /// Whether auto-save is enabled.
    pub fn auto_save(&self) -> bool {
        self.store.lock().auto_save()
    }

    /// Whether the periodic auto-save task is installed.
    pub fn auto_save_active(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Milliseconds since epoch of the last successful save, if any.
    pub fn last_saved_ms(&self) -> Option<u128> {
        self.store.lock().last_saved_ms()
    }

    /// Whether the durable medium was reachable at startup.
    pub fn storage_available(&self) -> bool {
        self.store.lock().storage_available()
    }

    /// Usage estimate of the backing medium.
    pub fn storage_info(&self) -> StorageInfo {
        self.store.lock().storage_info()
    }

    /// Stored settings, defaults when absent.
    pub fn settings(&self) -> AppSettings {
        self.store.lock().settings()
    }
}
