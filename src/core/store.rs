//! Store orchestrator: canonical in-memory state, wired to re-derivation
//! and persistence.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::{AppSettings, SettingsPatch};
use crate::core::accounting::{calculate_breakdown, calculate_utilization};
use crate::core::color::next_color;
use crate::core::model::{
    PoolUpdate, Reservation, ReservationBreakdown, ReservationDraft, ReservationUpdate,
    ResourcePool, ResourceUtilization, SnapshotPatch,
};
use crate::core::LedgerError;
use crate::infra::persistence::{PersistenceManager, StorageInfo};
use crate::infra::storage::StorageBackend;
use crate::util::clock::Clock;

/// Exclusive owner of the canonical pool and reservation state.
///
/// Every mutator follows the same protocol: apply the mutation, recompute
/// both derived views synchronously, then save through the gateway when
/// auto-save is enabled. Derived views are plain fields, recomputed rather
/// than memoized, so reads are always consistent with canonical state.
pub struct ResourceStore<B: StorageBackend> {
    pool: ResourcePool,
    reservations: Vec<Reservation>,
    utilization: ResourceUtilization,
    breakdown: ReservationBreakdown,
    auto_save: bool,
    last_saved_ms: Option<u128>,
    persistence: PersistenceManager<B>,
    clock: Arc<dyn Clock>,
}

impl<B: StorageBackend> ResourceStore<B> {
    /// Create a store with default state, wired to the injected gateway
    /// and clock. Call [`Self::load_data`] afterwards to hydrate from
    /// storage.
    pub fn new(persistence: PersistenceManager<B>, clock: Arc<dyn Clock>) -> Self {
        let pool = ResourcePool::default();
        let reservations = Vec::new();
        let utilization = calculate_utilization(&pool, &reservations);
        let breakdown = calculate_breakdown(&pool, &reservations);
        Self {
            pool,
            reservations,
            utilization,
            breakdown,
            auto_save: true,
            last_saved_ms: None,
            persistence,
            clock,
        }
    }

    fn refresh_derived(&mut self) {
        self.utilization = calculate_utilization(&self.pool, &self.reservations);
        self.breakdown = calculate_breakdown(&self.pool, &self.reservations);
    }

    /// Re-derive views and, when auto-save is on, persist. Auto-save
    /// failures are logged and swallowed; explicit saves report them.
    fn after_mutation(&mut self) {
        self.refresh_derived();
        if self.auto_save {
            if let Err(e) = self.save_data() {
                tracing::warn!("auto-save after mutation failed: {e}");
            }
        }
    }

    /// Merge a partial capacity update into the pool.
    pub fn update_resource_pool(&mut self, update: PoolUpdate) {
        self.pool.apply(update);
        self.after_mutation();
    }

    /// Validate a draft, assign it a unique id and the next palette color,
    /// and append it to the collection.
    pub fn add_reservation(
        &mut self,
        draft: ReservationDraft,
    ) -> Result<Reservation, LedgerError> {
        draft.validate()?;
        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            gpu_name: draft.gpu_name,
            cpu: draft.cpu,
            memory: draft.memory,
            gpu: draft.gpu,
            color: next_color(&self.reservations).to_string(),
            description: draft.description,
        };
        tracing::info!(id = %reservation.id, name = %reservation.name, "reservation added");
        self.reservations.push(reservation.clone());
        self.after_mutation();
        Ok(reservation)
    }

    /// Remove the reservation with the given id; no-op when absent.
    pub fn remove_reservation(&mut self, id: &str) {
        let before = self.reservations.len();
        self.reservations.retain(|r| r.id != id);
        if self.reservations.len() == before {
            tracing::debug!(%id, "remove ignored, no such reservation");
            return;
        }
        tracing::info!(%id, "reservation removed");
        self.after_mutation();
    }

    /// Merge a partial update into the matching reservation; no-op when no
    /// reservation matches the id.
    pub fn update_reservation(&mut self, id: &str, update: ReservationUpdate) {
        let Some(reservation) = self.reservations.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(%id, "update ignored, no such reservation");
            return;
        };
        reservation.apply(update);
        self.after_mutation();
    }

    /// Persist the current pool and reservations; stamps the last-saved
    /// time on success.
    pub fn save_data(&mut self) -> Result<(), LedgerError> {
        self.persistence.save_data(SnapshotPatch {
            resource_pool: Some(self.pool.clone()),
            reservations: Some(self.reservations.clone()),
        })?;
        self.last_saved_ms = Some(self.clock.now_ms());
        Ok(())
    }

    /// Replace canonical state wholesale from storage and re-derive.
    pub fn load_data(&mut self) {
        let snapshot = self.persistence.load_data();
        self.pool = snapshot.resource_pool;
        self.reservations = snapshot.reservations;
        self.refresh_derived();
    }

    /// Export the persisted snapshot plus settings as a versioned blob.
    pub fn export_data(&self) -> Result<String, LedgerError> {
        self.persistence.export_data()
    }

    /// Import a blob through the gateway, then reload canonical state from
    /// storage. A rejected import leaves both stored and in-memory state
    /// untouched.
    pub fn import_data(&mut self, blob: &str) -> Result<(), LedgerError> {
        self.persistence.import_data(blob)?;
        self.load_data();
        Ok(())
    }

    /// Clear persisted slots and reset canonical state to defaults.
    pub fn clear_data(&mut self) -> Result<(), LedgerError> {
        self.persistence.clear_data()?;
        self.pool = ResourcePool::default();
        self.reservations.clear();
        self.last_saved_ms = None;
        self.refresh_derived();
        Ok(())
    }

    /// Flip the in-memory auto-save flag. Scheduler wiring lives in the
    /// service facade.
    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save = enabled;
    }

    /// Persist a settings patch through the gateway.
    pub fn save_settings(&mut self, patch: SettingsPatch) -> Result<(), LedgerError> {
        self.persistence.save_settings(patch)
    }

    /// Stored settings, defaults when absent.
    pub fn settings(&self) -> AppSettings {
        self.persistence.load_settings()
    }

    /// Current pool capacities.
    pub const fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Current reservation collection, in insertion order.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Derived utilization, consistent with the last mutation.
    pub const fn utilization(&self) -> &ResourceUtilization {
        &self.utilization
    }

    /// Derived breakdown, consistent with the last mutation.
    pub const fn breakdown(&self) -> &ReservationBreakdown {
        &self.breakdown
    }

    /// Whether auto-save is enabled.
    pub const fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Milliseconds since epoch of the last successful save, if any.
    pub const fn last_saved_ms(&self) -> Option<u128> {
        self.last_saved_ms
    }

    /// Whether the durable medium was reachable at startup.
    pub const fn storage_available(&self) -> bool {
        self.persistence.is_available()
    }

    /// Usage estimate of the backing medium.
    pub fn storage_info(&self) -> StorageInfo {
        self.persistence.storage_info()
    }
}
