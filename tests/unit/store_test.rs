//! Tests for the store orchestrator

use std::sync::Arc;

use resource_ledger::core::{
    PoolUpdate, ReservationDraft, ReservationUpdate, ResourceCapacity, ResourcePool,
    ResourceStore, RESERVATION_COLORS,
};
use resource_ledger::infra::{MemoryStorage, PersistenceManager};
use resource_ledger::util::FixedClock;

fn store() -> ResourceStore<MemoryStorage> {
    let persistence = PersistenceManager::new(MemoryStorage::new(), Arc::new(FixedClock(42)));
    ResourceStore::new(persistence, Arc::new(FixedClock(42)))
}

fn draft(name: &str, cpu: f64, memory: f64, gpu: f64) -> ReservationDraft {
    ReservationDraft {
        name: name.to_string(),
        cpu,
        memory,
        gpu,
        ..ReservationDraft::default()
    }
}

#[test]
fn test_add_assigns_id_and_color_and_rederives() {
    let mut store = store();
    let added = store.add_reservation(draft("alpha", 40.0, 20.0, 2.0)).unwrap();

    assert!(!added.id.is_empty());
    assert_eq!(added.color, RESERVATION_COLORS[0]);
    assert_eq!(store.reservations().len(), 1);
    // Derived views are already consistent on return.
    assert_eq!(store.utilization().cpu.used, 40.0);
    assert_eq!(store.breakdown().cpu.len(), 1);
}

#[test]
fn test_add_assigns_unique_ids() {
    let mut store = store();
    let a = store.add_reservation(draft("a", 1.0, 0.0, 0.0)).unwrap();
    let b = store.add_reservation(draft("b", 1.0, 0.0, 0.0)).unwrap();
    assert_ne!(a.id, b.id);
    assert_ne!(a.color, b.color);
}

#[test]
fn test_add_rejects_empty_name() {
    let mut store = store();
    assert!(store.add_reservation(draft("   ", 1.0, 0.0, 0.0)).is_err());
    assert!(store.reservations().is_empty());
}

#[test]
fn test_add_rejects_all_zero_amounts() {
    let mut store = store();
    assert!(store.add_reservation(draft("alpha", 0.0, 0.0, 0.0)).is_err());
}

#[test]
fn test_add_rejects_negative_amounts() {
    let mut store = store();
    assert!(store.add_reservation(draft("alpha", -1.0, 4.0, 0.0)).is_err());
}

#[test]
fn test_update_merges_and_preserves_id_and_color() {
    let mut store = store();
    let added = store.add_reservation(draft("alpha", 10.0, 20.0, 1.0)).unwrap();

    store.update_reservation(
        &added.id,
        ReservationUpdate {
            cpu: Some(16.0),
            description: Some("resized".to_string()),
            ..ReservationUpdate::default()
        },
    );

    let updated = &store.reservations()[0];
    assert_eq!(updated.id, added.id);
    assert_eq!(updated.color, added.color);
    assert_eq!(updated.cpu, 16.0);
    assert_eq!(updated.memory, 20.0);
    assert_eq!(updated.description.as_deref(), Some("resized"));
    assert_eq!(store.utilization().cpu.used, 16.0);
}

#[test]
fn test_update_nonexistent_id_is_noop() {
    let mut store = store();
    store.add_reservation(draft("alpha", 10.0, 20.0, 1.0)).unwrap();
    let before = store.reservations().to_vec();

    store.update_reservation(
        "no-such-id",
        ReservationUpdate {
            cpu: Some(99.0),
            ..ReservationUpdate::default()
        },
    );
    assert_eq!(store.reservations(), before.as_slice());
}

#[test]
fn test_remove_nonexistent_id_leaves_state_and_views_unchanged() {
    let mut store = store();
    store.add_reservation(draft("alpha", 10.0, 20.0, 1.0)).unwrap();
    let reservations_before = store.reservations().to_vec();
    let utilization_before = store.utilization().clone();
    let breakdown_before = store.breakdown().clone();

    store.remove_reservation("no-such-id");

    assert_eq!(store.reservations(), reservations_before.as_slice());
    assert_eq!(store.utilization(), &utilization_before);
    assert_eq!(store.breakdown(), &breakdown_before);
}

#[test]
fn test_remove_rederives_views() {
    let mut store = store();
    let a = store.add_reservation(draft("a", 10.0, 0.0, 0.0)).unwrap();
    store.add_reservation(draft("b", 5.0, 0.0, 0.0)).unwrap();

    store.remove_reservation(&a.id);
    assert_eq!(store.reservations().len(), 1);
    assert_eq!(store.utilization().cpu.used, 5.0);
    assert_eq!(store.breakdown().cpu.len(), 1);
}

#[test]
fn test_update_resource_pool_merges_partially() {
    let mut store = store();
    store.update_resource_pool(PoolUpdate {
        cpu: Some(ResourceCapacity::new(256.0, "cores")),
        ..PoolUpdate::default()
    });

    assert_eq!(store.pool().cpu.total, 256.0);
    // Untouched kinds keep their defaults.
    assert_eq!(store.pool().memory, ResourcePool::default().memory);
    assert_eq!(store.pool().gpu, ResourcePool::default().gpu);
}

#[test]
fn test_auto_save_persists_after_each_mutation() {
    let mut store = store();
    assert!(store.auto_save());
    assert_eq!(store.last_saved_ms(), None);

    store.add_reservation(draft("alpha", 10.0, 0.0, 0.0)).unwrap();
    assert_eq!(store.last_saved_ms(), Some(42));
}

#[test]
fn test_disabled_auto_save_keeps_mutations_in_memory() {
    let mut store = store();
    store.set_auto_save(false);

    store.add_reservation(draft("alpha", 10.0, 0.0, 0.0)).unwrap();
    assert_eq!(store.last_saved_ms(), None);

    // Reloading drops the unsaved mutation.
    store.load_data();
    assert!(store.reservations().is_empty());
}

#[test]
fn test_explicit_save_then_load_restores_state() {
    let mut store = store();
    store.set_auto_save(false);
    store.add_reservation(draft("alpha", 10.0, 20.0, 1.0)).unwrap();
    store.save_data().unwrap();
    assert_eq!(store.last_saved_ms(), Some(42));

    let id = store.reservations()[0].id.clone();
    store.remove_reservation(&id);
    assert!(store.reservations().is_empty());

    store.load_data();
    assert_eq!(store.reservations().len(), 1);
    assert_eq!(store.reservations()[0].name, "alpha");
    assert_eq!(store.utilization().cpu.used, 10.0);
}

#[test]
fn test_clear_resets_to_defaults() {
    let mut store = store();
    store.update_resource_pool(PoolUpdate {
        cpu: Some(ResourceCapacity::new(512.0, "cores")),
        ..PoolUpdate::default()
    });
    store.add_reservation(draft("alpha", 10.0, 20.0, 1.0)).unwrap();

    store.clear_data().unwrap();

    assert_eq!(store.pool(), &ResourcePool::default());
    assert!(store.reservations().is_empty());
    assert_eq!(store.last_saved_ms(), None);
    assert_eq!(store.utilization().cpu.used, 0.0);
    assert!(store.breakdown().cpu.is_empty());
}

#[test]
fn test_unavailable_storage_still_tracks_in_memory() {
    let persistence =
        PersistenceManager::new(MemoryStorage::failing(), Arc::new(FixedClock(42)));
    let mut store = ResourceStore::new(persistence, Arc::new(FixedClock(42)));
    assert!(!store.storage_available());

    // Mutations succeed; the auto-save failure is swallowed.
    store.add_reservation(draft("alpha", 10.0, 0.0, 0.0)).unwrap();
    assert_eq!(store.utilization().cpu.used, 10.0);
    assert_eq!(store.last_saved_ms(), None);

    // Explicit saves report the degradation.
    assert!(store.save_data().is_err());
}
