//! # Resource Ledger
//!
//! A single-tenant reservation tracker for a fixed pool of compute
//! resources (CPU cores, memory, GPU units).
//!
//! This library is the accounting engine behind an HPC capacity dashboard:
//! users register named reservations that each claim a fixed amount of
//! CPU, memory, and GPU from the shared pool, and the engine derives
//! aggregate utilization and per-resource breakdowns and persists state
//! across sessions.
//!
//! ## Design points
//!
//! - **Pure derivation**: utilization and breakdown views are deterministic
//!   functions of `(pool, reservations)` with no side effects, recomputed
//!   after every mutation.
//! - **Over-commitment is a signal, not an error**: `available` may go
//!   negative and `percentage` above 100; nothing is clamped or rejected.
//! - **Degraded storage is survivable**: the persistence gateway probes its
//!   backend once at startup and turns every later failure into a reported
//!   result, falling back to in-memory operation or compiled-in defaults.
//! - **No globals**: storage backend, clock, and scheduler are injected, so
//!   tests run against an in-memory backend and a fixed clock.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resource_ledger::config::StorageConfig;
//! use resource_ledger::core::ReservationDraft;
//! use resource_ledger::infra::FileStorage;
//! use resource_ledger::runtime::Ledger;
//! use resource_ledger::util::SystemClock;
//!
//! let storage = FileStorage::new(StorageConfig::from_env().data_dir)?;
//! let ledger = Ledger::new(storage, Arc::new(SystemClock), tokio::runtime::Handle::current());
//!
//! ledger.add_reservation(ReservationDraft {
//!     name: "Machine Learning Class".into(),
//!     gpu_name: Some("NVIDIA A100".into()),
//!     cpu: 32.0,
//!     memory: 256.0,
//!     gpu: 8.0,
//!     ..ReservationDraft::default()
//! })?;
//!
//! let utilization = ledger.utilization();
//! println!("cpu used: {}", utilization.cpu.used);
//! ```
//!
//! For complete examples, see the integration tests under `tests/`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core accounting engine: model, derivations, color policy, store.
pub mod core;
/// Configuration models for settings and storage location.
pub mod config;
/// Infrastructure adapters: storage backends and the persistence gateway.
pub mod infra;
/// Runtime wiring: service facade and auto-save scheduling.
pub mod runtime;
/// Shared utilities.
pub mod util;
