//! Core accounting engine: data model, derivations, color policy, and the
//! store orchestrator.

pub mod accounting;
pub mod color;
pub mod error;
pub mod model;
pub mod store;

pub use accounting::{calculate_breakdown, calculate_utilization};
pub use color::next_color;
pub use error::{AppResult, LedgerError};
pub use model::{
    BreakdownSlice, KindUtilization, PersistedSnapshot, PoolUpdate, Reservation,
    ReservationBreakdown, ReservationDraft, ReservationUpdate, ResourceCapacity, ResourceKind,
    ResourcePool, ResourceUtilization, SnapshotPatch, RESERVATION_COLORS,
};
pub use store::ResourceStore;
