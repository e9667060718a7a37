//! Data model for the resource pool and reservations.

use serde::{Deserialize, Serialize};

use crate::core::LedgerError;

/// Fixed color palette assigned to reservations for visualization.
pub const RESERVATION_COLORS: [&str; 10] = [
    "#3b82f6", // blue
    "#10b981", // green
    "#f59e0b", // yellow
    "#ef4444", // red
    "#8b5cf6", // purple
    "#06b6d4", // cyan
    "#84cc16", // lime
    "#f97316", // orange
    "#ec4899", // pink
    "#6b7280", // gray
];

/// The kinds of compute resource tracked by the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// CPU cores.
    Cpu,
    /// Memory in GB.
    Memory,
    /// GPU units.
    Gpu,
}

impl ResourceKind {
    /// All tracked kinds, in display order.
    pub const ALL: [Self; 3] = [Self::Cpu, Self::Memory, Self::Gpu];
}

/// Total capacity for one resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCapacity {
    /// Total capacity available. Invariant: `total >= 0`.
    pub total: f64,
    /// Display unit label (e.g. "cores", "GB").
    pub unit: String,
}

impl ResourceCapacity {
    /// Create a capacity entry.
    pub fn new(total: f64, unit: impl Into<String>) -> Self {
        Self {
            total,
            unit: unit.into(),
        }
    }
}

/// Fixed-shape record of total capacity per resource kind.
///
/// Mutated only via whole-or-partial replacement through [`PoolUpdate`];
/// the accounting engine never writes to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePool {
    /// CPU capacity in cores.
    pub cpu: ResourceCapacity,
    /// Memory capacity in GB.
    pub memory: ResourceCapacity,
    /// GPU capacity in units.
    pub gpu: ResourceCapacity,
}

impl ResourcePool {
    /// Capacity entry for the given kind.
    pub const fn capacity(&self, kind: ResourceKind) -> &ResourceCapacity {
        match kind {
            ResourceKind::Cpu => &self.cpu,
            ResourceKind::Memory => &self.memory,
            ResourceKind::Gpu => &self.gpu,
        }
    }

    /// Merge a partial update into this pool, field-wise.
    pub fn apply(&mut self, update: PoolUpdate) {
        if let Some(cpu) = update.cpu {
            self.cpu = cpu;
        }
        if let Some(memory) = update.memory {
            self.memory = memory;
        }
        if let Some(gpu) = update.gpu {
            self.gpu = gpu;
        }
    }
}

impl Default for ResourcePool {
    /// Compiled-in default capacities, used at first run and after a clear.
    fn default() -> Self {
        Self {
            cpu: ResourceCapacity::new(128.0, "cores"),
            memory: ResourceCapacity::new(1024.0, "GB"),
            gpu: ResourceCapacity::new(16.0, "units"),
        }
    }
}

/// Partial replacement of the resource pool; absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolUpdate {
    /// New CPU capacity, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<ResourceCapacity>,
    /// New memory capacity, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<ResourceCapacity>,
    /// New GPU capacity, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<ResourceCapacity>,
}

/// A named claim on capacity from the shared pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Unique identifier, assigned by the store at creation.
    pub id: String,
    /// Human-readable reservation name (non-empty).
    pub name: String,
    /// Optional GPU model name (e.g. "NVIDIA A100").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_name: Option<String>,
    /// CPU cores claimed.
    pub cpu: f64,
    /// Memory in GB claimed.
    pub memory: f64,
    /// GPU units claimed.
    pub gpu: f64,
    /// Visualization color from [`RESERVATION_COLORS`], assigned at creation.
    pub color: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Reservation {
    /// Amount claimed of the given kind.
    pub const fn amount(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Cpu => self.cpu,
            ResourceKind::Memory => self.memory,
            ResourceKind::Gpu => self.gpu,
        }
    }

    /// Merge a partial update into this reservation. `id` is never touched;
    /// `color` only changes when the update supplies one.
    pub fn apply(&mut self, update: ReservationUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(gpu_name) = update.gpu_name {
            self.gpu_name = Some(gpu_name);
        }
        if let Some(cpu) = update.cpu {
            self.cpu = cpu;
        }
        if let Some(memory) = update.memory {
            self.memory = memory;
        }
        if let Some(gpu) = update.gpu {
            self.gpu = gpu;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
    }
}

/// Caller-supplied fields for a new reservation; id and color are assigned
/// by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    /// Reservation name (must be non-empty).
    pub name: String,
    /// Optional GPU model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_name: Option<String>,
    /// CPU cores requested.
    pub cpu: f64,
    /// Memory in GB requested.
    pub memory: f64,
    /// GPU units requested.
    pub gpu: f64,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReservationDraft {
    /// Boundary validation: non-empty name and at least one amount > 0.
    /// The accounting engine trusts well-formed input and never re-checks.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "reservation name must not be empty".into(),
            ));
        }
        if self.cpu < 0.0 || self.memory < 0.0 || self.gpu < 0.0 {
            return Err(LedgerError::Validation(
                "resource amounts must be non-negative".into(),
            ));
        }
        if self.cpu <= 0.0 && self.memory <= 0.0 && self.gpu <= 0.0 {
            return Err(LedgerError::Validation(
                "reservation must claim at least one resource".into(),
            ));
        }
        Ok(())
    }
}

/// Partial update of a reservation; absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    /// New name, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New GPU model name, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_name: Option<String>,
    /// New CPU amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    /// New memory amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    /// New GPU amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<f64>,
    /// New color, if explicitly re-assigning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Derived usage figures for one resource kind. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindUtilization {
    /// Sum of the kind across all reservations.
    pub used: f64,
    /// `total - used`; negative under over-commitment.
    pub available: f64,
    /// `used / total * 100`; 0 when total is zero, over 100 when
    /// over-committed. Never clamped.
    pub percentage: f64,
}

/// Derived utilization across all resource kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    /// CPU utilization.
    pub cpu: KindUtilization,
    /// Memory utilization.
    pub memory: KindUtilization,
    /// GPU utilization.
    pub gpu: KindUtilization,
}

impl ResourceUtilization {
    /// Utilization entry for the given kind.
    pub const fn kind(&self, kind: ResourceKind) -> &KindUtilization {
        match kind {
            ResourceKind::Cpu => &self.cpu,
            ResourceKind::Memory => &self.memory,
            ResourceKind::Gpu => &self.gpu,
        }
    }
}

/// One reservation's share of a resource kind.
///
/// Zero-amount slices are included; filtering them out for display is a
/// presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    /// The contributing reservation.
    pub reservation: Reservation,
    /// Raw amount of the kind claimed by the reservation.
    pub amount: f64,
    /// `amount / total * 100`; 0 when total is zero.
    pub percentage: f64,
}

/// Per-kind breakdown of reservations, in collection (insertion) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationBreakdown {
    /// CPU slices, one per reservation.
    pub cpu: Vec<BreakdownSlice>,
    /// Memory slices, one per reservation.
    pub memory: Vec<BreakdownSlice>,
    /// GPU slices, one per reservation.
    pub gpu: Vec<BreakdownSlice>,
}

impl ReservationBreakdown {
    /// Slices for the given kind.
    pub const fn kind(&self, kind: ResourceKind) -> &Vec<BreakdownSlice> {
        match kind {
            ResourceKind::Cpu => &self.cpu,
            ResourceKind::Memory => &self.memory,
            ResourceKind::Gpu => &self.gpu,
        }
    }
}

/// The unit written to and read from durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    /// Persisted pool capacities.
    pub resource_pool: ResourcePool,
    /// Persisted reservation collection.
    pub reservations: Vec<Reservation>,
    /// Milliseconds since epoch of the last write.
    pub last_updated: u128,
    /// Schema version stamp.
    pub version: String,
}

/// Partial snapshot for merge-style saves; absent slots keep their
/// previously persisted value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPatch {
    /// Replacement pool, if saving one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_pool: Option<ResourcePool>,
    /// Replacement reservation collection, if saving one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Vec<Reservation>>,
}
