//! Pure derivation of utilization and breakdown views.
//!
//! Everything here is a deterministic, side-effect-free function of
//! `(&ResourcePool, &[Reservation])`; calling twice with unchanged input
//! yields bit-identical output. Values are intentionally unclamped:
//! `available` goes negative and `percentage` exceeds 100 under
//! over-commitment so the presentation layer can surface it.

use crate::core::model::{
    BreakdownSlice, KindUtilization, Reservation, ReservationBreakdown, ResourceKind,
    ResourcePool, ResourceUtilization,
};

/// Percentage of `amount` against `total`, with the degenerate-division
/// rule: a zero total yields 0 rather than NaN.
fn percent_of(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        amount * 100.0 / total
    }
}

fn utilization_for(pool: &ResourcePool, reservations: &[Reservation], kind: ResourceKind) -> KindUtilization {
    let total = pool.capacity(kind).total;
    let used: f64 = reservations.iter().map(|r| r.amount(kind)).sum();
    KindUtilization {
        used,
        available: total - used,
        percentage: percent_of(used, total),
    }
}

/// Derive per-kind utilization from the pool and reservation collection.
pub fn calculate_utilization(
    pool: &ResourcePool,
    reservations: &[Reservation],
) -> ResourceUtilization {
    ResourceUtilization {
        cpu: utilization_for(pool, reservations, ResourceKind::Cpu),
        memory: utilization_for(pool, reservations, ResourceKind::Memory),
        gpu: utilization_for(pool, reservations, ResourceKind::Gpu),
    }
}

fn slices_for(pool: &ResourcePool, reservations: &[Reservation], kind: ResourceKind) -> Vec<BreakdownSlice> {
    let total = pool.capacity(kind).total;
    reservations
        .iter()
        .map(|r| BreakdownSlice {
            reservation: r.clone(),
            amount: r.amount(kind),
            percentage: percent_of(r.amount(kind), total),
        })
        .collect()
}

/// Derive the per-kind breakdown: one slice per reservation, in collection
/// order, zero-amount slices included.
pub fn calculate_breakdown(
    pool: &ResourcePool,
    reservations: &[Reservation],
) -> ReservationBreakdown {
    ReservationBreakdown {
        cpu: slices_for(pool, reservations, ResourceKind::Cpu),
        memory: slices_for(pool, reservations, ResourceKind::Memory),
        gpu: slices_for(pool, reservations, ResourceKind::Gpu),
    }
}
