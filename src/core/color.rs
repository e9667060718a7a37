//! Deterministic color assignment for new reservations.

use std::collections::HashSet;

use crate::core::model::{Reservation, RESERVATION_COLORS};

/// Pick the color for the next reservation to be created.
///
/// Returns the first palette entry not currently in use. Once every entry
/// of the 10-color palette is taken, falls back to indexing the palette by
/// the new reservation's ordinal (existing count + 1) modulo the palette
/// size; collisions past that point are accepted, not an error.
///
/// Call this at creation time only. Colors already assigned to existing
/// reservations are immutable unless explicitly updated.
pub fn next_color(reservations: &[Reservation]) -> &'static str {
    let in_use: HashSet<&str> = reservations.iter().map(|r| r.color.as_str()).collect();
    RESERVATION_COLORS
        .iter()
        .find(|color| !in_use.contains(**color))
        .copied()
        .unwrap_or_else(|| {
            // All 10 in use: colors repeat from here on.
            RESERVATION_COLORS[(reservations.len() + 1) % RESERVATION_COLORS.len()]
        })
}
