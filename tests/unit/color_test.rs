//! Tests for the color assignment policy

use resource_ledger::core::{next_color, Reservation, RESERVATION_COLORS};

fn reservation_with_color(id: usize, color: &str) -> Reservation {
    Reservation {
        id: id.to_string(),
        name: format!("res-{id}"),
        gpu_name: None,
        cpu: 1.0,
        memory: 0.0,
        gpu: 0.0,
        color: color.to_string(),
        description: None,
    }
}

#[test]
fn test_first_reservation_gets_first_palette_entry() {
    assert_eq!(next_color(&[]), RESERVATION_COLORS[0]);
}

#[test]
fn test_skips_colors_already_in_use() {
    let reservations = vec![
        reservation_with_color(0, RESERVATION_COLORS[0]),
        reservation_with_color(1, RESERVATION_COLORS[1]),
    ];
    assert_eq!(next_color(&reservations), RESERVATION_COLORS[2]);
}

#[test]
fn test_fills_gap_left_by_removed_reservation() {
    // Colors 0 and 2 in use; first unused entry is 1.
    let reservations = vec![
        reservation_with_color(0, RESERVATION_COLORS[0]),
        reservation_with_color(2, RESERVATION_COLORS[2]),
    ];
    assert_eq!(next_color(&reservations), RESERVATION_COLORS[1]);
}

#[test]
fn test_never_reuses_while_unused_entries_remain() {
    let mut reservations = Vec::new();
    for i in 0..RESERVATION_COLORS.len() {
        let color = next_color(&reservations);
        assert!(
            !reservations.iter().any(|r: &Reservation| r.color == color),
            "color {color} handed out twice with unused entries remaining"
        );
        reservations.push(reservation_with_color(i, color));
    }
}

#[test]
fn test_eleventh_reservation_wraps_to_second_entry() {
    let reservations: Vec<Reservation> = RESERVATION_COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| reservation_with_color(i, color))
        .collect();
    // All 10 in use: the 11th reservation is ordinal 11, 11 mod 10 = 1.
    assert_eq!(next_color(&reservations), RESERVATION_COLORS[1]);
}
