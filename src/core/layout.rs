//! Room layout helpers.
//!
//! Positions are percentages of the room bounds. The store never clamps;
//! callers pass coordinates through [`clamp_percent`] first.

use super::Position;

/// Clamp a coordinate into `[0, 100]`. NaN maps to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Grid positions for `count` tables, row by row.
///
/// Uses `ceil(sqrt(count))` columns with an even spacing inside a 10% margin.
pub fn grid_positions(count: usize) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }

    let cols = (count as f64).sqrt().ceil() as usize;
    let spacing = 80.0 / (cols as f64 + 1.0);

    (0..count)
        .map(|index| {
            let row = index / cols;
            let col = index % cols;
            Position {
                x: spacing * (col as f64 + 1.0) + 10.0,
                y: spacing * (row as f64 + 1.0) + 10.0,
            }
        })
        .collect()
}
