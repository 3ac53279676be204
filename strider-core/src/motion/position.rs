//! Vertical position to display row mapping

use crate::config::DisplayMapping;

/// Map a vertical reading to the row where the clock label starts
///
/// The reading is normalized against `full_scale` without clamping, so
/// readings beyond full scale overshoot. Only the bottom edge is clamped
/// (to `max_y`); strongly negative readings push the label above the top
/// of the screen.
pub fn display_row(vertical: i32, mapping: &DisplayMapping) -> i32 {
    let normalized = f64::from(vertical) / f64::from(mapping.full_scale);
    let row = (f64::from(mapping.origin_y) + f64::from(mapping.span) * normalized) as i32;

    if row > mapping.max_y {
        mapping.max_y
    } else {
        row
    }
}
