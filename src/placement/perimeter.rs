//! Deterministic perimeter fallback layout.
//!
//! When no collision-free position exists near a target, or a
//! characteristic has no target at all, its balloon is parked in a column
//! along the left/right page margins. The layout is a pure function of the
//! balloon index so re-running a drawing reproduces the same positions.

use crate::config::PlacementConfig;
use crate::geometry::Point;

/// Compute the perimeter position for a balloon.
///
/// Balloons fill left/right margin columns top to bottom: column =
/// `index % columns`, row = `index / columns`. Two columns normally; four
/// when the total exceeds twice the single-column capacity at minimum
/// spacing. Vertical spacing is chosen between the configured minimum and
/// preferred values to fit the available height, and y is clamped to the
/// page bounds with a warning when clamping occurs.
pub fn perimeter_layout(
    balloon_index: usize,
    total_count: usize,
    page_width: f64,
    page_height: f64,
    config: &PlacementConfig,
) -> Point {
    let margin = config.page_margin;
    let available_height = (page_height - 2.0 * margin).max(config.perimeter_min_spacing);
    let single_column_capacity =
        ((available_height / config.perimeter_min_spacing).floor() as usize).max(1);

    let columns = if total_count > single_column_capacity * 2 {
        4
    } else {
        2
    };
    if total_count > single_column_capacity * 4 {
        log::warn!(
            "{} balloons exceed the perimeter capacity of ~{}; expect overlaps",
            total_count,
            single_column_capacity * 4
        );
    }

    let column = balloon_index % columns;
    let row = balloon_index / columns;

    let rows_per_column = total_count.div_ceil(columns).max(1);
    let spacing = (available_height / rows_per_column as f64).clamp(
        config.perimeter_min_spacing,
        config.perimeter_preferred_spacing,
    );

    let x = match (columns, column) {
        (2, 0) => margin,
        (2, _) => page_width - margin,
        (4, 0) => margin,
        (4, 1) => margin + config.perimeter_lane_inset,
        (4, 2) => page_width - margin - config.perimeter_lane_inset,
        (4, _) => page_width - margin,
        _ => unreachable!("column count is always 2 or 4"),
    };

    let y = margin + row as f64 * spacing;
    let clamped = y.clamp(margin, page_height - margin);
    if clamped != y {
        log::warn!(
            "perimeter balloon {} clamped from y={:.1} to y={:.1}",
            balloon_index + 1,
            y,
            clamped
        );
    }

    Point::new(x, clamped)
}
