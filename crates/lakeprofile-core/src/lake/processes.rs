/// Lake profile process functions.
///
/// Pure functions for each step of building a lake geometry: layer
/// spacing, node depths, the two area-depth profiles, volume integration
/// and cover-fraction accounting. Node 0 is the bottom-most node, which
/// carries the full lake footprint; indices count upward toward the surface.
use std::f64::consts::PI;

use super::constants::{COVER_FRACTION_THRESHOLD, SURF_LAYER_DEPTH};
use super::NodeSeries;

/// Thickness of the layers below the surface layer [m].
///
/// `node_count` must be at least 2.
pub fn layer_thickness(max_depth: f64, node_count: usize) -> f64 {
    (max_depth - SURF_LAYER_DEPTH) / (node_count as f64 - 1.0)
}

/// Depth of each node below the surface [m].
pub fn node_depths(node_count: usize, dz: f64) -> NodeSeries {
    (0..node_count)
        .map(|i| {
            if i == 0 {
                (node_count as f64 - 1.0) * dz + SURF_LAYER_DEPTH
            } else {
                (node_count - i) as f64 * dz
            }
        })
        .collect()
}

/// Surface area at each node from tabulated fractions [m^2].
pub fn tabulated_areas(area_fractions: &[f64], grid_cell_area: f64) -> NodeSeries {
    area_fractions
        .iter()
        .map(|&fraction| fraction * grid_cell_area)
        .collect()
}

/// Surface area at each node from the power-law basin shape `y = A x^b` [m^2].
///
/// Node 0 keeps `footprint_area`. The basin radius follows from treating
/// the footprint as a circle, and `A` is fixed so the shape reaches
/// `max_depth` at that radius.
pub fn parabolic_areas(
    footprint_area: f64,
    exponent: f64,
    max_depth: f64,
    dz: f64,
    node_count: usize,
) -> NodeSeries {
    let radius = (footprint_area / PI).sqrt();
    let a = max_depth / radius.powf(exponent);

    let mut areas = NodeSeries::with_capacity(node_count);
    areas.push(footprint_area);
    for i in 1..node_count {
        let y = (max_depth - SURF_LAYER_DEPTH - dz * i as f64 / 2.0).max(0.0);
        let x = (y / a).powf(1.0 / exponent);
        areas.push(PI * x * x);
    }
    areas
}

/// Maximum storage volume by trapezoidal integration over the nodes [m^3].
///
/// The surface layer averages nodes 0 and 1 over [`SURF_LAYER_DEPTH`];
/// interior nodes average with their upper neighbour over `dz`; the last
/// node is a flat cap of thickness `dz`.
pub fn max_volume(areas: &[f64], dz: f64) -> f64 {
    let n = areas.len();
    if n == 0 {
        return 0.0;
    }

    let mut volume = 0.0;
    for i in 0..n {
        if i == 0 {
            let next = areas.get(1).copied().unwrap_or(0.0);
            volume += (areas[0] + next) * SURF_LAYER_DEPTH / 2.0;
        } else if i < n - 1 {
            volume += (areas[i] + areas[i + 1]) * dz / 2.0;
        } else {
            volume += areas[i] * dz;
        }
    }
    volume
}

/// Add the lake footprint to the running cover-fraction total.
///
/// Returns `(cv_sum, footprint_fraction)`. If the total passes
/// [`COVER_FRACTION_THRESHOLD`], the footprint is reduced by the overshoot
/// and the total is set to exactly 1.
pub fn allocate_cover_fraction(cv_sum: f64, footprint_fraction: f64) -> (f64, f64) {
    let total = cv_sum + footprint_fraction;
    if total > COVER_FRACTION_THRESHOLD {
        (1.0, footprint_fraction + (1.0 - total))
    } else {
        (total, footprint_fraction)
    }
}
