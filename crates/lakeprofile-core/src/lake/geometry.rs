/// Lake geometry construction.
///
/// Turns a validated [`LakeParameterRecord`] and the grid-cell area into a
/// [`LakeGeometry`], and folds the lake footprint into the cell's
/// cover-fraction total.
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::constants::{BASEFLOW_FRACTION, MAX_LAKE_NODES, WETLAND_VEG_CLASS};
use super::params::{LakeParameterRecord, ProfileSpec};
use super::processes;
use super::NodeSeries;
use crate::error::Result;

/// Static geometry of one lake, owned by the simulation of its cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LakeGeometry {
    pub cell_id: i64,
    /// Area of the enclosing grid cell [m^2].
    pub grid_cell_area: f64,
    pub node_count: usize,
    /// Maximum lake depth [m].
    pub max_depth: f64,
    /// Minimum lake depth [m].
    pub min_depth: f64,
    /// Maximum drawdown rate [m per time unit].
    pub max_drawdown_rate: f64,
    /// Initial lake depth [m].
    pub initial_depth: f64,
    /// Fraction of grid-cell runoff routed through the lake [-].
    pub runoff_fraction: f64,
    /// Fraction of grid-cell baseflow routed through the lake [-].
    pub baseflow_fraction: f64,
    pub wetland_veg_class: usize,
    /// Spacing between nodes below the surface layer [m].
    pub layer_thickness: f64,
    /// Depth of each node below the surface [m]. Node 0 is the bottom.
    pub node_depth: NodeSeries,
    /// Surface area at each node [m^2].
    pub node_surface_area: NodeSeries,
    /// Fraction of grid-cell area at each node, after cover-fraction
    /// adjustment of node 0 [-].
    pub area_fractions: NodeSeries,
    /// Storage capacity at maximum depth [m^3].
    pub max_volume: f64,
}

impl LakeGeometry {
    /// Fraction of the grid cell allotted to the lake [-].
    pub fn footprint_fraction(&self) -> f64 {
        self.area_fractions[0]
    }

    /// Lake surface area at maximum depth [m^2].
    pub fn footprint_area(&self) -> f64 {
        self.node_surface_area[0]
    }
}

/// Build the lake geometry for one cell.
///
/// Takes the cover-fraction total already allocated in the cell and
/// returns it updated with the lake footprint. Fails before computing
/// anything if the record is invalid.
pub fn build_lake_geometry(
    record: &LakeParameterRecord,
    grid_cell_area: f64,
    cv_sum: f64,
) -> Result<(LakeGeometry, f64)> {
    build_lake_geometry_with_limit(record, grid_cell_area, cv_sum, MAX_LAKE_NODES)
}

/// [`build_lake_geometry`] with an explicit node limit.
pub fn build_lake_geometry_with_limit(
    record: &LakeParameterRecord,
    grid_cell_area: f64,
    cv_sum: f64,
    max_nodes: usize,
) -> Result<(LakeGeometry, f64)> {
    record.validate_with_limit(max_nodes)?;

    let n = record.node_count;
    let dz = processes::layer_thickness(record.max_depth, n);
    let node_depth = processes::node_depths(n, dz);

    let (node_surface_area, mut area_fractions) = match &record.profile {
        ProfileSpec::Tabulated { area_fractions } => {
            let areas = processes::tabulated_areas(area_fractions, grid_cell_area);
            (areas, area_fractions.iter().copied().collect::<NodeSeries>())
        }
        ProfileSpec::Parabolic {
            footprint_fraction,
            exponent,
        } => {
            warn!(
                "cell {}: computing analytic lake profile, which is unverified",
                record.cell_id
            );
            let areas = processes::parabolic_areas(
                footprint_fraction * grid_cell_area,
                *exponent,
                record.max_depth,
                dz,
                n,
            );
            let mut fractions: NodeSeries = if grid_cell_area > 0.0 {
                areas.iter().map(|a| a / grid_cell_area).collect()
            } else {
                smallvec::smallvec![0.0; n]
            };
            fractions[0] = *footprint_fraction;
            (areas, fractions)
        }
    };

    let max_volume = processes::max_volume(&node_surface_area, dz);

    let (new_cv_sum, footprint) = processes::allocate_cover_fraction(cv_sum, area_fractions[0]);
    if footprint != area_fractions[0] {
        debug!(
            "cell {}: cover fraction reached {}, lake footprint adjusted {} -> {}",
            record.cell_id,
            cv_sum + area_fractions[0],
            area_fractions[0],
            footprint
        );
        area_fractions[0] = footprint;
    }

    let geometry = LakeGeometry {
        cell_id: record.cell_id,
        grid_cell_area,
        node_count: n,
        max_depth: record.max_depth,
        min_depth: record.min_depth,
        max_drawdown_rate: record.max_drawdown_rate,
        initial_depth: record.initial_depth,
        runoff_fraction: record.runoff_fraction,
        baseflow_fraction: BASEFLOW_FRACTION,
        wetland_veg_class: WETLAND_VEG_CLASS,
        layer_thickness: dz,
        node_depth,
        node_surface_area,
        area_fractions,
        max_volume,
    };

    Ok((geometry, new_cv_sum))
}
