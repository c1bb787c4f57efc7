/// One-shot lake initialization for a grid cell.
///
/// Computes the cell area, reads the cell's lake record and builds its
/// geometry. Called once per cell during model setup.
use serde::{Deserialize, Serialize};

use super::config::LakeOptions;
use super::geometry::{build_lake_geometry_with_limit, LakeGeometry};
use super::reader::LakeParamReader;
use crate::error::Result;
use crate::geodesy::GridCellLocation;

/// The land-surface side of a cell: its id and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LakeCell {
    pub cell_id: i64,
    pub location: GridCellLocation,
}

impl LakeCell {
    pub fn new(cell_id: i64, latitude: f64, longitude: f64, resolution: f64) -> Self {
        Self {
            cell_id,
            location: GridCellLocation::new(latitude, longitude, resolution),
        }
    }
}

/// Initialize the lake of `cell` from the parameter source.
///
/// `cv_sum` is the cover fraction already allocated to other cover types in
/// the cell; the updated total is returned with the geometry.
pub fn initialize(
    reader: &mut LakeParamReader,
    cell: &LakeCell,
    cv_sum: f64,
    options: &LakeOptions,
) -> Result<(LakeGeometry, f64)> {
    let grid_cell_area = cell.location.area();

    if options.rewind {
        reader.rewind();
    }
    reader.set_max_nodes(options.max_nodes);
    let record = reader.find_record(cell.cell_id, options.profile)?;

    build_lake_geometry_with_limit(&record, grid_cell_area, cv_sum, options.max_nodes)
}
