//! lakeprofile-core -- lake sub-grid geometry for land-surface hydrology models.
//!
//! Turns a per-cell lake parameter record into node depths, node surface
//! areas and storage capacity, and estimates grid-cell areas from their
//! latitude, longitude and resolution.
pub mod error;
pub mod geodesy;
pub mod lake;

pub use error::{LakeParamError, Result};
pub use geodesy::{estimate_cell_area, great_circle_distance, GridCellLocation};
pub use lake::config::LakeOptions;
pub use lake::geometry::{build_lake_geometry, LakeGeometry};
pub use lake::init::{initialize, LakeCell};
pub use lake::params::{LakeParameterRecord, ProfileKind, ProfileSpec};
pub use lake::reader::LakeParamReader;
