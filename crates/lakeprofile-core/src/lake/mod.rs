/// Lake sub-grid geometry -- bathymetry, storage and cover fraction of the
/// single lake in a land-surface model grid cell.
///
/// A per-cell parameter record is read once at model setup and turned into
/// a [`geometry::LakeGeometry`] with either a tabulated or an analytic
/// area-depth profile.
pub mod config;
pub mod constants;
pub mod geometry;
pub mod init;
pub mod params;
pub mod processes;
pub mod reader;

use smallvec::SmallVec;

/// Per-node values, sized exactly to the node count.
pub type NodeSeries = SmallVec<[f64; constants::MAX_LAKE_NODES]>;
