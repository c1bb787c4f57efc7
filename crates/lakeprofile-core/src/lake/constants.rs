/// Lake profile numerical constants and record layout.
///
/// Centralises the fixed values used when turning a lake parameter record
/// into a lake geometry.

// -- Vertical discretisation --

/// Maximum number of lake solution nodes accepted by default.
pub const MAX_LAKE_NODES: usize = 20;

/// Minimum number of nodes: one surface layer plus at least one below it.
pub const MIN_LAKE_NODES: usize = 2;

/// Thickness of the surface layer [m].
pub const SURF_LAYER_DEPTH: f64 = 1.0;

// -- Cover fraction accounting --

/// Cover-fraction total above which the lake footprint is trimmed so the
/// total becomes exactly one.
pub const COVER_FRACTION_THRESHOLD: f64 = 0.999;

// -- Fixed record values --

/// Fraction of grid-cell baseflow routed through the lake. Not carried by
/// this record format.
pub const BASEFLOW_FRACTION: f64 = 0.0;

/// Wetland vegetation class index. Not carried by this record format.
pub const WETLAND_VEG_CLASS: usize = 0;
