//! Error type for lake parameter reading and geometry construction.

use thiserror::Error;

/// Everything that can go wrong while initializing a lake for one cell.
///
/// All variants are configuration or data errors; no partial geometry is
/// ever returned alongside one.
#[derive(Debug, Error)]
pub enum LakeParamError {
    /// The requested cell was not found before the end of the source.
    #[error(
        "unable to find cell {cell_id} in the lake parameter source \
         (records must be in scan order, or enable rewind)"
    )]
    CellNotFound { cell_id: i64 },

    /// Declared node count is above the supported maximum.
    #[error("number of lake nodes {node_count} exceeds the maximum allowable {max_nodes}")]
    NodeCountExceedsLimit { node_count: usize, max_nodes: usize },

    /// Declared node count leaves no layer below the surface layer.
    #[error("number of lake nodes {node_count} is below the minimum {min_nodes}")]
    TooFewNodes { node_count: usize, min_nodes: usize },

    /// Maximum depth is not a positive finite value.
    #[error("maximum lake depth {max_depth} must be positive and finite")]
    InvalidMaxDepth { max_depth: f64 },

    /// Initial depth is deeper than the lake.
    #[error("initial depth {initial_depth} exceeds the specified maximum lake depth {max_depth}")]
    InitialDepthExceedsMax { initial_depth: f64, max_depth: f64 },

    /// A per-node area fraction is outside [0, 1].
    #[error("lake area fraction {value} at node {node} must be between 0 and 1")]
    AreaFractionOutOfRange { node: usize, value: f64 },

    /// Runoff fraction is outside [0, 1].
    #[error("runoff fraction {value} must be between 0 and 1")]
    RunoffFractionOutOfRange { value: f64 },

    /// Number of tabulated area fractions does not match the node count.
    #[error("expected {expected} area fractions, got {actual}")]
    FractionCountMismatch { expected: usize, actual: usize },

    /// Exponent of the analytic area-depth relation is unusable.
    #[error("profile exponent {value} must be positive and finite")]
    InvalidProfileExponent { value: f64 },

    /// Malformed token in the parameter source.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O failure while reading the parameter source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LakeParamError>;
