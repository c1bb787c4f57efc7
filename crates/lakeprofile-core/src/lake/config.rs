//! Lake initialization options.

use serde::{Deserialize, Serialize};

use super::constants::MAX_LAKE_NODES;
use super::params::ProfileKind;

/// Options controlling how lake records are located and interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LakeOptions {
    /// Area-depth profile carried by the records.
    pub profile: ProfileKind,
    /// Search the parameter source from the top for every cell instead of
    /// continuing from the previous record.
    pub rewind: bool,
    /// Largest accepted node count.
    pub max_nodes: usize,
}

impl Default for LakeOptions {
    fn default() -> Self {
        Self {
            profile: ProfileKind::Tabulated,
            rewind: false,
            max_nodes: MAX_LAKE_NODES,
        }
    }
}
