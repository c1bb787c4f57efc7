/// Lake parameter record as read from the per-cell parameter source.
///
/// Scalar fields come in file order, followed by the profile tail described
/// by [`ProfileSpec`].
use serde::{Deserialize, Serialize};

use super::constants::{MAX_LAKE_NODES, MIN_LAKE_NODES};
use crate::error::{LakeParamError, Result};

/// Which area-depth profile a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileKind {
    /// One area fraction per node, read from the record.
    #[default]
    Tabulated,
    /// Power-law basin shape `y = A x^b` from a footprint and an exponent.
    Parabolic,
}

/// Area-depth profile parameters of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProfileSpec {
    /// Fraction of grid-cell area covered at each node. Element 0 is the
    /// lake footprint at maximum depth.
    Tabulated { area_fractions: Vec<f64> },
    /// Footprint fraction and exponent of the analytic basin shape.
    Parabolic { footprint_fraction: f64, exponent: f64 },
}

impl ProfileSpec {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileSpec::Tabulated { .. } => ProfileKind::Tabulated,
            ProfileSpec::Parabolic { .. } => ProfileKind::Parabolic,
        }
    }

    /// Fraction of grid-cell area covered by the lake at maximum depth.
    pub fn footprint_fraction(&self) -> f64 {
        match self {
            ProfileSpec::Tabulated { area_fractions } => {
                area_fractions.first().copied().unwrap_or(0.0)
            }
            ProfileSpec::Parabolic {
                footprint_fraction, ..
            } => *footprint_fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LakeParameterRecord {
    /// Grid-cell identifier the record belongs to.
    pub cell_id: i64,
    /// Maximum lake depth [m].
    pub max_depth: f64,
    /// Number of lake solution nodes.
    pub node_count: usize,
    /// Minimum lake depth [m].
    pub min_depth: f64,
    /// Maximum drawdown rate [m per time unit].
    pub max_drawdown_rate: f64,
    /// Initial lake depth [m].
    pub initial_depth: f64,
    /// Fraction of grid-cell runoff routed through the lake [-].
    pub runoff_fraction: f64,
    pub profile: ProfileSpec,
}

impl LakeParameterRecord {
    /// Check the record against the default node limit.
    pub fn validate(&self) -> Result<()> {
        self.validate_with_limit(MAX_LAKE_NODES)
    }

    /// Check the record, allowing at most `max_nodes` nodes.
    ///
    /// Checks run in a fixed order: node count limits, depths, runoff
    /// fraction, then the profile tail.
    pub fn validate_with_limit(&self, max_nodes: usize) -> Result<()> {
        if self.node_count > max_nodes {
            return Err(LakeParamError::NodeCountExceedsLimit {
                node_count: self.node_count,
                max_nodes,
            });
        }
        if self.node_count < MIN_LAKE_NODES {
            return Err(LakeParamError::TooFewNodes {
                node_count: self.node_count,
                min_nodes: MIN_LAKE_NODES,
            });
        }
        if !(self.max_depth.is_finite() && self.max_depth > 0.0) {
            return Err(LakeParamError::InvalidMaxDepth {
                max_depth: self.max_depth,
            });
        }
        if self.initial_depth.is_nan() || self.initial_depth > self.max_depth {
            return Err(LakeParamError::InitialDepthExceedsMax {
                initial_depth: self.initial_depth,
                max_depth: self.max_depth,
            });
        }
        if !(0.0..=1.0).contains(&self.runoff_fraction) {
            return Err(LakeParamError::RunoffFractionOutOfRange {
                value: self.runoff_fraction,
            });
        }

        match &self.profile {
            ProfileSpec::Tabulated { area_fractions } => {
                if area_fractions.len() != self.node_count {
                    return Err(LakeParamError::FractionCountMismatch {
                        expected: self.node_count,
                        actual: area_fractions.len(),
                    });
                }
                for (node, &value) in area_fractions.iter().enumerate() {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(LakeParamError::AreaFractionOutOfRange { node, value });
                    }
                }
            }
            ProfileSpec::Parabolic {
                footprint_fraction,
                exponent,
            } => {
                if !(0.0..=1.0).contains(footprint_fraction) {
                    return Err(LakeParamError::AreaFractionOutOfRange {
                        node: 0,
                        value: *footprint_fraction,
                    });
                }
                if !(exponent.is_finite() && *exponent > 0.0) {
                    return Err(LakeParamError::InvalidProfileExponent { value: *exponent });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabulated(node_count: usize, fractions: Vec<f64>) -> LakeParameterRecord {
        LakeParameterRecord {
            cell_id: 1,
            max_depth: 9.0,
            node_count,
            min_depth: 1.0,
            max_drawdown_rate: 0.02,
            initial_depth: 5.0,
            runoff_fraction: 0.5,
            profile: ProfileSpec::Tabulated {
                area_fractions: fractions,
            },
        }
    }

    #[test]
    fn valid_record() {
        let r = tabulated(3, vec![0.1, 0.06, 0.02]);
        assert!(r.validate().is_ok());
        assert_eq!(r.profile.kind(), ProfileKind::Tabulated);
        assert_eq!(r.profile.footprint_fraction(), 0.1);
    }

    #[test]
    fn node_count_one_above_limit() {
        let n = MAX_LAKE_NODES + 1;
        let r = tabulated(n, vec![0.1; n]);
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::NodeCountExceedsLimit { node_count, max_nodes })
                if node_count == n && max_nodes == MAX_LAKE_NODES
        ));
    }

    #[test]
    fn node_count_at_limit_is_valid() {
        let r = tabulated(MAX_LAKE_NODES, vec![0.1; MAX_LAKE_NODES]);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn custom_limit() {
        let r = tabulated(5, vec![0.1; 5]);
        assert!(r.validate_with_limit(5).is_ok());
        assert!(r.validate_with_limit(4).is_err());
    }

    #[test]
    fn single_node_rejected() {
        let r = tabulated(1, vec![0.1]);
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::TooFewNodes { node_count: 1, .. })
        ));
    }

    #[test]
    fn initial_depth_above_max_depth() {
        let mut r = tabulated(3, vec![0.1, 0.06, 0.02]);
        r.initial_depth = 9.5;
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::InitialDepthExceedsMax { .. })
        ));
    }

    #[test]
    fn initial_depth_equal_to_max_depth_is_valid() {
        let mut r = tabulated(3, vec![0.1, 0.06, 0.02]);
        r.initial_depth = r.max_depth;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn nan_initial_depth_rejected() {
        let mut r = tabulated(3, vec![0.1, 0.06, 0.02]);
        r.initial_depth = f64::NAN;
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::InitialDepthExceedsMax { .. })
        ));
    }

    #[test]
    fn non_positive_max_depth() {
        let mut r = tabulated(3, vec![0.1, 0.06, 0.02]);
        r.max_depth = 0.0;
        r.initial_depth = 0.0;
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::InvalidMaxDepth { .. })
        ));
    }

    #[test]
    fn area_fraction_above_one() {
        let r = tabulated(3, vec![0.1, 1.5, 0.02]);
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::AreaFractionOutOfRange { node: 1, value }) if value == 1.5
        ));
    }

    #[test]
    fn negative_area_fraction() {
        let r = tabulated(3, vec![0.1, 0.06, -0.01]);
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::AreaFractionOutOfRange { node: 2, .. })
        ));
    }

    #[test]
    fn fraction_bounds_are_inclusive() {
        assert!(tabulated(3, vec![1.0, 0.5, 0.0]).validate().is_ok());
    }

    #[test]
    fn fraction_count_mismatch() {
        let r = tabulated(3, vec![0.1, 0.06]);
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::FractionCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn runoff_fraction_out_of_range() {
        let mut r = tabulated(3, vec![0.1, 0.06, 0.02]);
        r.runoff_fraction = 1.2;
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::RunoffFractionOutOfRange { .. })
        ));
    }

    #[test]
    fn parabolic_checks() {
        let mut r = tabulated(4, vec![]);
        r.profile = ProfileSpec::Parabolic {
            footprint_fraction: 0.2,
            exponent: 2.0,
        };
        assert!(r.validate().is_ok());
        assert_eq!(r.profile.kind(), ProfileKind::Parabolic);

        r.profile = ProfileSpec::Parabolic {
            footprint_fraction: 1.5,
            exponent: 2.0,
        };
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::AreaFractionOutOfRange { node: 0, .. })
        ));

        r.profile = ProfileSpec::Parabolic {
            footprint_fraction: 0.2,
            exponent: 0.0,
        };
        assert!(matches!(
            r.validate(),
            Err(LakeParamError::InvalidProfileExponent { .. })
        ));
    }
}
