//! Routing configuration.

use crate::{RnError, RnResult};

/// Tunables shared by graph construction and route queries.
///
/// Typically built by the application from a file or the environment and
/// handed to the routing engine, which calls [`validate`](Self::validate)
/// before using it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// Polyline vertices closer than this (strictly) to an already
    /// registered node merge into it.  Default: 1.0 m.
    pub snap_threshold_m: f64,

    /// Query points farther than this from every node are unreachable.
    /// Inclusive: a node exactly this far away still qualifies.
    /// Default: 500.0 m.
    pub max_snap_radius_m: f64,

    /// Speed used by [`travel estimates`](Self::travel_secs).  Default: 1.4 m/s
    /// (walking pace).
    pub access_speed_mps: f64,
}

impl RoutingConfig {
    pub const DEFAULT_SNAP_THRESHOLD_M: f64 = 1.0;
    pub const DEFAULT_MAX_SNAP_RADIUS_M: f64 = 500.0;
    pub const DEFAULT_ACCESS_SPEED_MPS: f64 = 1.4;

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> RnResult<()> {
        check_positive("snap_threshold_m", self.snap_threshold_m)?;
        check_positive("max_snap_radius_m", self.max_snap_radius_m)?;
        check_positive("access_speed_mps", self.access_speed_mps)?;
        Ok(())
    }

    /// Seconds needed to cover `distance_m` at `access_speed_mps`.
    #[inline]
    pub fn travel_secs(&self, distance_m: f64) -> f64 {
        distance_m / self.access_speed_mps
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            snap_threshold_m:  Self::DEFAULT_SNAP_THRESHOLD_M,
            max_snap_radius_m: Self::DEFAULT_MAX_SNAP_RADIUS_M,
            access_speed_mps:  Self::DEFAULT_ACCESS_SPEED_MPS,
        }
    }
}

fn check_positive(name: &str, value: f64) -> RnResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RnError::Config(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}
