//! Spatial-subsystem error types.

use thiserror::Error;

use rn_core::{Coordinate, NodeId};

/// Errors produced by the node-to-node solver.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

/// Why a point-to-point query produced no path.
///
/// Every variant is an expected outcome of a well-formed query, not a fault:
/// callers report it to the user and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoRouteFound {
    #[error("start point {point} has no road node within {radius_m} m")]
    UnreachableStart { point: Coordinate, radius_m: f64 },

    #[error("end point {point} has no road node within {radius_m} m")]
    UnreachableEnd { point: Coordinate, radius_m: f64 },

    #[error("no directed path from {from} to {to}")]
    Disconnected { from: NodeId, to: NodeId },
}
