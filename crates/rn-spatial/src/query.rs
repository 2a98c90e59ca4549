//! Point-to-point query pipeline: locate, solve, assemble.

use tracing::debug;

use rn_core::{Coordinate, RoutingConfig};

use crate::network::RoadNetwork;
use crate::path::{PathAssembler, PathResult};
use crate::router::Router;
use crate::{NoRouteFound, SpatialError};

/// Route between two arbitrary points over `network`.
///
/// Each point is resolved to its nearest node within
/// `config.max_snap_radius_m`; the nodes are joined by `router`, and the
/// result is extended with access legs to the literal points.
///
/// Non-finite query points are treated as unreachable.  Points that resolve
/// to the same node have no path between them.
pub fn route_between(
    network: &RoadNetwork,
    router: &dyn Router,
    config: &RoutingConfig,
    start: Coordinate,
    end: Coordinate,
) -> Result<PathResult, NoRouteFound> {
    let radius_m = config.max_snap_radius_m;

    let Some((start_node, start_dist)) = network.nearest_node(start, radius_m) else {
        debug!(%start, radius_m, "no node within radius of start point");
        return Err(NoRouteFound::UnreachableStart { point: start, radius_m });
    };
    let Some((end_node, end_dist)) = network.nearest_node(end, radius_m) else {
        debug!(%end, radius_m, "no node within radius of end point");
        return Err(NoRouteFound::UnreachableEnd { point: end, radius_m });
    };
    debug!(%start_node, start_dist, %end_node, end_dist, "query points resolved");

    if start_node == end_node {
        debug!(node = %start_node, "both query points resolve to one node");
        return Err(NoRouteFound::Disconnected { from: start_node, to: end_node });
    }

    let path = match router.route(network, start_node, end_node) {
        Ok(path) => path,
        Err(SpatialError::NoRoute { from, to }) => {
            debug!(%from, %to, "nodes are not connected");
            return Err(NoRouteFound::Disconnected { from, to });
        }
        Err(SpatialError::NodeNotFound(node)) => {
            // Nodes come from this network's own index, so a router that
            // disowns them cannot connect them either.
            debug!(%node, "router rejected node from nearest-node lookup");
            return Err(NoRouteFound::Disconnected { from: start_node, to: end_node });
        }
    };

    Ok(PathAssembler::new(network).assemble(start, &path, end))
}
