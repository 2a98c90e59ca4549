//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The query pipeline and `rn-engine` call the solver through the [`Router`]
//! trait, so applications can swap in other implementations (A*, contraction
//! hierarchies) without touching graph construction or path assembly.
//!
//! # Cost units
//!
//! Edge cost is `edge_length_m`, in metres (f64).  Lengths are validated as
//! finite and non-negative at build time, which Dijkstra requires.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rn_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── NodePath ──────────────────────────────────────────────────────────────────

/// A solved node-to-node path: the visited nodes, the directed edges that
/// were relaxed to reach them, and the summed edge length.
///
/// `edges.len() == nodes.len() - 1`; `edges[i]` leads from `nodes[i]` to
/// `nodes[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePath {
    nodes:      Vec<NodeId>,
    edges:      Vec<EdgeId>,
    distance_m: f64,
}

impl NodePath {
    pub(crate) fn new(nodes: Vec<NodeId>, edges: Vec<EdgeId>, distance_m: f64) -> Self {
        debug_assert_eq!(edges.len() + 1, nodes.len());
        Self { nodes, edges, distance_m }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Sum of edge lengths along the path, in metres.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable node-to-node shortest-path solver.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve queries
/// from many threads against a shared published graph.
pub trait Router: Send + Sync {
    /// Compute the minimum-length path from `from` to `to`.
    ///
    /// Returns [`SpatialError::NoRoute`] when `to` is unreachable or equal to
    /// `from` (a path needs at least one edge), and
    /// [`SpatialError::NodeNotFound`] for ids outside the network.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<NodePath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Single-pair Dijkstra over the CSR road graph with early exit at the
/// target.
///
/// Among frontier nodes with equal tentative distance, the lower `NodeId` is
/// settled first.  Other routers may order ties differently; only the path
/// length is guaranteed to agree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<NodePath> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap entry.  `Ord` is reversed so `BinaryHeap` (a max-heap) pops the
/// smallest distance first; `NodeId` breaks ties deterministically.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<NodePath> {
    let n = network.node_count();
    for id in [from, to] {
        if id.index() >= n {
            return Err(SpatialError::NodeNotFound(id));
        }
    }
    if from == to {
        return Err(SpatialError::NoRoute { from, to });
    }

    // dist[v] = best known length (m) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut settled   = vec![false; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { dist: 0.0, node: from });

    while let Some(Frontier { dist: cost, node }) = heap.pop() {
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to, cost));
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            if settled[neighbor.index()] {
                continue;
            }
            let candidate = cost + network.edge_length_m[edge.index()];
            if candidate < dist[neighbor.index()] {
                dist[neighbor.index()] = candidate;
                prev_edge[neighbor.index()] = edge;
                heap.push(Frontier { dist: candidate, node: neighbor });
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    distance_m: f64,
) -> NodePath {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    NodePath::new(nodes, edges, distance_m)
}
