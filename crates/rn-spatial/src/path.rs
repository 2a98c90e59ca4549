//! Turning a solved node path into a user-facing route.
//!
//! # Coordinate sequence
//!
//! 1. The literal query start.
//! 2. The start node, unless it equals the query start.
//! 3. The terminal node of every traversed edge.
//! 4. The literal query end, unless the sequence already ends with it.
//!
//! The sequence therefore always begins with the query start and ends with
//! the query end, verbatim.
//!
//! # Segments
//!
//! | Kind          | Emitted when                                    | `road_id` |
//! |---------------|-------------------------------------------------|-----------|
//! | `StartAccess` | query start is a non-zero distance from its node | `None`    |
//! | `Road`        | one per traversed edge                          | `Some`    |
//! | `Unknown`     | a node pair has no edge in the graph            | `None`    |
//! | `EndAccess`   | query end is a non-zero distance from its node  | `None`    |
//!
//! `total_distance_m` is accumulated over the segments in order, so it
//! equals their sum exactly.

use rn_core::{Coordinate, EdgeId, NodeId, RoadId};

use crate::network::RoadNetwork;
use crate::router::NodePath;

// ── Segment ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SegmentKind {
    /// A stretch of a real road.
    Road,
    /// Synthetic leg from the query start to its nearest node.
    StartAccess,
    /// Synthetic leg from the end node to the query end.
    EndAccess,
    /// Consecutive path nodes with no edge record between them.
    Unknown,
}

impl SegmentKind {
    pub fn is_access(self) -> bool {
        matches!(self, SegmentKind::StartAccess | SegmentKind::EndAccess)
    }
}

/// One leg of a [`PathResult`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Road that contributed the leg; `None` for access and unknown legs.
    pub road_id: Option<RoadId>,
    pub length_m: f64,
    pub kind: SegmentKind,
}

impl Segment {
    fn road(road_id: RoadId, length_m: f64) -> Self {
        Self { road_id: Some(road_id), length_m, kind: SegmentKind::Road }
    }

    fn synthetic(kind: SegmentKind, length_m: f64) -> Self {
        Self { road_id: None, length_m, kind }
    }
}

// ── PathResult ────────────────────────────────────────────────────────────────

/// A complete point-to-point route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Full route geometry, from the literal query start to the literal
    /// query end.
    pub coordinates: Vec<Coordinate>,
    /// Route length in metres, including access legs.
    pub total_distance_m: f64,
    pub segments: Vec<Segment>,
}

impl PathResult {
    /// Sum of segment lengths, recomputed.
    pub fn segment_sum_m(&self) -> f64 {
        self.segments.iter().map(|s| s.length_m).sum()
    }

    /// Estimated time to cover the route at `speed_mps`.
    pub fn travel_secs(&self, speed_mps: f64) -> f64 {
        self.total_distance_m / speed_mps
    }

    /// Roads used, in travel order, with consecutive repeats collapsed.
    pub fn road_ids(&self) -> Vec<&RoadId> {
        let mut ids: Vec<&RoadId> = Vec::new();
        for id in self.segments.iter().filter_map(|s| s.road_id.as_ref()) {
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Access legs only, in order.
    pub fn access_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|s| s.kind.is_access())
    }
}

// ── PathAssembler ─────────────────────────────────────────────────────────────

/// Bridges a node path to the arbitrary points a query started and ended at.
pub struct PathAssembler<'a> {
    network: &'a RoadNetwork,
}

impl<'a> PathAssembler<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    pub fn assemble(&self, query_start: Coordinate, path: &NodePath, query_end: Coordinate) -> PathResult {
        let net = self.network;
        let start_node = net.node_pos[path.start().index()];
        let end_node = net.node_pos[path.end().index()];

        let mut coordinates = Vec::with_capacity(path.nodes().len() + 2);
        let mut segments = Vec::with_capacity(path.edges().len() + 2);

        coordinates.push(query_start);
        let access_start = query_start.distance_m(start_node);
        if query_start != start_node && access_start > 0.0 {
            segments.push(Segment::synthetic(SegmentKind::StartAccess, access_start));
        }
        if query_start != start_node {
            coordinates.push(start_node);
        }

        for (i, pair) in path.nodes().windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            match self.edge_between(path.edges().get(i).copied(), from, to) {
                Some(edge) => {
                    coordinates.push(net.edge_geometry(edge)[1]);
                    segments.push(Segment::road(
                        net.edge_road[edge.index()].clone(),
                        net.edge_length_m[edge.index()],
                    ));
                }
                None => {
                    let (a, b) = (net.node_pos[from.index()], net.node_pos[to.index()]);
                    coordinates.push(b);
                    segments.push(Segment::synthetic(SegmentKind::Unknown, a.distance_m(b)));
                }
            }
        }

        let access_end = end_node.distance_m(query_end);
        if query_end != end_node && access_end > 0.0 {
            segments.push(Segment::synthetic(SegmentKind::EndAccess, access_end));
        }
        if coordinates.last() != Some(&query_end) {
            coordinates.push(query_end);
        }

        let total_distance_m = segments.iter().fold(0.0, |acc, s| acc + s.length_m);
        PathResult { coordinates, total_distance_m, segments }
    }

    /// The edge the solver relaxed for `from → to`, falling back to any
    /// directed edge between the pair.
    fn edge_between(&self, relaxed: Option<EdgeId>, from: NodeId, to: NodeId) -> Option<EdgeId> {
        let net = self.network;
        relaxed
            .filter(|e| {
                e.index() < net.edge_count()
                    && net.edge_from[e.index()] == from
                    && net.edge_to[e.index()] == to
            })
            .or_else(|| net.find_edge(from, to))
    }
}
