//! Vertex snapping: merge polyline vertices that denote the same place.
//!
//! # Semantics
//!
//! A vertex snaps to the **first registered** node whose great-circle
//! distance is strictly below the threshold; if there is none, the vertex is
//! registered as a new node.  Ties are resolved by registration order, not by
//! proximity: of two nodes both within tolerance, the older one wins even if
//! the newer one is closer.  Build order therefore decides which node an
//! intersection merges into.
//!
//! # Index
//!
//! Candidates come from an R-tree over Earth-centred Cartesian points, where
//! chord distance is monotonic in great-circle distance.  The tree returns a
//! superset of the nodes within tolerance (the search chord carries a small
//! margin), each candidate is confirmed with the haversine distance, and the
//! lowest `NodeId` — the earliest registered — is chosen.  This yields the
//! same node a linear scan in registration order would.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rn_core::geo::chord_for_distance;
use rn_core::{Coordinate, NodeId};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: an Earth-centred Cartesian point
/// (metres) with the associated `NodeId`.
#[derive(Clone, Debug)]
pub(crate) struct NodeEntry {
    pub(crate) point: [f64; 3],
    pub(crate) id: NodeId,
}

impl NodeEntry {
    pub(crate) fn new(pos: Coordinate, id: NodeId) -> Self {
        Self { point: pos.to_cartesian(), id }
    }
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared chord length in metres².
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── NodeSnapper ───────────────────────────────────────────────────────────────

/// Registry of canonical node positions for one graph build.
///
/// `NodeId`s are handed out sequentially from 0 in registration order.
pub struct NodeSnapper {
    threshold_m:  f64,
    search_chord: f64,
    nodes:        Vec<Coordinate>,
    index:        RTree<NodeEntry>,
}

impl NodeSnapper {
    pub fn new(threshold_m: f64) -> Self {
        Self::with_capacity(threshold_m, 0)
    }

    pub fn with_capacity(threshold_m: f64, nodes: usize) -> Self {
        Self {
            threshold_m,
            search_chord: chord_for_distance(threshold_m) * (1.0 + 1e-9) + 1e-6,
            nodes: Vec::with_capacity(nodes),
            index: RTree::new(),
        }
    }

    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    /// Return the node `pos` snaps to, registering `pos` as a new node when
    /// no existing node is within tolerance.
    ///
    /// `pos` must be finite; road validation guarantees this during builds.
    pub fn snap(&mut self, pos: Coordinate) -> NodeId {
        debug_assert!(pos.is_finite(), "snapping non-finite coordinate {pos}");
        if let Some(existing) = self.find(pos) {
            return existing;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.index.insert(NodeEntry::new(pos, id));
        id
    }

    /// The earliest registered node strictly within tolerance of `pos`, if
    /// any.  Does not register anything.
    pub fn find(&self, pos: Coordinate) -> Option<NodeId> {
        self.index
            .locate_within_distance(pos.to_cartesian(), self.search_chord * self.search_chord)
            .filter(|entry| self.nodes[entry.id.index()].distance_m(pos) < self.threshold_m)
            .map(|entry| entry.id)
            .min()
    }

    /// Canonical position of a registered node.
    pub fn position(&self, id: NodeId) -> Coordinate {
        self.nodes[id.index()]
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_positions(self) -> Vec<Coordinate> {
        self.nodes
    }
}
