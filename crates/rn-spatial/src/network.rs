//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`, `edge_road`)
//! are sorted by source node and indexed by `EdgeId`.  Within one source
//! node, edges keep the order in which they were added.
//!
//! # Edge identity
//!
//! A directed edge is identified by its `(from, to)` node pair.  When two
//! roads produce the same directed pair, the later one overwrites the earlier
//! one's road id and length (last write wins); the overwrite is counted in
//! the [`BuildReport`].
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over Earth-centred Cartesian node positions
//! answers nearest-node queries with great-circle semantics.  A
//! [`GridKey`] map resolves exact node positions.

use rstar::{PointDistance, RTree};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use rn_core::{Coordinate, EdgeId, GridKey, NodeId, RoadId};

use crate::road::{RoadDefect, RoadRecord};
use crate::snap::{NodeEntry, NodeSnapper};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node lookup.
///
/// All array fields are `pub` for direct indexed access on hot paths.  Do
/// not construct directly; use [`RoadNetworkBuilder`].  A built network is
/// never mutated: rebuilding produces a new value.
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Canonical (snapped) position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Coordinate>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  Never negative.
    pub edge_length_m: Vec<f64>,

    /// Road that contributed each edge.
    pub edge_road: Vec<RoadId>,

    // ── Lookup structures ─────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
    node_keys:   FxHashMap<GridKey, NodeId>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Every query against an empty network is unreachable.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new(rn_core::RoutingConfig::DEFAULT_SNAP_THRESHOLD_M).build()
    }

    /// Build a whole network from a batch of roads, in order.
    ///
    /// Malformed roads are skipped and listed in the returned report; they
    /// never abort the build.
    pub fn from_roads(roads: &[RoadRecord], snap_threshold_m: f64) -> (RoadNetwork, BuildReport) {
        let mut builder = RoadNetworkBuilder::new(snap_threshold_m);
        for road in roads {
            // Skips are recorded in the report.
            let _ = builder.add_road(road);
        }
        builder.finish()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The directed edge `from → to`, if the graph has one.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if from.index() >= self.node_count() {
            return None;
        }
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }

    /// Two-point geometry `[from, to]` of an edge.
    #[inline]
    pub fn edge_geometry(&self, edge: EdgeId) -> [Coordinate; 2] {
        [
            self.node_pos[self.edge_from[edge.index()].index()],
            self.node_pos[self.edge_to[edge.index()].index()],
        ]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node registered at exactly `pos` (to 1e-7°), if any.
    pub fn find_node(&self, pos: Coordinate) -> Option<NodeId> {
        if !pos.is_finite() {
            return None;
        }
        self.node_keys.get(&GridKey::new(pos)).copied()
    }

    /// The node with the smallest great-circle distance to `pos`, together
    /// with that distance, provided it is at most `max_radius_m` away.
    ///
    /// Equidistant nodes resolve to the lowest `NodeId`.  Returns `None` for
    /// an empty network, a non-finite `pos`, or when the nearest node lies
    /// beyond the radius — a hard cutoff.
    pub fn nearest_node(&self, pos: Coordinate, max_radius_m: f64) -> Option<(NodeId, f64)> {
        if !pos.is_finite() {
            return None;
        }
        let query = pos.to_cartesian();
        let mut candidates = self.spatial_idx.nearest_neighbor_iter(&query);
        let first = candidates.next()?;

        // Chord order and great-circle order agree; re-check near-ties with
        // haversine so rounding in either metric cannot reorder them.
        let tie_cutoff = first.distance_2(&query) * (1.0 + 1e-9) + 1e-9;
        let mut best = (first.id, self.node_pos[first.id.index()].distance_m(pos));
        for entry in candidates.take_while(|e| e.distance_2(&query) <= tie_cutoff) {
            let d = self.node_pos[entry.id.index()].distance_m(pos);
            if d < best.1 || (d == best.1 && entry.id < best.0) {
                best = (entry.id, d);
            }
        }

        (best.1 <= max_radius_m).then_some(best)
    }
}

// ── BuildReport ───────────────────────────────────────────────────────────────

/// A road left out of the graph and the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRoad {
    pub road:   RoadId,
    pub defect: RoadDefect,
}

/// What happened to the input of one graph build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Roads offered to the builder.
    pub roads_seen: usize,
    /// Roads that contributed edges.
    pub roads_added: usize,
    /// Malformed roads, in input order.
    pub skipped: Vec<SkippedRoad>,
    /// Roads whose supplied lengths did not line up with their segments and
    /// were replaced by great-circle distances.
    pub lengths_recomputed: usize,
    /// Directed edges replaced by a later road with the same node pair.
    pub edges_overwritten: usize,
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] road by road, then call [`build`](Self::build).
///
/// Every vertex is snapped against the nodes registered so far, so roads
/// added earlier claim shared intersection nodes.  `build()` sorts edges by
/// source node, constructs the CSR arrays, and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use rn_core::Coordinate;
/// use rn_spatial::{RoadNetworkBuilder, RoadRecord};
///
/// let mut b = RoadNetworkBuilder::new(1.0);
/// b.add_road(&RoadRecord::new(
///     "main-street",
///     vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)],
///     false,
/// ))
/// .unwrap();
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    snapper:   NodeSnapper,
    raw_edges: Vec<RawEdge>,
    by_pair:   FxHashMap<(NodeId, NodeId), usize>,
    report:    BuildReport,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    road:     RoadId,
}

impl RoadNetworkBuilder {
    pub fn new(snap_threshold_m: f64) -> Self {
        Self::with_capacity(snap_threshold_m, 0, 0)
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(snap_threshold_m: f64, nodes: usize, edges: usize) -> Self {
        Self {
            snapper:   NodeSnapper::with_capacity(snap_threshold_m, nodes),
            raw_edges: Vec::with_capacity(edges),
            by_pair:   FxHashMap::with_capacity_and_hasher(edges, Default::default()),
            report:    BuildReport::default(),
        }
    }

    /// Snap `pos` to an existing node or register it as a new one.
    pub fn add_node(&mut self, pos: Coordinate) -> NodeId {
        self.snapper.snap(pos)
    }

    /// Add a **directed** edge from `from` to `to`, replacing any earlier
    /// edge between the same ordered pair.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64, road: RoadId) {
        if let Some(&slot) = self.by_pair.get(&(from, to)) {
            let edge = &mut self.raw_edges[slot];
            debug!(
                %from, %to,
                previous = %edge.road, road = %road,
                "directed edge overwritten by later road"
            );
            edge.length_m = length_m;
            edge.road = road;
            self.report.edges_overwritten += 1;
            return;
        }
        self.by_pair.insert((from, to), self.raw_edges.len());
        self.raw_edges.push(RawEdge { from, to, length_m, road });
    }

    /// Snap a road's vertices and add one edge per segment, plus the reverse
    /// edge unless the road is one-way or the segment collapses to one node.
    ///
    /// A malformed road adds nothing (no nodes, no edges); the defect is
    /// logged, recorded in the report, and returned.
    pub fn add_road(&mut self, road: &RoadRecord) -> Result<(), RoadDefect> {
        self.report.roads_seen += 1;

        if let Err(defect) = road.check() {
            warn!(road = %road.id, %defect, "skipping malformed road");
            self.report.skipped.push(SkippedRoad { road: road.id.clone(), defect: defect.clone() });
            return Err(defect);
        }

        let lengths = road.aligned_lengths();
        if road.has_misaligned_lengths() {
            debug!(
                road = %road.id,
                segments = road.segment_count(),
                "segment lengths do not match geometry; using great-circle distances"
            );
            self.report.lengths_recomputed += 1;
        }

        let nodes: Vec<NodeId> = road.coordinates.iter().map(|&pos| self.add_node(pos)).collect();

        for (i, pair) in nodes.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let length_m = match lengths {
                Some(lengths) => lengths[i],
                None => self.node_pos(from).distance_m(self.node_pos(to)),
            };

            self.add_directed_edge(from, to, length_m, road.id.clone());
            if !road.is_oneway && from != to {
                self.add_directed_edge(to, from, length_m, road.id.clone());
            }
        }

        self.report.roads_added += 1;
        Ok(())
    }

    /// Canonical position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Coordinate {
        self.snapper.position(id)
    }

    pub fn node_count(&self) -> usize { self.snapper.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree bulk
    /// load, where N = nodes, E = edges.
    pub fn build(self) -> RoadNetwork {
        self.finish().0
    }

    /// Like [`build`](Self::build), also returning the build report.
    pub fn finish(self) -> (RoadNetwork, BuildReport) {
        let node_pos = self.snapper.into_positions();
        let node_count = node_pos.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's outgoing edges.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_road:     Vec<RoadId> = raw.into_iter().map(|e| e.road).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for from in &edge_from {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry::new(pos, NodeId(i as u32)))
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let mut node_keys = FxHashMap::with_capacity_and_hasher(node_count, Default::default());
        for (i, &pos) in node_pos.iter().enumerate() {
            node_keys.entry(GridKey::new(pos)).or_insert(NodeId(i as u32));
        }

        let network = RoadNetwork {
            node_pos,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_road,
            spatial_idx,
            node_keys,
        };
        (network, self.report)
    }
}
