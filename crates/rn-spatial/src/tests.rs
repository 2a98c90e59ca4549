//! Unit tests for rn-spatial.
//!
//! All tests use hand-crafted or seeded-random road sets near the equator,
//! where 0.001° is roughly 111 m in either axis.

#[cfg(test)]
mod helpers {
    use rn_core::Coordinate;

    use crate::RoadRecord;

    pub fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    pub fn road(id: &str, coords: &[(f64, f64)], is_oneway: bool) -> RoadRecord {
        RoadRecord::new(id, coords.iter().map(|&(lon, lat)| c(lon, lat)).collect(), is_oneway)
    }

    /// Square grid of `n × n` intersections spaced `step` degrees apart.
    ///
    /// Every row is one bidirectional polyline; every column is one road,
    /// one-way northbound on even columns.
    pub fn grid_roads(n: usize, step: f64) -> Vec<RoadRecord> {
        let mut roads = Vec::new();
        for row in 0..n {
            let coords: Vec<_> = (0..n).map(|col| (col as f64 * step, row as f64 * step)).collect();
            roads.push(road(&format!("row-{row}"), &coords, false));
        }
        for col in 0..n {
            let coords: Vec<_> = (0..n).map(|row| (col as f64 * step, row as f64 * step)).collect();
            roads.push(road(&format!("col-{col}"), &coords, col % 2 == 0));
        }
        roads
    }
}

// ── Snapping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapping {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rn_core::{Coordinate, NodeId};

    use super::helpers::c;
    use crate::NodeSnapper;

    #[test]
    fn nearby_vertices_merge() {
        let mut s = NodeSnapper::new(1.0);
        let a = s.snap(c(0.0, 0.01));
        // 0.000005° of longitude ≈ 0.56 m.
        let b = s.snap(c(0.000005, 0.01));
        assert_eq!(a, b);
        assert_eq!(s.len(), 1);
        assert_eq!(s.position(a), c(0.0, 0.01), "first position stays canonical");
    }

    #[test]
    fn threshold_is_strict() {
        // 0.00001° ≈ 1.11 m: separate nodes at 1 m, merged at 1.5 m.
        let mut s = NodeSnapper::new(1.0);
        let a = s.snap(c(0.0, 0.01));
        let b = s.snap(c(0.00001, 0.01));
        assert_ne!(a, b);

        let mut s = NodeSnapper::new(1.5);
        let a = s.snap(c(0.0, 0.01));
        let b = s.snap(c(0.00001, 0.01));
        assert_eq!(a, b);
    }

    #[test]
    fn first_registered_wins_over_nearest() {
        let mut s = NodeSnapper::new(1.0);
        let older = s.snap(c(0.0, 0.0));
        let newer = s.snap(c(0.000012, 0.0)); // ≈ 1.33 m away: its own node
        assert_ne!(older, newer);

        // ≈ 0.89 m from `older`, ≈ 0.44 m from `newer`.
        let probe = c(0.000008, 0.0);
        assert!(probe.distance_m(s.position(newer)) < probe.distance_m(s.position(older)));
        assert_eq!(s.snap(probe), older);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn find_does_not_register() {
        let mut s = NodeSnapper::new(1.0);
        s.snap(c(10.0, 10.0));
        assert_eq!(s.find(c(20.0, 20.0)), None);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn ids_are_sequential() {
        let mut s = NodeSnapper::new(1.0);
        for i in 0..5 {
            assert_eq!(s.snap(c(i as f64 * 0.01, 0.0)), NodeId(i));
        }
        assert_eq!(s.positions().len(), 5);
    }

    /// Linear scan in registration order: the reference snapping rule.
    fn reference_snap(registered: &mut Vec<Coordinate>, pos: Coordinate, threshold: f64) -> NodeId {
        match registered.iter().position(|&r| r.distance_m(pos) < threshold) {
            Some(i) => NodeId(i as u32),
            None => {
                registered.push(pos);
                NodeId(registered.len() as u32 - 1)
            }
        }
    }

    #[test]
    fn matches_linear_scan_on_dense_points() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for &threshold in &[0.5, 1.0, 3.0] {
            let mut s = NodeSnapper::new(threshold);
            let mut reference = Vec::new();
            for _ in 0..600 {
                // ≈ 11 m square: plenty of within-tolerance collisions.
                let pos = c(96.19 + rng.gen_range(0.0..0.0001), 16.86 + rng.gen_range(0.0..0.0001));
                assert_eq!(s.snap(pos), reference_snap(&mut reference, pos, threshold));
            }
            assert_eq!(s.positions(), reference.as_slice());
        }
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rn_core::{GridKey, NodeId, RoadId};

    use super::helpers::{c, grid_roads, road};
    use crate::{RoadDefect, RoadNetwork, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new(1.0).build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(RoadNetwork::empty().is_empty());
    }

    #[test]
    fn bidirectional_road() {
        let (net, report) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(report.roads_added, 1);

        let fwd = net.find_edge(NodeId(0), NodeId(1)).unwrap();
        let rev = net.find_edge(NodeId(1), NodeId(0)).unwrap();
        assert_eq!(net.edge_length_m[fwd.index()], net.edge_length_m[rev.index()]);
        assert_eq!(net.edge_road[fwd.index()], net.edge_road[rev.index()]);
        assert!((net.edge_length_m[fwd.index()] - 1_111.95).abs() < 0.1);
        assert_eq!(net.edge_geometry(rev), [c(0.0, 0.01), c(0.0, 0.0)]);
    }

    #[test]
    fn oneway_road_has_single_direction() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], true)], 1.0);
        assert_eq!(net.edge_count(), 1);
        assert!(net.find_edge(NodeId(0), NodeId(1)).is_some());
        assert!(net.find_edge(NodeId(1), NodeId(0)).is_none());
    }

    #[test]
    fn shared_endpoint_snaps_into_one_component() {
        let roads = [
            road("a", &[(0.0, 0.0), (0.0, 0.01)], false),
            road("b", &[(0.000005, 0.01), (0.01, 0.01)], false),
        ];
        let (net, _) = RoadNetwork::from_roads(&roads, 1.0);
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 4);
        assert_eq!(net.out_degree(NodeId(1)), 2, "shared node joins both roads");
    }

    #[test]
    fn csr_is_consistent() {
        let (net, _) = RoadNetwork::from_roads(&grid_roads(4, 0.001), 1.0);
        assert_eq!(net.node_count(), 16);
        assert_eq!(net.node_out_start.len(), net.node_count() + 1);
        for n in 0..net.node_count() {
            let node = NodeId(n as u32);
            for e in net.out_edges(node) {
                assert_eq!(net.edge_from[e.index()], node);
            }
        }
        // Rows: 4 × 3 segments × 2 directions; columns: 2 one-way + 2 two-way.
        assert_eq!(net.edge_count(), 24 + 2 * 3 + 2 * 3 * 2);
    }

    #[test]
    fn provided_lengths_are_used_when_aligned() {
        let r = road("r", &[(0.0, 0.0), (0.001, 0.0), (0.002, 0.0)], true).with_lengths(vec![5.0, 7.0]);
        let (net, report) = RoadNetwork::from_roads(&[r], 1.0);
        assert_eq!(report.lengths_recomputed, 0);
        let e = net.find_edge(NodeId(1), NodeId(2)).unwrap();
        assert_eq!(net.edge_length_m[e.index()], 7.0);
    }

    #[test]
    fn misaligned_lengths_fall_back_to_great_circle() {
        let r = road("r", &[(0.0, 0.0), (0.001, 0.0), (0.002, 0.0)], true).with_lengths(vec![5.0]);
        let (net, report) = RoadNetwork::from_roads(&[r], 1.0);
        assert_eq!(report.lengths_recomputed, 1);
        assert!(report.skipped.is_empty());
        for e in 0..net.edge_count() {
            assert!((net.edge_length_m[e] - 111.195).abs() < 0.01);
        }
    }

    #[test]
    fn empty_length_list_counts_as_misaligned() {
        let r = road("r", &[(0.0, 0.0), (0.001, 0.0)], false).with_lengths(Vec::new());
        let (_, report) = RoadNetwork::from_roads(&[r], 1.0);
        assert_eq!(report.lengths_recomputed, 1);
    }

    #[test]
    fn malformed_roads_are_skipped() {
        let roads = [
            road("lonely", &[(0.0, 0.0)], false),
            road("nan", &[(0.0, 0.0), (f64::NAN, 0.01)], false),
            road("negative", &[(0.0, 0.0), (0.0, 0.01)], false).with_lengths(vec![-3.0]),
            road("good", &[(1.0, 1.0), (1.0, 1.01)], false),
        ];
        let (net, report) = RoadNetwork::from_roads(&roads, 1.0);
        assert_eq!(report.roads_seen, 4);
        assert_eq!(report.roads_added, 1);
        assert_eq!(net.node_count(), 2, "skipped roads register no nodes");
        assert_eq!(net.edge_count(), 2);

        let defects: Vec<_> = report.skipped.iter().map(|s| (s.road.as_str(), s.defect.clone())).collect();
        assert_eq!(
            defects,
            vec![
                ("lonely", RoadDefect::TooFewVertices(1)),
                ("nan", RoadDefect::NonFiniteCoordinate { index: 1 }),
                ("negative", RoadDefect::InvalidLength { index: 0, length_m: -3.0 }),
            ]
        );
    }

    #[test]
    fn overlapping_roads_last_write_wins() {
        let roads = [
            road("old", &[(0.0, 0.0), (0.0, 0.01)], false).with_lengths(vec![100.0]),
            road("new", &[(0.0, 0.0), (0.0, 0.01)], true).with_lengths(vec![90.0]),
        ];
        let (net, report) = RoadNetwork::from_roads(&roads, 1.0);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(report.edges_overwritten, 1);

        let fwd = net.find_edge(NodeId(0), NodeId(1)).unwrap();
        let rev = net.find_edge(NodeId(1), NodeId(0)).unwrap();
        assert_eq!(net.edge_road[fwd.index()], RoadId::from("new"));
        assert_eq!(net.edge_length_m[fwd.index()], 90.0);
        assert_eq!(net.edge_road[rev.index()], RoadId::from("old"));
    }

    #[test]
    fn collapsed_segment_is_a_single_self_loop() {
        // Both vertices lie ≈ 0.1 m apart and snap to one node.
        let (net, report) = RoadNetwork::from_roads(&[road("dot", &[(0.0, 0.0), (0.000001, 0.0)], false)], 1.0);
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.edge_count(), 1);
        assert_eq!(report.edges_overwritten, 0);
        assert!(net.find_edge(NodeId(0), NodeId(0)).is_some());
    }

    #[test]
    fn find_node_uses_quantized_key() {
        let (net, _) = RoadNetwork::from_roads(&[road("r", &[(96.1951, 16.8661), (96.2, 16.87)], false)], 1.0);
        assert_eq!(net.find_node(c(96.1951 + 1e-12, 16.8661)), Some(NodeId(0)));
        assert_eq!(net.find_node(GridKey::new(c(96.2, 16.87)).center()), Some(NodeId(1)));
        assert_eq!(net.find_node(c(96.1952, 16.8661)), None);
        assert_eq!(net.find_node(c(f64::NAN, 0.0)), None);
    }
}

// ── Nearest node ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rn_core::NodeId;

    use super::helpers::{c, grid_roads, road};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    #[test]
    fn empty_network_finds_nothing() {
        assert_eq!(RoadNetwork::empty().nearest_node(c(0.0, 0.0), 500.0), None);
    }

    #[test]
    fn radius_is_a_hard_cutoff() {
        let (net, _) = RoadNetwork::from_roads(&[road("r", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        // ≈ 600 m and ≈ 445 m east of node 0.
        assert_eq!(net.nearest_node(c(0.0054, 0.0), 500.0), None);
        let (id, d) = net.nearest_node(c(0.004, 0.0), 500.0).unwrap();
        assert_eq!(id, NodeId(0));
        assert!((d - 444.78).abs() < 0.1, "got {d}");
    }

    #[test]
    fn radius_is_inclusive() {
        let (net, _) = RoadNetwork::from_roads(&[road("r", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        let q = c(0.004, 0.0);
        let exact = q.distance_m(c(0.0, 0.0));
        assert_eq!(net.nearest_node(q, exact).map(|(id, _)| id), Some(NodeId(0)));
    }

    #[test]
    fn equidistant_nodes_prefer_lowest_id() {
        for (first, second) in [(0.001, -0.001), (-0.001, 0.001)] {
            let mut b = RoadNetworkBuilder::new(1.0);
            let n0 = b.add_node(c(first, 0.0));
            b.add_node(c(second, 0.0));
            let net = b.build();
            assert_eq!(net.nearest_node(c(0.0, 0.0), 500.0).map(|(id, _)| id), Some(n0));
        }
    }

    #[test]
    fn matches_linear_scan() {
        let (net, _) = RoadNetwork::from_roads(&grid_roads(6, 0.002), 1.0);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let q = c(rng.gen_range(-0.004..0.014), rng.gen_range(-0.004..0.014));
            let expected = net
                .node_pos
                .iter()
                .enumerate()
                .map(|(i, p)| (NodeId(i as u32), p.distance_m(q)))
                .fold(None, |best: Option<(NodeId, f64)>, cand| match best {
                    Some(b) if b.1 <= cand.1 => Some(b),
                    _ => Some(cand),
                })
                .filter(|&(_, d)| d <= 200.0);
            assert_eq!(net.nearest_node(q, 200.0), expected, "query {q}");
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rn_core::{NodeId, RoadId};

    use super::helpers::c;
    use crate::{DijkstraRouter, RoadNetwork, RoadNetworkBuilder, Router, SpatialError};

    /// Nodes 0..4 on a line; 0→1→2→4 costs 30 m, 0→3→4 costs 60 m.
    fn diamond() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new(1.0);
        let n: Vec<NodeId> = (0..5).map(|i| b.add_node(c(i as f64 * 0.01, 0.0))).collect();
        let r = RoadId::from("r");
        for (from, to, len) in [(0, 1, 10.0), (1, 2, 10.0), (2, 4, 10.0), (0, 3, 50.0), (3, 4, 10.0)] {
            b.add_directed_edge(n[from], n[to], len, r.clone());
            b.add_directed_edge(n[to], n[from], len, r.clone());
        }
        (b.build(), [n[0], n[1], n[2], n[3], n[4]])
    }

    #[test]
    fn shortest_path() {
        let (net, [n0, n1, n2, _, n4]) = diamond();
        let path = DijkstraRouter.route(&net, n0, n4).unwrap();
        assert_eq!(path.nodes(), &[n0, n1, n2, n4]);
        assert_eq!(path.edges().len(), 3);
        assert_eq!(path.distance_m(), 30.0);
        for (i, e) in path.edges().iter().enumerate() {
            assert_eq!(net.edge_from[e.index()], path.nodes()[i]);
            assert_eq!(net.edge_to[e.index()], path.nodes()[i + 1]);
        }
    }

    #[test]
    fn same_node_is_no_route() {
        let (net, [n0, ..]) = diamond();
        assert!(matches!(
            DijkstraRouter.route(&net, n0, n0),
            Err(SpatialError::NoRoute { from, to }) if from == n0 && to == n0
        ));
    }

    #[test]
    fn disconnected_is_no_route() {
        let mut b = RoadNetworkBuilder::new(1.0);
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(1.0, 0.0));
        b.add_directed_edge(a, z, 5.0, RoadId::from("one-way"));
        let net = b.build();
        assert!(DijkstraRouter.route(&net, a, z).is_ok());
        assert!(matches!(
            DijkstraRouter.route(&net, z, a),
            Err(SpatialError::NoRoute { from, to }) if from == z && to == a
        ));
    }

    #[test]
    fn unknown_node_is_rejected() {
        let (net, [n0, ..]) = diamond();
        assert!(matches!(
            DijkstraRouter.route(&net, n0, NodeId(99)),
            Err(SpatialError::NodeNotFound(NodeId(99)))
        ));
    }

    #[test]
    fn zero_length_edges() {
        let mut b = RoadNetworkBuilder::new(1.0);
        let n: Vec<NodeId> = (0..3).map(|i| b.add_node(c(i as f64, 0.0))).collect();
        b.add_directed_edge(n[0], n[1], 0.0, RoadId::from("z"));
        b.add_directed_edge(n[1], n[2], 0.0, RoadId::from("z"));
        let net = b.build();
        let path = DijkstraRouter.route(&net, n[0], n[2]).unwrap();
        assert_eq!(path.nodes(), n.as_slice());
        assert_eq!(path.distance_m(), 0.0);
    }

    /// All-pairs Bellman-Ford style relaxation for cross-checking.
    fn brute_force(net: &RoadNetwork, from: NodeId) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; net.node_count()];
        dist[from.index()] = 0.0;
        for _ in 0..net.node_count() {
            for e in 0..net.edge_count() {
                let (u, v) = (net.edge_from[e].index(), net.edge_to[e].index());
                let cand = dist[u] + net.edge_length_m[e];
                if cand < dist[v] {
                    dist[v] = cand;
                }
            }
        }
        dist
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut b = RoadNetworkBuilder::new(1.0);
            let n = rng.gen_range(2..25);
            let nodes: Vec<NodeId> = (0..n).map(|i| b.add_node(c(i as f64 * 0.01, 0.0))).collect();
            for _ in 0..n * 3 {
                let from = nodes[rng.gen_range(0..n)];
                let to = nodes[rng.gen_range(0..n)];
                if from != to {
                    // Integral lengths keep path sums exact.
                    b.add_directed_edge(from, to, rng.gen_range(0..100) as f64, RoadId::from("x"));
                }
            }
            let net = b.build();
            for &from in &nodes {
                let expected = brute_force(&net, from);
                for &to in &nodes {
                    match DijkstraRouter.route(&net, from, to) {
                        Ok(path) => {
                            assert_eq!(path.distance_m(), expected[to.index()]);
                            let sum: f64 = path.edges().iter().map(|e| net.edge_length_m[e.index()]).sum();
                            assert_eq!(sum, path.distance_m());
                        }
                        Err(SpatialError::NoRoute { .. }) => {
                            assert!(from == to || expected[to.index()].is_infinite())
                        }
                        Err(e) => panic!("unexpected error {e}"),
                    }
                }
            }
        }
    }
}

// ── Path assembly & query pipeline ────────────────────────────────────────────

#[cfg(test)]
mod query {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rn_core::{EdgeId, NodeId, RoadId, RoutingConfig};

    use super::helpers::{c, grid_roads, road};
    use crate::router::NodePath;
    use crate::{
        DijkstraRouter, NoRouteFound, PathAssembler, RoadNetwork, RoadNetworkBuilder, SegmentKind,
        route_between,
    };

    fn cfg() -> RoutingConfig {
        RoutingConfig::default()
    }

    #[test]
    fn query_on_nodes_has_no_access_segments() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        let result = route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.0), c(0.0, 0.01)).unwrap();
        assert!((result.total_distance_m - 1_111.95).abs() < 0.1);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Road);
        assert_eq!(result.segments[0].road_id, Some(RoadId::from("r1")));
        assert_eq!(result.access_segments().count(), 0);
        assert_eq!(result.coordinates, vec![c(0.0, 0.0), c(0.0, 0.01)]);
    }

    #[test]
    fn oneway_blocks_reverse_query() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], true)], 1.0);
        assert!(route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.0), c(0.0, 0.01)).is_ok());
        assert_eq!(
            route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.01), c(0.0, 0.0)),
            Err(NoRouteFound::Disconnected { from: NodeId(1), to: NodeId(0) })
        );
    }

    #[test]
    fn far_query_point_is_unreachable() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        let far = c(0.0054, 0.0); // ≈ 600 m from node (0, 0)
        assert!(matches!(
            route_between(&net, &DijkstraRouter, &cfg(), far, c(0.0, 0.01)),
            Err(NoRouteFound::UnreachableStart { radius_m, .. }) if radius_m == 500.0
        ));
        assert!(matches!(
            route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.01), far),
            Err(NoRouteFound::UnreachableEnd { .. })
        ));
    }

    #[test]
    fn empty_network_never_routes() {
        let net = RoadNetwork::empty();
        assert!(matches!(
            route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.0), c(0.0, 0.0)),
            Err(NoRouteFound::UnreachableStart { .. })
        ));
    }

    #[test]
    fn non_finite_query_is_unreachable() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        assert!(matches!(
            route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.0), c(f64::NAN, 0.0)),
            Err(NoRouteFound::UnreachableEnd { .. })
        ));
    }

    #[test]
    fn access_segments_bridge_off_network_points() {
        let roads = [
            road("a", &[(0.0, 0.0), (0.0, 0.01)], false),
            road("b", &[(0.000005, 0.01), (0.01, 0.01)], false),
        ];
        let (net, _) = RoadNetwork::from_roads(&roads, 1.0);
        let start = c(-0.001, 0.0); // ≈ 111 m west of node 0
        let end = c(0.01, 0.0105); // ≈ 56 m south of node 2
        let result = route_between(&net, &DijkstraRouter, &cfg(), start, end).unwrap();

        let kinds: Vec<_> = result.segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::StartAccess, SegmentKind::Road, SegmentKind::Road, SegmentKind::EndAccess]
        );
        let roads: Vec<_> = result.road_ids().into_iter().map(|r| r.as_str().to_owned()).collect();
        assert_eq!(roads, vec!["a", "b"]);

        assert_eq!(result.coordinates.first(), Some(&start));
        assert_eq!(result.coordinates.last(), Some(&end));
        assert_eq!(result.coordinates.len(), 5);
        assert_eq!(result.coordinates[1], c(0.0, 0.0));
        assert_eq!(result.coordinates[2], c(0.0, 0.01), "shared node keeps first road's position");
        assert_eq!(result.total_distance_m, result.segment_sum_m());
    }

    #[test]
    fn query_points_on_one_node_have_no_route() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        let result = route_between(&net, &DijkstraRouter, &cfg(), c(0.0001, 0.0), c(-0.0001, 0.0));
        assert!(matches!(result, Err(NoRouteFound::Disconnected { from, to }) if from == to));
    }

    #[test]
    fn identical_query_points_have_no_route() {
        let (net, _) = RoadNetwork::from_roads(&[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false)], 1.0);
        let p = c(0.0, 0.0);
        assert!(matches!(
            route_between(&net, &DijkstraRouter, &cfg(), p, p),
            Err(NoRouteFound::Disconnected { .. })
        ));
    }

    #[test]
    fn missing_edge_becomes_unknown_segment() {
        let mut b = RoadNetworkBuilder::new(1.0);
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(0.0, 0.001));
        let net = b.build();
        let path = NodePath::new(vec![a, z], vec![EdgeId::INVALID], 0.0);
        let result = PathAssembler::new(&net).assemble(c(0.0, 0.0), &path, c(0.0, 0.001));
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Unknown);
        assert_eq!(result.segments[0].road_id, None);
        assert!((result.total_distance_m - 111.195).abs() < 0.01);
    }

    #[test]
    fn travel_time_estimate() {
        let (net, _) = RoadNetwork::from_roads(
            &[road("r1", &[(0.0, 0.0), (0.0, 0.01)], false).with_lengths(vec![140.0])],
            1.0,
        );
        let result = route_between(&net, &DijkstraRouter, &cfg(), c(0.0, 0.0), c(0.0, 0.01)).unwrap();
        assert!((result.travel_secs(1.4) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn total_equals_segment_sum_on_random_queries() {
        let (net, _) = RoadNetwork::from_roads(&grid_roads(6, 0.001), 1.0);
        let mut rng = SmallRng::seed_from_u64(99);
        let mut routed = 0;
        for _ in 0..300 {
            let start = c(rng.gen_range(-0.001..0.006), rng.gen_range(-0.001..0.006));
            let end = c(rng.gen_range(-0.001..0.006), rng.gen_range(-0.001..0.006));
            if let Ok(result) = route_between(&net, &DijkstraRouter, &cfg(), start, end) {
                routed += 1;
                assert_eq!(result.total_distance_m, result.segment_sum_m());
                assert_eq!(result.coordinates.first(), Some(&start));
                assert_eq!(result.coordinates.last(), Some(&end));
                assert!(result.segments.iter().all(|s| s.length_m >= 0.0));
            }
        }
        assert!(routed > 200, "grid is strongly connected via its rows; got {routed}");
    }

    #[test]
    fn rebuild_is_idempotent() {
        let roads = grid_roads(5, 0.001);
        let (a, report_a) = RoadNetwork::from_roads(&roads, 1.0);
        let (b, report_b) = RoadNetwork::from_roads(&roads, 1.0);
        assert_eq!(report_a, report_b);
        assert_eq!(a.node_pos, b.node_pos);
        assert_eq!(a.edge_from, b.edge_from);
        assert_eq!(a.edge_to, b.edge_to);
        assert_eq!(a.edge_length_m, b.edge_length_m);

        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let start = c(rng.gen_range(0.0..0.004), rng.gen_range(0.0..0.004));
            let end = c(rng.gen_range(0.0..0.004), rng.gen_range(0.0..0.004));
            assert_eq!(
                route_between(&a, &DijkstraRouter, &cfg(), start, end),
                route_between(&b, &DijkstraRouter, &cfg(), start, end),
            );
        }
    }
}
