//! The published-graph holder.
//!
//! # Publication
//!
//! The live graph is an `Arc<GraphSnapshot>` behind a `RwLock`.  A query
//! clones the `Arc` under a momentary read lock and then works lock-free on
//! that snapshot, so it sees one whole generation even if a rebuild is
//! published mid-query.  A rebuild constructs the new network without any
//! lock held on the published slot, then swaps the `Arc` under a brief write
//! lock.  Rebuilds are serialised by a separate mutex so generation numbers
//! follow publication order.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, instrument, warn};

use rn_core::{Coordinate, RoutingConfig};
use rn_spatial::{
    BuildReport, DijkstraRouter, NoRouteFound, PathResult, RoadNetwork, RoadRecord, Router,
    route_between,
};

use crate::{EngineError, EngineResult, RoadSource};

// ── GraphSnapshot ─────────────────────────────────────────────────────────────

/// One published graph generation and the report of the build that made it.
pub struct GraphSnapshot {
    generation: u64,
    network:    RoadNetwork,
    report:     BuildReport,
}

impl GraphSnapshot {
    /// 0 for the initial empty graph, then +1 per published rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

// ── RoutingEngine ─────────────────────────────────────────────────────────────

/// Shared routing state: one published road graph, replaced wholesale on
/// every rebuild and queried concurrently.
///
/// `RoutingEngine` is `Sync`; share it across threads by reference or `Arc`.
///
/// # Example
///
/// ```
/// use rn_core::{Coordinate, RoutingConfig};
/// use rn_engine::RoutingEngine;
/// use rn_spatial::RoadRecord;
///
/// let engine = RoutingEngine::new(RoutingConfig::default()).unwrap();
/// engine.rebuild(&[RoadRecord::new(
///     "r1",
///     vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)],
///     false,
/// )]);
/// let path = engine.route(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)).unwrap();
/// assert!((path.total_distance_m - 1_111.95).abs() < 0.1);
/// ```
pub struct RoutingEngine<R: Router = DijkstraRouter> {
    config:       RoutingConfig,
    router:       R,
    published:    RwLock<Arc<GraphSnapshot>>,
    rebuild_lock: Mutex<()>,
}

impl RoutingEngine<DijkstraRouter> {
    /// Engine with the default Dijkstra solver and an empty graph.
    pub fn new(config: RoutingConfig) -> EngineResult<Self> {
        Self::with_router(config, DijkstraRouter)
    }
}

impl<R: Router> RoutingEngine<R> {
    /// Engine with a custom solver.  Fails if `config` does not validate.
    pub fn with_router(config: RoutingConfig, router: R) -> EngineResult<Self> {
        config.validate()?;
        let empty = GraphSnapshot {
            generation: 0,
            network:    RoadNetwork::empty(),
            report:     BuildReport::default(),
        };
        Ok(Self {
            config,
            router,
            published: RwLock::new(Arc::new(empty)),
            rebuild_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// The currently published graph.  Holding the returned `Arc` pins that
    /// generation; later rebuilds do not affect it.
    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.published.read())
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Build a graph from `roads` and publish it, replacing the current one.
    ///
    /// Malformed roads are skipped (see the returned report); an empty road
    /// set publishes an empty graph.
    #[instrument(skip_all, fields(roads = roads.len()))]
    pub fn rebuild(&self, roads: &[RoadRecord]) -> BuildReport {
        let _writer = self.rebuild_lock.lock();

        let (network, report) = RoadNetwork::from_roads(roads, self.config.snap_threshold_m);
        let generation = self.published.read().generation + 1;

        info!(
            generation,
            nodes = network.node_count(),
            edges = network.edge_count(),
            skipped = report.skipped.len(),
            "road graph built"
        );

        let snapshot = Arc::new(GraphSnapshot { generation, network, report: report.clone() });
        *self.published.write() = snapshot;
        report
    }

    /// List every road from `source` and rebuild from them.
    ///
    /// If the source fails, the published graph stays as it was.
    pub fn refresh<S: RoadSource + ?Sized>(&self, source: &S) -> EngineResult<BuildReport> {
        let roads = source.list_roads().map_err(|e| {
            warn!(error = %e, "road source failed; keeping published graph");
            EngineError::Source(Box::new(e))
        })?;
        Ok(self.rebuild(&roads))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Shortest route between two arbitrary points on the published graph.
    pub fn route(&self, start: Coordinate, end: Coordinate) -> Result<PathResult, NoRouteFound> {
        let snapshot = self.snapshot();
        route_between(&snapshot.network, &self.router, &self.config, start, end)
    }

    /// Answer a batch of queries against one graph generation.
    ///
    /// Results are in query order.  With the `parallel` feature the batch is
    /// spread over Rayon's thread pool.
    pub fn route_many(&self, queries: &[(Coordinate, Coordinate)]) -> Vec<Result<PathResult, NoRouteFound>> {
        let snapshot = self.snapshot();
        let network = &snapshot.network;

        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|&(start, end)| route_between(network, &self.router, &self.config, start, end))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            queries
                .par_iter()
                .map(|&(start, end)| route_between(network, &self.router, &self.config, start, end))
                .collect()
        }
    }

    pub fn node_count(&self) -> usize {
        self.published.read().network.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.published.read().network.edge_count()
    }

    pub fn generation(&self) -> u64 {
        self.published.read().generation
    }
}
