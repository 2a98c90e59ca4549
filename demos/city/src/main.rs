//! city — smallest end-to-end run of the roadnet routing engine.
//!
//! Loads a road CSV (the built-in downtown set, or the file named by the
//! first argument), publishes the graph, and answers point-to-point queries
//! with labelled segments: the built-in samples, or the one given as
//! `lon,lat` arguments.
//!
//! ```text
//! city [ROADS.csv [START END]]
//! city roads.csv 96.1602,16.7798 96.1655,16.7905
//! ```
//!
//! Tunables come from flags or the environment, optionally via a `.env`
//! file:
//!
//! | Flag / variable                                     | Default |
//! |-----------------------------------------------------|---------|
//! | `--snap-threshold-m` / `ROADNET_SNAP_THRESHOLD_M`   | 1.0     |
//! | `--max-snap-radius-m` / `ROADNET_MAX_SNAP_RADIUS_M` | 500.0   |
//! | `--access-speed-mps` / `ROADNET_ACCESS_SPEED_MPS`   | 1.4     |

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use rn_core::{Coordinate, RoutingConfig};
use rn_engine::{RoadCatalog, RoutingEngine, label_segments};
use rn_source::{load_roads_csv, load_roads_reader};

use network::ROADS_CSV;

// ── Sample queries ────────────────────────────────────────────────────────────

const QUERIES: &[(&str, (f64, f64), (f64, f64))] = &[
    ("Pagoda steps to market", (96.1602, 16.7798), (96.1655, 16.7905)),
    ("Jetty to north-east corner", (96.1700, 16.7700), (96.1700, 16.7900)),
    ("Along the river", (96.1510, 16.7695), (96.1690, 16.7702)),
    ("Out of town", (96.3000, 16.9000), (96.1600, 16.7800)),
];

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Road CSV (id, name, geometry, length_m, is_oneway); built-in set if omitted
    roads: Option<PathBuf>,

    /// Start point as lon,lat
    #[arg(requires = "end", allow_hyphen_values = true)]
    start: Option<Coordinate>,

    /// End point as lon,lat
    #[arg(requires = "start", allow_hyphen_values = true)]
    end: Option<Coordinate>,

    /// Vertices closer than this (metres) share a node
    #[arg(long, env = "ROADNET_SNAP_THRESHOLD_M", default_value_t = RoutingConfig::DEFAULT_SNAP_THRESHOLD_M)]
    snap_threshold_m: f64,

    /// Query points farther than this (metres) from every node are unreachable
    #[arg(long, env = "ROADNET_MAX_SNAP_RADIUS_M", default_value_t = RoutingConfig::DEFAULT_MAX_SNAP_RADIUS_M)]
    max_snap_radius_m: f64,

    /// Walking speed (m/s) used for travel-time estimates
    #[arg(long, env = "ROADNET_ACCESS_SPEED_MPS", default_value_t = RoutingConfig::DEFAULT_ACCESS_SPEED_MPS)]
    access_speed_mps: f64,

    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn config(&self) -> RoutingConfig {
        RoutingConfig {
            snap_threshold_m:  self.snap_threshold_m,
            max_snap_radius_m: self.max_snap_radius_m,
            access_speed_mps:  self.access_speed_mps,
        }
    }

    fn queries(&self) -> Vec<(String, Coordinate, Coordinate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => vec![("Query".to_owned(), start, end)],
            _ => QUERIES
                .iter()
                .map(|&(title, (slon, slat), (elon, elat))| {
                    (title.to_owned(), Coordinate::new(slon, slat), Coordinate::new(elon, elat))
                })
                .collect(),
        }
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<RoadCatalog> {
    match path {
        Some(path) => load_roads_csv(path).with_context(|| format!("loading roads from {}", path.display())),
        None => load_roads_reader(ROADS_CSV.as_bytes()).context("loading built-in roads"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    println!("=== city — roadnet routing engine ===");

    // 1. Configuration.
    let config = cli.config();
    println!(
        "Snap threshold: {} m  |  Snap radius: {} m  |  Access speed: {} m/s",
        config.snap_threshold_m, config.max_snap_radius_m, config.access_speed_mps
    );
    let speed = config.access_speed_mps;
    let engine = RoutingEngine::new(config)?;

    // 2. Roads.
    let catalog = load_catalog(cli.roads.as_ref())?;
    println!("Loaded {} roads", catalog.len());

    // 3. Build and publish.
    let t0 = Instant::now();
    let report = engine.refresh(&catalog)?;
    println!(
        "Road graph: {} nodes, {} edges (generation {}, built in {:.3} ms)",
        engine.node_count(),
        engine.edge_count(),
        engine.generation(),
        t0.elapsed().as_secs_f64() * 1_000.0,
    );
    for skipped in &report.skipped {
        println!("  skipped {:<12} {}", skipped.road, skipped.defect);
    }
    if report.lengths_recomputed > 0 || report.edges_overwritten > 0 {
        println!(
            "  {} roads with recomputed lengths, {} overwritten edges",
            report.lengths_recomputed, report.edges_overwritten
        );
    }
    println!();

    // 4. Queries.
    for (title, start, end) in cli.queries() {
        println!("{title}: {start} → {end}");

        match engine.route(start, end) {
            Ok(path) => {
                println!(
                    "  {:.1} m, ~{:.1} min on foot, {} points",
                    path.total_distance_m,
                    path.travel_secs(speed) / 60.0,
                    path.coordinates.len()
                );
                for labelled in label_segments(&path, &catalog) {
                    println!("    {:>8.1} m  {}", labelled.segment.length_m, labelled.label);
                }
            }
            Err(e) => println!("  no route: {e}"),
        }
        println!();
    }

    Ok(())
}
