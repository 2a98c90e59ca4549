//! CSV road loader.
//!
//! # CSV format
//!
//! One row per road, in build order.
//!
//! ```csv
//! id,name,geometry,length_m,is_oneway
//! r1,Main Street,"LINESTRING(96.1900 16.8600, 96.1900 16.8700)",,false
//! r2,Harbour Road,"96.1900,16.8700;96.2000,16.8700",1085.2,true
//! ```
//!
//! | Column      | Meaning                                                  |
//! |-------------|----------------------------------------------------------|
//! | `id`        | Road id, unique per file (a later duplicate replaces it) |
//! | `name`      | Display name; may be empty                               |
//! | `geometry`  | Polyline, see [`crate::polyline`]                        |
//! | `length_m`  | Optional per-segment lengths                             |
//! | `is_oneway` | Optional flag, default two-way                           |
//!
//! Rows whose geometry, lengths, or flag cannot be parsed are skipped with a
//! warning.  A structurally broken file (missing columns, bad quoting) is an
//! error.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use rn_engine::RoadCatalog;
use rn_spatial::RoadRecord;

use crate::polyline::{parse_lengths, parse_oneway, parse_polyline};
use crate::{SourceError, SourceResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RoadRow {
    id:        String,
    #[serde(default)]
    name:      String,
    geometry:  String,
    #[serde(default)]
    length_m:  String,
    #[serde(default)]
    is_oneway: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every road in a CSV file into an in-memory catalog.
pub fn load_roads_csv(path: &Path) -> SourceResult<RoadCatalog> {
    let file = std::fs::File::open(path).map_err(SourceError::Io)?;
    load_roads_reader(file)
}

/// Like [`load_roads_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor` or a byte slice) or for
/// loading from network streams.
pub fn load_roads_reader<R: Read>(reader: R) -> SourceResult<RoadCatalog> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut catalog = RoadCatalog::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader.deserialize::<RoadRow>().enumerate() {
        let row = result?;
        match road_from_row(&row) {
            Ok(road) => {
                let name = Some(row.name).filter(|n| !n.is_empty());
                catalog.upsert(road, name);
            }
            Err(e) => {
                skipped += 1;
                // +2: header line, 1-based numbering.
                warn!(row = line + 2, road = %row.id, error = %e, "skipping unreadable road row");
            }
        }
    }

    debug!(roads = catalog.len(), skipped, "road CSV loaded");
    Ok(catalog)
}

fn road_from_row(row: &RoadRow) -> SourceResult<RoadRecord> {
    let coordinates = parse_polyline(&row.geometry)?;
    let mut road = RoadRecord::new(row.id.as_str(), coordinates, parse_oneway(&row.is_oneway)?);
    road.segment_lengths_m = parse_lengths(&row.length_m)?;
    Ok(road)
}
