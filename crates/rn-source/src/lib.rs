//! `rn-source` — storage-layer road sources for the roadnet engine.
//!
//! Every source yields [`rn_spatial::RoadRecord`]s and road names through
//! [`rn_engine::RoadSource`], ready for `RoutingEngine::refresh`.
//!
//! | Feature   | Source                                | Entry point                |
//! |-----------|---------------------------------------|----------------------------|
//! | *(none)*  | CSV file → in-memory `RoadCatalog`    | [`load_roads_csv`]         |
//! | `sqlite`  | SQLite `roads` table                  | `SqliteRoadStore`          |
//!
//! Polyline and length text formats are documented in [`polyline`].

pub mod csv;
pub mod error;
pub mod polyline;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::{load_roads_csv, load_roads_reader};
pub use error::{SourceError, SourceResult};
pub use polyline::{parse_lengths, parse_oneway, parse_polyline, to_wkt};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRoadStore;
