//! `rn-spatial` — road graph, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`road`]    | `RoadRecord` (storage input) and `RoadDefect`                  |
//! | [`snap`]    | `NodeSnapper` — merges nearby vertices into shared nodes      |
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`, `BuildReport` |
//! | [`router`]  | `Router` trait, `NodePath`, `DijkstraRouter`                   |
//! | [`path`]    | `PathAssembler`, `PathResult`, `Segment`, `SegmentKind`        |
//! | [`query`]   | `route_between` — snap, solve, assemble                        |
//! | [`error`]   | `SpatialError`, `NoRouteFound`, `SpatialResult<T>`             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod network;
pub mod path;
pub mod query;
pub mod road;
pub mod router;
pub mod snap;

#[cfg(test)]
mod tests;

pub use error::{NoRouteFound, SpatialError, SpatialResult};
pub use network::{BuildReport, RoadNetwork, RoadNetworkBuilder, SkippedRoad};
pub use path::{PathAssembler, PathResult, Segment, SegmentKind};
pub use query::route_between;
pub use road::{RoadDefect, RoadRecord};
pub use router::{DijkstraRouter, NodePath, Router};
pub use snap::NodeSnapper;
