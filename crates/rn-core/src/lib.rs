//! `rn-core` — foundational types for the `roadnet` routing engine.
//!
//! This crate is a dependency of every other `rn-*` crate.  It has no `rn-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `EdgeId`, `RoadId`                               |
//! | [`geo`]     | `Coordinate`, great-circle distance, `GridKey`             |
//! | [`config`]  | `RoutingConfig` (snap tolerance, snap radius, access speed) |
//! | [`error`]   | `RnError`, `RnResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RoutingConfig;
pub use error::{RnError, RnResult};
pub use geo::{Coordinate, EARTH_RADIUS_M, GridKey};
pub use ids::{EdgeId, NodeId, RoadId};
