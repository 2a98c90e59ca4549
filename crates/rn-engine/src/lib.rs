//! `rn-engine` — the routing engine applications talk to.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`engine`] | `RoutingEngine` (published graph, rebuild, route), `GraphSnapshot` |
//! | [`source`] | `RoadSource` storage seam, `RoadCatalog` in-memory source       |
//! | [`label`]  | `label_segments` — display names for route segments             |
//! | [`error`]  | `EngineError`, `EngineResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `route_many` runs on Rayon's thread pool.               |
//! | `serde`    | Propagates serde derives to `rn-core` and `rn-spatial`. |
//!
//! # Lifecycle
//!
//! ```text
//! RoutingEngine::new(config)      → generation 0, empty graph
//! engine.refresh(&source)         → list_roads → rebuild → publish
//! engine.route(start, end)        → PathResult | NoRouteFound
//! (road inserted/updated/deleted) → engine.refresh(&source) again
//! ```

pub mod engine;
pub mod error;
pub mod label;
pub mod source;


pub use engine::{GraphSnapshot, RoutingEngine};
pub use error::{BoxedSourceError, EngineError, EngineResult};
pub use label::{LabelledSegment, label_segments};
pub use source::{RoadCatalog, RoadSource};
