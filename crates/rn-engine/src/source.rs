//! The storage-layer seam: where road records and road names come from.

use std::convert::Infallible;

use rustc_hash::FxHashMap;

use rn_core::RoadId;
use rn_spatial::RoadRecord;

/// A collaborating store that owns the authoritative road set.
///
/// The engine asks for the full set on every refresh; there is no
/// incremental interface.
pub trait RoadSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every road currently stored, in the store's listing order.  Build
    /// order decides which road claims a shared intersection node.
    fn list_roads(&self) -> Result<Vec<RoadRecord>, Self::Error>;

    /// Display name of a road, if the store knows one.
    fn road_name(&self, id: &RoadId) -> Option<String>;
}

// ── RoadCatalog ───────────────────────────────────────────────────────────────

/// In-memory [`RoadSource`]: an insertion-ordered road list plus names.
///
/// Useful for tests and for applications that already hold their roads in
/// memory.  Mutations do not touch any engine; call
/// [`RoutingEngine::refresh`](crate::RoutingEngine::refresh) afterwards.
#[derive(Debug, Clone, Default)]
pub struct RoadCatalog {
    roads: Vec<RoadRecord>,
    names: FxHashMap<RoadId, String>,
}

impl RoadCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a road, or replace the stored road with the same id in place.
    pub fn upsert(&mut self, road: RoadRecord, name: Option<String>) {
        match name {
            Some(name) => {
                self.names.insert(road.id.clone(), name);
            }
            None => {
                self.names.remove(&road.id);
            }
        }
        match self.roads.iter_mut().find(|r| r.id == road.id) {
            Some(slot) => *slot = road,
            None => self.roads.push(road),
        }
    }

    pub fn remove(&mut self, id: &RoadId) -> Option<RoadRecord> {
        self.names.remove(id);
        let pos = self.roads.iter().position(|r| &r.id == id)?;
        Some(self.roads.remove(pos))
    }

    pub fn get(&self, id: &RoadId) -> Option<&RoadRecord> {
        self.roads.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn roads(&self) -> &[RoadRecord] {
        &self.roads
    }
}

impl RoadSource for RoadCatalog {
    type Error = Infallible;

    fn list_roads(&self) -> Result<Vec<RoadRecord>, Infallible> {
        Ok(self.roads.clone())
    }

    fn road_name(&self, id: &RoadId) -> Option<String> {
        self.names.get(id).cloned()
    }
}

impl FromIterator<(RoadRecord, Option<String>)> for RoadCatalog {
    fn from_iter<I: IntoIterator<Item = (RoadRecord, Option<String>)>>(iter: I) -> Self {
        let mut catalog = RoadCatalog::new();
        for (road, name) in iter {
            catalog.upsert(road, name);
        }
        catalog
    }
}
