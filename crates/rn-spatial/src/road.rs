//! Road records as supplied by the storage layer.

use thiserror::Error;

use rn_core::{Coordinate, RoadId};

/// One road polyline as stored by the collaborating storage layer.
///
/// `segment_lengths_m`, when present and holding exactly one value per
/// segment (`coordinates.len() - 1`), gives the authoritative length of each
/// segment.  Otherwise lengths are recomputed from the snapped geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadRecord {
    pub id: RoadId,
    pub coordinates: Vec<Coordinate>,
    pub segment_lengths_m: Option<Vec<f64>>,
    pub is_oneway: bool,
}

/// Why a road was left out of the graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoadDefect {
    #[error("polyline has {0} vertices, at least 2 are required")]
    TooFewVertices(usize),

    #[error("vertex {index} is not a finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("segment {index} has invalid length {length_m}")]
    InvalidLength { index: usize, length_m: f64 },
}

impl RoadRecord {
    pub fn new(id: impl Into<RoadId>, coordinates: Vec<Coordinate>, is_oneway: bool) -> Self {
        Self {
            id: id.into(),
            coordinates,
            segment_lengths_m: None,
            is_oneway,
        }
    }

    /// Attach per-segment lengths in metres.
    pub fn with_lengths(mut self, lengths_m: Vec<f64>) -> Self {
        self.segment_lengths_m = Some(lengths_m);
        self
    }

    /// Number of consecutive-vertex segments.
    pub fn segment_count(&self) -> usize {
        self.coordinates.len().saturating_sub(1)
    }

    /// Provided lengths, but only when they line up one-to-one with segments.
    pub fn aligned_lengths(&self) -> Option<&[f64]> {
        self.segment_lengths_m
            .as_deref()
            .filter(|lengths| lengths.len() == self.segment_count() && !lengths.is_empty())
    }

    /// `true` if lengths were supplied but cannot be used as-is.
    pub fn has_misaligned_lengths(&self) -> bool {
        self.segment_lengths_m.is_some() && self.aligned_lengths().is_none()
    }

    /// Check that the road can contribute edges to a graph.
    ///
    /// Only lengths that would actually be used (aligned ones) are checked;
    /// a negative or non-finite length would break the solver's
    /// non-negative-weight precondition.
    pub fn check(&self) -> Result<(), RoadDefect> {
        if self.coordinates.len() < 2 {
            return Err(RoadDefect::TooFewVertices(self.coordinates.len()));
        }
        if let Some(index) = self.coordinates.iter().position(|c| !c.is_finite()) {
            return Err(RoadDefect::NonFiniteCoordinate { index });
        }
        if let Some(lengths) = self.aligned_lengths() {
            if let Some((index, &length_m)) = lengths
                .iter()
                .enumerate()
                .find(|(_, l)| !l.is_finite() || **l < 0.0)
            {
                return Err(RoadDefect::InvalidLength { index, length_m });
            }
        }
        Ok(())
    }
}
