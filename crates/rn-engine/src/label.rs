//! Display labels for route segments.

use rn_spatial::{PathResult, Segment, SegmentKind};

use crate::RoadSource;

pub const START_ACCESS_LABEL: &str = "From Start Location to Nearest Defined Location";
pub const END_ACCESS_LABEL: &str = "From Nearest Defined Location to End Location";
pub const UNKNOWN_SEGMENT_LABEL: &str = "Unknown Road Segment";
pub const UNNAMED_ROAD_LABEL: &str = "Unknown Road";

/// A segment paired with the text to show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSegment {
    pub label: String,
    pub segment: Segment,
}

/// Label every segment of `path`, resolving road names through `source`.
pub fn label_segments<S: RoadSource + ?Sized>(path: &PathResult, source: &S) -> Vec<LabelledSegment> {
    path.segments
        .iter()
        .map(|segment| LabelledSegment {
            label: label_for(segment, source),
            segment: segment.clone(),
        })
        .collect()
}

fn label_for<S: RoadSource + ?Sized>(segment: &Segment, source: &S) -> String {
    match (segment.kind, &segment.road_id) {
        (SegmentKind::StartAccess, _) => START_ACCESS_LABEL.to_owned(),
        (SegmentKind::EndAccess, _) => END_ACCESS_LABEL.to_owned(),
        (SegmentKind::Unknown, _) | (SegmentKind::Road, None) => UNKNOWN_SEGMENT_LABEL.to_owned(),
        (SegmentKind::Road, Some(id)) => source
            .road_name(id)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_ROAD_LABEL.to_owned()),
    }
}
