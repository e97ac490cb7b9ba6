use orthoroute_common::geom::rtree::SpatialIndex;
use orthoroute_common::geom::{Bounded, Intersects, Line, Rect};

/// Component footprints and committed wire segments of one routing pass.
///
/// Rectangles block their open interior; segments block collinear overlap.
/// Both are kept in insertion order for diagnostics and indexed by bounding
/// box for queries.
#[derive(Default)]
pub struct ObstacleRegistry {
    blocked: Vec<Rect>,
    segments: Vec<Line>,
    blocked_index: SpatialIndex,
    segment_index: SpatialIndex,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal rectangle is already registered.
    pub fn register_blocked_rectangle(&mut self, rect: Rect) -> bool {
        if self.blocked_index.find_exact(rect).is_some() {
            return false;
        }
        self.blocked_index.insert(rect, self.blocked.len());
        self.blocked.push(rect);
        true
    }

    pub fn register_segment(&mut self, line: Line) {
        if line.is_point() {
            return;
        }
        self.segment_index.insert(line.bounds(), self.segments.len());
        self.segments.push(line);
    }

    pub fn blocked(&self) -> &[Rect] {
        &self.blocked
    }

    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    pub fn intersects<S>(&self, candidate: &S) -> bool
    where
        S: Bounded,
        Rect: Intersects<S>,
        Line: Intersects<S>,
    {
        self.intersects_blocked(candidate) || self.overlaps_segment(candidate)
    }

    pub fn intersects_blocked<S>(&self, candidate: &S) -> bool
    where
        S: Bounded,
        Rect: Intersects<S>,
    {
        self.blocking_rectangle(candidate).is_some()
    }

    /// First registered rectangle whose interior `candidate` enters.
    pub fn blocking_rectangle<S>(&self, candidate: &S) -> Option<&Rect>
    where
        S: Bounded,
        Rect: Intersects<S>,
    {
        self.blocked_index
            .query(candidate.bounds())
            .into_iter()
            .map(|id| &self.blocked[id])
            .find(|r| r.intersects(candidate))
    }

    pub fn overlaps_segment<S>(&self, candidate: &S) -> bool
    where
        S: Bounded,
        Line: Intersects<S>,
    {
        self.segment_index
            .query(candidate.bounds())
            .into_iter()
            .any(|id| self.segments[id].intersects(candidate))
    }
}
