pub mod coord;
pub mod line;
pub mod point;
pub mod rect;
pub mod rtree;

pub use coord::GridCoord;
pub use line::{Axis, Line};
pub use point::Point;
pub use rect::{GeomError, Rect};

/// Open-interior intersection between axis-aligned shapes.
///
/// Touching a boundary never counts: a wire may run along a component edge,
/// and two wires crossing at a single point do not intersect.
pub trait Intersects<Rhs: ?Sized = Self> {
    fn intersects(&self, other: &Rhs) -> bool;
}

impl Intersects for Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.overlaps(other)
    }
}

impl Intersects<Line> for Rect {
    fn intersects(&self, other: &Line) -> bool {
        self.overlaps(&other.bounds())
    }
}

impl Intersects<Rect> for Line {
    fn intersects(&self, other: &Rect) -> bool {
        other.overlaps(&self.bounds())
    }
}

impl Intersects for Line {
    fn intersects(&self, other: &Line) -> bool {
        self.overlaps(other)
    }
}

/// Axis-aligned bounding box, used to query spatial indexes.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl Bounded for Line {
    fn bounds(&self) -> Rect {
        Line::bounds(self)
    }
}
