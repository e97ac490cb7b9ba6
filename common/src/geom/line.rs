use super::point::Point;
use super::rect::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A wire segment between two points. Committed segments are always
/// axis-aligned; only fallback lines may be diagonal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p1: Point<f64>,
    pub p2: Point<f64>,
}

impl Line {
    pub fn new(p1: Point<f64>, p2: Point<f64>) -> Self {
        Self { p1, p2 }
    }

    pub fn is_point(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    pub fn axis(&self) -> Option<Axis> {
        match (self.is_horizontal(), self.is_vertical()) {
            (true, false) => Some(Axis::Horizontal),
            (false, true) => Some(Axis::Vertical),
            _ => None,
        }
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            Point::new(self.p1.x.min(self.p2.x), self.p1.y.min(self.p2.y)),
            Point::new(self.p1.x.max(self.p2.x), self.p1.y.max(self.p2.y)),
        )
    }

    /// Collinear overlap of positive length. Perpendicular crossings and
    /// end-to-end contact do not count.
    pub fn overlaps(&self, other: &Line) -> bool {
        let (a, b) = (self.bounds(), other.bounds());
        match (self.axis(), other.axis()) {
            (Some(Axis::Horizontal), Some(Axis::Horizontal)) => {
                a.min.y == b.min.y && a.max.x.min(b.max.x) > a.min.x.max(b.min.x)
            }
            (Some(Axis::Vertical), Some(Axis::Vertical)) => {
                a.min.x == b.min.x && a.max.y.min(b.max.y) > a.min.y.max(b.min.y)
            }
            _ => false,
        }
    }

    /// True if `p` lies on the segment, endpoints included.
    pub fn contains(&self, p: Point<f64>) -> bool {
        match self.axis() {
            Some(_) => self.bounds().contains(p),
            None => self.is_point() && self.p1 == p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn collinear_overlap_needs_positive_length() {
        assert!(line(0.0, 0.0, 10.0, 0.0).overlaps(&line(5.0, 0.0, 15.0, 0.0)));
        assert!(line(10.0, 0.0, 0.0, 0.0).overlaps(&line(2.0, 0.0, 3.0, 0.0)));
        assert!(!line(0.0, 0.0, 10.0, 0.0).overlaps(&line(10.0, 0.0, 15.0, 0.0)));
        assert!(!line(0.0, 0.0, 10.0, 0.0).overlaps(&line(0.0, 1.0, 10.0, 1.0)));
        assert!(line(3.0, -2.0, 3.0, 2.0).overlaps(&line(3.0, 1.0, 3.0, 8.0)));
    }

    #[test]
    fn perpendicular_crossing_is_not_an_overlap() {
        assert!(!line(0.0, 0.0, 10.0, 0.0).overlaps(&line(5.0, -5.0, 5.0, 5.0)));
    }

    #[test]
    fn axis_of_degenerate_and_diagonal_lines() {
        assert_eq!(line(0.0, 0.0, 4.0, 0.0).axis(), Some(Axis::Horizontal));
        assert_eq!(line(1.0, 0.0, 1.0, 4.0).axis(), Some(Axis::Vertical));
        assert_eq!(line(1.0, 1.0, 1.0, 1.0).axis(), None);
        assert_eq!(line(0.0, 0.0, 3.0, 4.0).axis(), None);
        assert_eq!(line(0.0, 0.0, 3.0, 4.0).length(), 5.0);
    }
}
