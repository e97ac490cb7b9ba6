use super::point::Point;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeomError {
    #[error("rectangle has a non-finite coordinate")]
    NonFinite,
    #[error("rectangle has non-positive size {width}x{height}")]
    Degenerate { width: f64, height: f64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Point<f64>,
    pub max: Point<f64>,
}

impl Rect {
    pub fn new(min: Point<f64>, max: Point<f64>) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Point::new(x + width, y + height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Obstacles must be finite with a positive extent on both axes.
    pub fn validate(&self) -> Result<(), GeomError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GeomError::NonFinite);
        }
        if !(self.width() > 0.0 && self.height() > 0.0) {
            return Err(GeomError::Degenerate {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, p: Point<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            Point::new(self.min.x - margin, self.min.y - margin),
            Point::new(self.max.x + margin, self.max.y + margin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Intersects, Line};

    #[test]
    fn validate_rejects_nan_and_empty() {
        assert!(Rect::from_xywh(0.0, 0.0, 2.0, 3.0).validate().is_ok());
        assert_eq!(
            Rect::from_xywh(f64::NAN, 0.0, 2.0, 3.0).validate(),
            Err(GeomError::NonFinite)
        );
        assert!(matches!(
            Rect::from_xywh(0.0, 0.0, 0.0, 3.0).validate(),
            Err(GeomError::Degenerate { .. })
        ));
        assert!(matches!(
            Rect::from_xywh(0.0, 0.0, 2.0, -1.0).validate(),
            Err(GeomError::Degenerate { .. })
        ));
    }

    #[test]
    fn lines_on_the_boundary_do_not_intersect() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let along_edge = Line::new(Point::new(0.0, -5.0), Point::new(0.0, 15.0));
        let through = Line::new(Point::new(-5.0, 5.0), Point::new(15.0, 5.0));
        let stops_at_edge = Line::new(Point::new(-5.0, 5.0), Point::new(0.0, 5.0));
        assert!(!r.intersects(&along_edge));
        assert!(r.intersects(&through));
        assert!(!r.intersects(&stops_at_edge));
    }

    #[test]
    fn point_inside_intersects() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let p = Line::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert!(r.intersects(&p));
        assert!(r.contains(Point::new(0.0, 5.0)));
        assert!(!r.contains(Point::new(-0.5, 5.0)));
    }
}
