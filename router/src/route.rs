use orthoroute_common::geom::{Line, Point};

/// One requested wire, from a source pin to a target pin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub source: Point<f64>,
    pub target: Point<f64>,
}

impl Connection {
    pub fn new(source: Point<f64>, target: Point<f64>) -> Self {
        Self { source, target }
    }
}

/// Routing result for one connection.
///
/// A found route is a rectilinear polyline from source to target through its
/// bend points. An unrouted one is the direct `[source, target]` line, kept
/// so a renderer can still show the missing connection.
///
/// Both end cells of a found route hold the axis of their segment privately,
/// so at most two found routes can share one pin point.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub source: Point<f64>,
    points: Vec<Point<f64>>,
    found: bool,
}

impl Route {
    pub(crate) fn found(points: Vec<Point<f64>>) -> Self {
        Self {
            source: points[0],
            points,
            found: true,
        }
    }

    pub(crate) fn unrouted(source: Point<f64>, target: Point<f64>) -> Self {
        Self {
            source,
            points: vec![source, target],
            found: false,
        }
    }

    pub fn is_route_found(&self) -> bool {
        self.found
    }

    /// Waypoints, source first and target last.
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    pub fn target(&self) -> Point<f64> {
        self.points[self.points.len() - 1]
    }

    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    pub fn bends(&self) -> usize {
        if self.found {
            self.points.len().saturating_sub(2)
        } else {
            0
        }
    }

    /// Bitwise comparison, for reproducibility checks.
    pub fn bit_eq(&self, other: &Route) -> bool {
        self.found == other.found
            && self.source.bit_eq(&other.source)
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.bit_eq(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrouted_is_the_direct_line() {
        let r = Route::unrouted(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!(!r.is_route_found());
        assert_eq!(r.points(), &[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert_eq!(r.length(), 5.0);
        assert_eq!(r.bends(), 0);
    }

    #[test]
    fn found_route_measures() {
        let r = Route::found(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(5.0, 2.0),
        ]);
        assert!(r.is_route_found());
        assert_eq!(r.target(), Point::new(5.0, 2.0));
        assert_eq!(r.length(), 7.0);
        assert_eq!(r.bends(), 1);
        assert_eq!(r.segments().count(), 2);
        assert!(r.bit_eq(&r.clone()));
    }
}
