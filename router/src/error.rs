use orthoroute_common::geom::{GeomError, Point, Rect};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("obstacle #{index} {rect:?} is invalid: {source}")]
    DegenerateObstacle {
        index: usize,
        rect: Rect,
        #[source]
        source: GeomError,
    },
    #[error("connection #{index} has a non-finite endpoint {point}")]
    InvalidPin { index: usize, point: Point<f64> },
    /// Grid construction is broken: a pin that must be a grid line is not.
    #[error("point {point} does not lie on the routing grid")]
    GridLookup { point: Point<f64> },
}
