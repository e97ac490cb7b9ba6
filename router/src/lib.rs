pub mod algo;
pub mod check;
pub mod error;
pub mod grid;
pub mod obstacles;
pub mod route;
pub mod router;
pub mod utils;

pub use error::RouterError;
pub use route::{Connection, Route};
pub use router::{Router, RoutingStats};

use orthoroute_common::geom::Rect;
use orthoroute_common::util::config::RouterConfig;

/// Routes `connections` around `obstacles` in one pass.
pub fn route(
    obstacles: &[Rect],
    connections: &[Connection],
    config: &RouterConfig,
) -> Result<Vec<Route>, RouterError> {
    let mut router = Router::new(config.clone());
    for &rect in obstacles {
        router.add_obstacle(rect);
    }
    for c in connections {
        router.add_connection(c.source, c.target);
    }
    Ok(router.route()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthoroute_common::geom::Point;

    #[test]
    fn one_shot_route_matches_a_router_pass() {
        let obstacles = [Rect::from_xywh(4.0, -4.0, 2.0, 8.0)];
        let connections = [
            Connection::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
            Connection::new(Point::new(0.0, 6.0), Point::new(10.0, 6.0)),
        ];
        let config = RouterConfig::default();
        let routes = route(&obstacles, &connections, &config).unwrap();

        let mut router = Router::new(config);
        router.add_obstacle(obstacles[0]);
        for c in &connections {
            router.add_connection(c.source, c.target);
        }
        let expected = router.route().unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().zip(expected).all(|(a, b)| a.bit_eq(b)));
    }

    #[test]
    fn one_shot_route_reports_bad_input() {
        let obstacles = [Rect::from_xywh(0.0, 0.0, f64::NAN, 1.0)];
        let err = route(&obstacles, &[], &RouterConfig::default()).unwrap_err();
        assert!(matches!(err, RouterError::DegenerateObstacle { index: 0, .. }));
    }
}
