use crate::algo;
use crate::route::{Connection, Route};
use crate::router::Router;
use orthoroute_common::geom::{Axis, GridCoord, Line, Point, Rect};
use orthoroute_common::util::profiler::ScopedTimer;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("route #{route} has a non-orthogonal segment {segment:?}")]
    NotRectilinear { route: usize, segment: Line },
    #[error("route #{route} does not start and end at its pins")]
    Disconnected { route: usize },
    #[error("route #{route} crosses obstacle {obstacle:?}")]
    CrossesObstacle { route: usize, obstacle: Rect },
    #[error("unrouted connection #{route} is not a direct source-target line")]
    BadFallback { route: usize },
    #[error("routes #{first} and #{second} overlap")]
    Overlap { first: usize, second: usize },
    #[error("routes #{first} and #{second} meet illegally at {point}")]
    IllegalSharing {
        first: usize,
        second: usize,
        point: Point<f64>,
    },
}

/// Verifies the last pass of `router`: routes are rectilinear, connect their
/// pins, stay out of obstacles, and meet other routes only at orthogonal
/// straight crossings.
pub fn run(router: &Router) -> Result<(), Vec<Violation>> {
    let _timer = ScopedTimer::new("Routing verification");
    log::info!("Starting Routing Verification...");
    let routes = router.routing_result();
    let connections = router.connections();

    let violations: Vec<Violation> = (0..routes.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut found = check_route(router, i, &routes[i], &connections[i]);
            if routes[i].is_route_found() {
                for j in (i + 1)..routes.len() {
                    if routes[j].is_route_found() {
                        found.extend(check_pair(i, &routes[i], j, &routes[j]));
                    }
                }
            }
            found
        })
        .collect();

    if violations.is_empty() {
        log::info!("\x1b[32mPASS\x1b[0m: {} routes are legal.", routes.len());
        Ok(())
    } else {
        for v in &violations {
            log::error!("\x1b[31mFAIL\x1b[0m: {}", v);
        }
        Err(violations)
    }
}

fn check_route(router: &Router, i: usize, route: &Route, conn: &Connection) -> Vec<Violation> {
    let mut out = Vec::new();
    let points = route.points();

    if !route.is_route_found() {
        if points != [conn.source, conn.target] {
            out.push(Violation::BadFallback { route: i });
        }
        return out;
    }

    if points.first() != Some(&conn.source) || points.last() != Some(&conn.target) {
        out.push(Violation::Disconnected { route: i });
    }
    let single_point = points.len() == 2 && points[0] == points[1];
    for segment in route.segments() {
        if segment.axis().is_none() && !single_point {
            out.push(Violation::NotRectilinear { route: i, segment });
        }
        if let Some(&obstacle) = router.obstacles().blocking_rectangle(&segment) {
            out.push(Violation::CrossesObstacle { route: i, obstacle });
        }
    }
    out
}

#[derive(Default)]
struct Usage {
    horizontal: bool,
    vertical: bool,
    bend: bool,
}

fn usage_at(route: &Route, p: Point<f64>) -> Usage {
    let mut u = Usage::default();
    for segment in route.segments() {
        if segment.contains(p) {
            match segment.axis() {
                Some(Axis::Horizontal) => u.horizontal = true,
                Some(Axis::Vertical) => u.vertical = true,
                None => {}
            }
        }
    }
    let points = route.points();
    let inner = points.len().saturating_sub(1);
    u.bend = points[1..inner.max(1)].contains(&p);
    u
}

fn check_pair(i: usize, a: &Route, j: usize, b: &Route) -> Vec<Violation> {
    let mut out = Vec::new();
    if a.segments().any(|sa| b.segments().any(|sb| sa.overlaps(&sb))) {
        out.push(Violation::Overlap {
            first: i,
            second: j,
        });
    }

    let mut shared: Vec<Point<f64>> = Vec::new();
    for &p in a.points() {
        if b.segments().any(|s| s.contains(p)) {
            shared.push(p);
        }
    }
    for &p in b.points() {
        if a.segments().any(|s| s.contains(p)) {
            shared.push(p);
        }
    }
    for sa in a.segments() {
        for sb in b.segments() {
            if let Some(p) = crossing(&sa, &sb) {
                shared.push(p);
            }
        }
    }

    for p in shared {
        let (ua, ub) = (usage_at(a, p), usage_at(b, p));
        let same_axis = (ua.horizontal && ub.horizontal) || (ua.vertical && ub.vertical);
        if same_axis || ua.bend || ub.bend {
            out.push(Violation::IllegalSharing {
                first: i,
                second: j,
                point: p,
            });
            break;
        }
    }
    out
}

fn crossing(a: &Line, b: &Line) -> Option<Point<f64>> {
    let (h, v) = match (a.axis()?, b.axis()?) {
        (Axis::Horizontal, Axis::Vertical) => (a, b),
        (Axis::Vertical, Axis::Horizontal) => (b, a),
        _ => return None,
    };
    let p = Point::new(v.p1.x, h.p1.y);
    (h.contains(p) && v.contains(p)).then_some(p)
}

/// Cell-axis pairs route `index` of the last pass holds privately, rebuilt
/// from its waypoints. Empty for unrouted connections.
pub fn claims(router: &Router, index: usize) -> Vec<(GridCoord, Axis)> {
    let Some(route) = router.routing_result().get(index) else {
        return Vec::new();
    };
    if !route.is_route_found() {
        return Vec::new();
    }
    let registry = router.coordinates_registry();
    let corners: Option<Vec<GridCoord>> =
        route.points().iter().map(|&p| registry.to_grid(p)).collect();
    match corners {
        Some(corners) => algo::claims(&algo::expand(&corners)),
        None => Vec::new(),
    }
}
