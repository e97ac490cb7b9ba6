use crate::algo::{self, PathSearch};
use crate::error::RouterError;
use crate::grid::{CoordinatesRegistry, RouterCells, RoutingGrid};
use crate::obstacles::ObstacleRegistry;
use crate::route::{Connection, Route};
use crate::utils::conversion::GridConverter;
use orthoroute_common::geom::{GridCoord, Line, Point, Rect};
use orthoroute_common::util::config::RouterConfig;
use orthoroute_common::util::profiler::ScopedTimer;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoutingStats {
    pub found: usize,
    pub failed: usize,
    pub wire_length: f64,
    pub bends: usize,
}

/// Sequential orthogonal router.
///
/// Each call to [`Router::route`] is an independent pass: the grid and the
/// obstacle registry are rebuilt from the current obstacles and connections,
/// then connections are routed strictly in insertion order, earlier ones
/// claiming contested cells first. Committed routes are never revisited.
///
/// A pin holds the axis of each wire ending at it privately, so one pin point
/// carries at most two wires, one per axis. Further connections from the same
/// point come back unrouted even in free space.
pub struct Router {
    config: RouterConfig,
    rects: Vec<Rect>,
    connections: Vec<Connection>,
    registry: CoordinatesRegistry,
    obstacles: ObstacleRegistry,
    results: Vec<Route>,
    stats: RoutingStats,
    solver: PathSearch,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            rects: Vec::new(),
            connections: Vec::new(),
            registry: CoordinatesRegistry::default(),
            obstacles: ObstacleRegistry::new(),
            results: Vec::new(),
            stats: RoutingStats::default(),
            solver: PathSearch::new(),
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn add_obstacle(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    pub fn add_connection(&mut self, source: Point<f64>, target: Point<f64>) {
        self.connections.push(Connection::new(source, target));
    }

    /// Drops all inputs and results.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.connections.clear();
        self.reset_pass();
    }

    fn reset_pass(&mut self) {
        self.registry = CoordinatesRegistry::default();
        self.obstacles = ObstacleRegistry::new();
        self.results.clear();
        self.stats = RoutingStats::default();
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn routing_result(&self) -> &[Route] {
        &self.results
    }

    pub fn coordinates_registry(&self) -> &CoordinatesRegistry {
        &self.registry
    }

    pub fn cells(&self) -> &RouterCells {
        self.registry.cells()
    }

    pub fn obstacles(&self) -> &ObstacleRegistry {
        &self.obstacles
    }

    pub fn stats(&self) -> RoutingStats {
        self.stats
    }

    /// Runs one full routing pass. Invalid input fails the whole pass before
    /// anything is routed. On any error the grid, the obstacle registry and
    /// the result list are all left empty.
    pub fn route(&mut self) -> Result<&[Route], RouterError> {
        let _timer = ScopedTimer::new("Routing pass");
        self.reset_pass();

        self.validate()?;
        self.init();

        if let Err(e) = self.route_all() {
            log::error!("Routing pass aborted: {}", e);
            self.reset_pass();
            return Err(e);
        }

        log::info!(
            "Routed {}/{} connections (failed: {}, wire length: {:.2}, bends: {})",
            self.stats.found,
            self.connections.len(),
            self.stats.failed,
            self.stats.wire_length,
            self.stats.bends
        );
        Ok(&self.results)
    }

    fn validate(&self) -> Result<(), RouterError> {
        for (index, rect) in self.rects.iter().enumerate() {
            rect.validate()
                .map_err(|source| RouterError::DegenerateObstacle {
                    index,
                    rect: *rect,
                    source,
                })?;
        }
        for (index, c) in self.connections.iter().enumerate() {
            for point in [c.source, c.target] {
                if !point.is_finite() {
                    return Err(RouterError::InvalidPin { index, point });
                }
            }
        }
        Ok(())
    }

    fn init(&mut self) {
        self.obstacles = ObstacleRegistry::new();
        for &rect in &self.rects {
            if !self.obstacles.register_blocked_rectangle(rect) {
                log::debug!("Skipping duplicate obstacle {:?}", rect);
            }
        }

        let pins: Vec<Point<f64>> = self
            .connections
            .iter()
            .flat_map(|c| [c.source, c.target])
            .collect();
        self.registry = CoordinatesRegistry::build(self.obstacles.blocked(), &pins, &self.config);

        log::info!(
            "Routing grid: {}x{} lines, {} obstacles, {} connections",
            self.registry.cells().width(),
            self.registry.cells().height(),
            self.obstacles.blocked().len(),
            self.connections.len()
        );
    }

    fn route_all(&mut self) -> Result<(), RouterError> {
        for (i, conn) in self.connections.iter().enumerate() {
            let source = self
                .registry
                .to_grid(conn.source)
                .ok_or(RouterError::GridLookup { point: conn.source })?;
            let target = self
                .registry
                .to_grid(conn.target)
                .ok_or(RouterError::GridLookup { point: conn.target })?;

            let path = self.solver.find_path(
                self.registry.cells(),
                self.registry.converter(),
                &self.obstacles,
                &self.config,
                source,
                target,
            );

            let route = match path {
                Some(path) => {
                    let (converter, cells) = self.registry.split_mut();
                    let points = commit(cells, converter, &mut self.obstacles, &path, conn);
                    Route::found(points)
                }
                None => {
                    log::warn!(
                        "Connection #{} from {} to {} is unroutable, using a direct line",
                        i,
                        conn.source,
                        conn.target
                    );
                    Route::unrouted(conn.source, conn.target)
                }
            };

            if route.is_route_found() {
                log::debug!(
                    "Connection #{}: {} waypoints, length {:.2}",
                    i,
                    route.points().len(),
                    route.length()
                );
                self.stats.found += 1;
                self.stats.wire_length += route.length();
                self.stats.bends += route.bends();
            } else {
                self.stats.failed += 1;
            }
            self.results.push(route);
        }
        Ok(())
    }
}

/// Claims the path's cells and registers its segments. Straight passes make
/// the travelled axis private, bends make both axes private, endpoints make
/// the axis of their only segment private.
fn commit(
    cells: &mut RouterCells,
    converter: &GridConverter,
    obstacles: &mut ObstacleRegistry,
    path: &[GridCoord],
    conn: &Connection,
) -> Vec<Point<f64>> {
    for &c in path {
        cells.mark_busy(c);
    }
    for (c, axis) in algo::claims(path) {
        cells.mark_private(c, axis);
    }

    let corners = algo::corners(path);
    let last = corners.len() - 1;
    let points: Vec<Point<f64>> = corners
        .iter()
        .enumerate()
        .map(|(k, &g)| match k {
            0 => conn.source,
            k if k == last => conn.target,
            _ => converter.to_world(g),
        })
        .collect();

    for w in points.windows(2) {
        obstacles.register_segment(Line::new(w[0], w[1]));
    }
    points
}
