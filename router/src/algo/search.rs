use crate::grid::RoutingGrid;
use crate::obstacles::ObstacleRegistry;
use crate::utils::conversion::GridConverter;
use orthoroute_common::geom::{Axis, GridCoord, Line};
use orthoroute_common::util::config::RouterConfig;
use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};

/// Step directions in expansion order. `Down` is towards increasing y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Right | Direction::Left => Axis::Horizontal,
            Direction::Down | Direction::Up => Axis::Vertical,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(i: usize) -> Option<Direction> {
        Direction::ALL.get(i).copied()
    }

    fn step(self, c: GridCoord, width: u32, height: u32) -> Option<GridCoord> {
        match self {
            Direction::Right if c.x + 1 < width => Some(GridCoord::new(c.x + 1, c.y)),
            Direction::Left if c.x > 0 => Some(GridCoord::new(c.x - 1, c.y)),
            Direction::Down if c.y + 1 < height => Some(GridCoord::new(c.x, c.y + 1)),
            Direction::Up if c.y > 0 => Some(GridCoord::new(c.x, c.y - 1)),
            _ => None,
        }
    }
}

// One state per (cell, incoming direction); slot 4 is the source with no
// incoming direction.
const STATES_PER_CELL: usize = 5;
const NO_DIRECTION: usize = 4;

/// Lexicographic path cost: cell steps, then bends, then geometric length.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cost {
    steps: u32,
    bends: u32,
    length: f64,
}

impl Cost {
    const ZERO: Cost = Cost {
        steps: 0,
        bends: 0,
        length: 0.0,
    };
}

impl Eq for Cost {}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.steps
            .cmp(&other.steps)
            .then_with(|| self.bends.cmp(&other.bends))
            .then_with(|| self.length.total_cmp(&other.length))
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest rectilinear path search over the cell grid.
///
/// Read-only with respect to the grid and obstacles. Scratch buffers are
/// reused between calls and invalidated with a generation tag instead of
/// being cleared.
pub struct PathSearch {
    parents: Vec<u32>,
    costs: Vec<Cost>,
    visited_tag: Vec<u32>,
    settled_tag: Vec<u32>,
    current_tag: u32,
    queue: PriorityQueue<u32, Reverse<(Cost, u32)>>,
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSearch {
    pub fn new() -> Self {
        Self {
            parents: Vec::new(),
            costs: Vec::new(),
            visited_tag: Vec::new(),
            settled_tag: Vec::new(),
            current_tag: 1,
            queue: PriorityQueue::new(),
        }
    }

    fn ensure_capacity(&mut self, size: usize) {
        if size > self.parents.len() {
            self.parents.resize(size, u32::MAX);
            self.costs.resize(size, Cost::ZERO);
            self.visited_tag.resize(size, 0);
            self.settled_tag.resize(size, 0);
        }
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.current_tag = self.current_tag.wrapping_add(1);
        if self.current_tag == 0 {
            self.visited_tag.fill(0);
            self.settled_tag.fill(0);
            self.current_tag = 1;
        }
    }

    /// Cells of the best path from `source` to `target`, both included, or
    /// `None` if the target cannot be reached.
    ///
    /// A step into a cell along an axis needs that axis unblocked and not
    /// privately held, and its segment must stay out of obstacle interiors
    /// (and, with `respect_segments`, off committed wires). Turning needs a
    /// free cell. Ties between equal costs go to the lowest state index,
    /// with neighbours expanded in [`Direction::ALL`] order.
    pub fn find_path<G: RoutingGrid + ?Sized>(
        &mut self,
        grid: &G,
        converter: &GridConverter,
        obstacles: &ObstacleRegistry,
        config: &RouterConfig,
        source: GridCoord,
        target: GridCoord,
    ) -> Option<Vec<GridCoord>> {
        let (width, height) = (grid.width(), grid.height());
        if source.x >= width || source.y >= height || target.x >= width || target.y >= height {
            return None;
        }
        if source == target {
            return Some(vec![source]);
        }

        let cell_count = (width as usize) * (height as usize);
        self.ensure_capacity(cell_count * STATES_PER_CELL);
        self.reset();

        let cell_index = |c: GridCoord| (c.y as usize) * (width as usize) + (c.x as usize);
        let start = (cell_index(source) * STATES_PER_CELL + NO_DIRECTION) as u32;
        self.visit(start, u32::MAX, Cost::ZERO);

        let mut expansions = 0usize;
        while let Some((state, _)) = self.queue.pop() {
            let s = state as usize;
            if self.settled_tag[s] == self.current_tag {
                continue;
            }
            self.settled_tag[s] = self.current_tag;

            let idx = s / STATES_PER_CELL;
            let position = GridCoord::new((idx % width as usize) as u32, (idx / width as usize) as u32);
            if position == target {
                log::trace!("Path found after {} expansions", expansions);
                return Some(self.reconstruct_path(state, width));
            }
            expansions += 1;

            let incoming = Direction::from_index(s % STATES_PER_CELL);
            let current = self.costs[s];

            for dir in Direction::ALL {
                if incoming == Some(dir.opposite()) {
                    continue;
                }
                let Some(neighbor) = dir.step(position, width, height) else {
                    continue;
                };
                let axis = dir.axis();

                let turning = incoming.is_some_and(|d| d != dir);
                if turning && !grid.can_turn(position) {
                    continue;
                }
                // Leaving a pin along an axis another wire holds is an overlap.
                if incoming.is_none() && !grid.can_enter(position, axis) {
                    continue;
                }
                if !grid.can_enter(neighbor, axis) {
                    continue;
                }

                let segment = Line::new(converter.to_world(position), converter.to_world(neighbor));
                if obstacles.intersects_blocked(&segment) {
                    continue;
                }
                if config.respect_segments && obstacles.overlaps_segment(&segment) {
                    continue;
                }

                let bend = u32::from(turning && config.minimize_bends);
                let tentative = Cost {
                    steps: current.steps + 1,
                    bends: current.bends + bend,
                    length: current.length + segment.length(),
                };
                let next = (cell_index(neighbor) * STATES_PER_CELL + dir.index()) as u32;
                let n = next as usize;
                if self.settled_tag[n] == self.current_tag {
                    continue;
                }
                if self.visited_tag[n] != self.current_tag || tentative < self.costs[n] {
                    self.visit(next, state, tentative);
                }
            }
        }

        log::trace!("Target unreachable after {} expansions", expansions);
        None
    }

    fn visit(&mut self, state: u32, parent: u32, cost: Cost) {
        let s = state as usize;
        self.visited_tag[s] = self.current_tag;
        self.parents[s] = parent;
        self.costs[s] = cost;
        self.queue.push(state, Reverse((cost, state)));
    }

    fn reconstruct_path(&self, end: u32, width: u32) -> Vec<GridCoord> {
        let w = width as usize;
        let mut path = Vec::new();
        let mut curr = end;
        loop {
            let idx = curr as usize / STATES_PER_CELL;
            path.push(GridCoord::new((idx % w) as u32, (idx / w) as u32));
            let parent = self.parents[curr as usize];
            if parent == u32::MAX {
                break;
            }
            curr = parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::corners;
    use crate::grid::CoordinatesRegistry;
    use orthoroute_common::geom::{Point, Rect};

    fn setup(obstacles: &[Rect], pins: &[Point<f64>]) -> (CoordinatesRegistry, ObstacleRegistry) {
        let reg = CoordinatesRegistry::build(obstacles, pins, &RouterConfig::default());
        let mut obs = ObstacleRegistry::new();
        for &r in obstacles {
            obs.register_blocked_rectangle(r);
        }
        (reg, obs)
    }

    fn search(
        reg: &CoordinatesRegistry,
        obs: &ObstacleRegistry,
        from: Point<f64>,
        to: Point<f64>,
    ) -> Option<Vec<GridCoord>> {
        PathSearch::new().find_path(
            reg.cells(),
            reg.converter(),
            obs,
            &RouterConfig::default(),
            reg.to_grid(from).unwrap(),
            reg.to_grid(to).unwrap(),
        )
    }

    #[test]
    fn straight_line_when_nothing_is_in_the_way() {
        let pins = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 5.0)];
        let (reg, obs) = setup(&[], &pins);
        let path = search(&reg, &obs, pins[0], pins[1]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(corners(&path).len(), 2);
    }

    #[test]
    fn prefers_fewer_bends_among_equal_step_counts() {
        // A 3x3 grid: both L-shapes take 4 steps with one bend, a staircase
        // takes 4 steps with three bends.
        let pins = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        ];
        let (reg, obs) = setup(&[], &pins);
        let path = search(&reg, &obs, pins[0], pins[1]).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(corners(&path).len(), 3);
    }

    #[test]
    fn goes_around_an_obstacle() {
        let obstacles = [Rect::from_xywh(4.0, -4.0, 2.0, 8.0)];
        let pins = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let (reg, obs) = setup(&obstacles, &pins);
        let path = search(&reg, &obs, pins[0], pins[1]).unwrap();
        let pts: Vec<Point<f64>> = corners(&path).into_iter().map(|g| reg.to_world(g)).collect();
        assert_eq!(pts.len(), 4);
        for w in pts.windows(2) {
            assert!(!obs.intersects(&Line::new(w[0], w[1])));
        }
        assert!(pts[1].y == 4.0 || pts[1].y == -4.0);
    }

    #[test]
    fn thin_obstacle_without_interior_lines_still_blocks() {
        let obstacles = [Rect::from_xywh(4.0, -1.0, 2.0, 2.0)];
        let pins = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let (reg, obs) = setup(&obstacles, &pins);
        let path = search(&reg, &obs, pins[0], pins[1]).unwrap();
        assert!(corners(&path).len() > 2);
    }

    #[test]
    fn source_inside_obstacle_is_unreachable() {
        let obstacles = [Rect::from_xywh(0.0, 0.0, 10.0, 10.0)];
        let pins = [Point::new(5.0, 5.0), Point::new(20.0, 5.0)];
        let (reg, obs) = setup(&obstacles, &pins);
        assert!(search(&reg, &obs, pins[0], pins[1]).is_none());
    }

    #[test]
    fn search_never_mutates_the_grid() {
        let pins = [Point::new(0.0, 0.0), Point::new(3.0, 3.0)];
        let (reg, obs) = setup(&[], &pins);
        let before: Vec<_> = reg.cells().iter().collect();
        let mut solver = PathSearch::new();
        for _ in 0..3 {
            let src = reg.to_grid(pins[0]).unwrap();
            let dst = reg.to_grid(pins[1]).unwrap();
            solver
                .find_path(reg.cells(), reg.converter(), &obs, &RouterConfig::default(), src, dst)
                .unwrap();
        }
        let after: Vec<_> = reg.cells().iter().collect();
        assert_eq!(before, after);
    }
}
