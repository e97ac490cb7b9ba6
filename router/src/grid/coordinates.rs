use super::{RouterCells, RoutingGrid};
use crate::utils::conversion::{GridAxis, GridConverter};
use orthoroute_common::geom::{Axis, GridCoord, Point, Rect};
use orthoroute_common::util::config::RouterConfig;

/// Sparse routing grid: one line per obstacle edge and per pin coordinate,
/// plus the cell flags living on the line intersections.
#[derive(Clone, Debug)]
pub struct CoordinatesRegistry {
    converter: GridConverter,
    cells: RouterCells,
}

impl Default for CoordinatesRegistry {
    fn default() -> Self {
        Self {
            converter: GridConverter::default(),
            cells: RouterCells::new(0, 0),
        }
    }
}

impl CoordinatesRegistry {
    /// Inputs must already be validated as finite.
    pub fn build(obstacles: &[Rect], pins: &[Point<f64>], config: &RouterConfig) -> Self {
        let mut xs = Vec::with_capacity(obstacles.len() * 2 + pins.len() + 2);
        let mut ys = Vec::with_capacity(obstacles.len() * 2 + pins.len() + 2);

        for r in obstacles {
            xs.extend([r.min.x, r.max.x]);
            ys.extend([r.min.y, r.max.y]);
        }
        for p in pins {
            xs.push(p.x);
            ys.push(p.y);
        }

        if config.outer_margin > 0.0 {
            let bounds = obstacles
                .iter()
                .copied()
                .chain(pins.iter().map(|&p| Rect::new(p, p)))
                .reduce(|acc, r| acc.union(&r));
            if let Some(b) = bounds {
                let outer = b.expand(config.outer_margin);
                xs.extend([outer.min.x, outer.max.x]);
                ys.extend([outer.min.y, outer.max.y]);
            }
        }

        let converter = GridConverter::new(GridAxis::from_values(xs), GridAxis::from_values(ys));
        let mut cells = RouterCells::new(converter.grid_width(), converter.grid_height());

        for r in obstacles {
            let xr = converter.x_axis().interior(r.min.x, r.max.x);
            let yr = converter.y_axis().interior(r.min.y, r.max.y);
            for y in yr {
                for x in xr.clone() {
                    let c = GridCoord::new(x as u32, y as u32);
                    cells.mark_blocked(c, Axis::Horizontal);
                    cells.mark_blocked(c, Axis::Vertical);
                }
            }
        }

        log::debug!(
            "Coordinate registry: {}x{} grid, {} blocked cells",
            cells.width(),
            cells.height(),
            cells.blocked_count()
        );

        Self { converter, cells }
    }

    pub fn converter(&self) -> &GridConverter {
        &self.converter
    }

    pub fn x_coordinates(&self) -> &[f64] {
        self.converter.x_axis().values()
    }

    pub fn y_coordinates(&self) -> &[f64] {
        self.converter.y_axis().values()
    }

    pub fn x_index(&self, x: f64) -> Option<usize> {
        self.converter.x_axis().index_of(x)
    }

    pub fn y_index(&self, y: f64) -> Option<usize> {
        self.converter.y_axis().index_of(y)
    }

    pub fn x_value(&self, index: usize) -> Option<f64> {
        self.converter.x_axis().value(index)
    }

    pub fn y_value(&self, index: usize) -> Option<f64> {
        self.converter.y_axis().value(index)
    }

    pub fn to_grid(&self, p: Point<f64>) -> Option<GridCoord> {
        self.converter.to_grid(p)
    }

    pub fn to_world(&self, g: GridCoord) -> Point<f64> {
        self.converter.to_world(g)
    }

    pub fn cells(&self) -> &RouterCells {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut RouterCells {
        &mut self.cells
    }

    pub(crate) fn split_mut(&mut self) -> (&GridConverter, &mut RouterCells) {
        (&self.converter, &mut self.cells)
    }
}
