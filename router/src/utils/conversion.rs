use orthoroute_common::geom::{GridCoord, Point};
use std::ops::Range;

/// Sorted, exactly deduplicated grid line values along one axis.
#[derive(Clone, Debug, Default)]
pub struct GridAxis {
    values: Vec<f64>,
}

impl GridAxis {
    /// Inputs must be finite. `-0.0` folds into `0.0` so lookups agree with
    /// `==` on the original values.
    pub fn from_values(mut values: Vec<f64>) -> Self {
        for v in values.iter_mut() {
            *v += 0.0;
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn index_of(&self, value: f64) -> Option<usize> {
        let value = value + 0.0;
        self.values
            .binary_search_by(|probe| probe.total_cmp(&value))
            .ok()
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Indices of the lines lying strictly between `lo` and `hi`.
    pub fn interior(&self, lo: f64, hi: f64) -> Range<usize> {
        let start = self.values.partition_point(|&v| v <= lo);
        let end = self.values.partition_point(|&v| v < hi);
        start..end.max(start)
    }
}

/// Translation between real diagram coordinates and integer grid addresses.
#[derive(Clone, Debug, Default)]
pub struct GridConverter {
    xs: GridAxis,
    ys: GridAxis,
}

impl GridConverter {
    pub fn new(xs: GridAxis, ys: GridAxis) -> Self {
        Self { xs, ys }
    }

    pub fn x_axis(&self) -> &GridAxis {
        &self.xs
    }

    pub fn y_axis(&self) -> &GridAxis {
        &self.ys
    }

    pub fn grid_width(&self) -> u32 {
        self.xs.len() as u32
    }

    pub fn grid_height(&self) -> u32 {
        self.ys.len() as u32
    }

    /// Exact lookup: `None` unless both coordinates are grid lines.
    pub fn to_grid(&self, p: Point<f64>) -> Option<GridCoord> {
        let x = self.xs.index_of(p.x)?;
        let y = self.ys.index_of(p.y)?;
        Some(GridCoord::new(x as u32, y as u32))
    }

    /// Callers pass coordinates produced by this converter; out-of-range
    /// indices are a bug and panic.
    pub fn to_world(&self, g: GridCoord) -> Point<f64> {
        Point::new(self.xs.values[g.x as usize], self.ys.values[g.y as usize])
    }
}
