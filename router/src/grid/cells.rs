use super::{CellState, RoutingGrid};
use orthoroute_common::geom::{Axis, GridCoord};

/// Dense row-major grid of cell flags, one byte per cell.
#[derive(Clone, Debug)]
pub struct RouterCells {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl RouterCells {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        if size > 50_000_000 {
            log::warn!(
                "Allocating large routing grid: {}x{} cells. Ensure sufficient RAM.",
                width,
                height
            );
        }

        Self {
            width,
            height,
            cells: vec![CellState::PUBLIC; size],
        }
    }

    #[inline(always)]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        Some((coord.y as usize) * (self.width as usize) + (coord.x as usize))
    }

    #[inline(always)]
    fn coord_of(&self, idx: usize) -> GridCoord {
        let w = self.width as usize;
        GridCoord::new((idx % w) as u32, (idx / w) as u32)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn update(&mut self, coord: GridCoord, f: impl FnOnce(&mut CellState)) {
        match self.index(coord) {
            Some(idx) => f(&mut self.cells[idx]),
            None => log::debug!("Ignoring update of out-of-range cell {:?}", coord),
        }
    }

    /// Every cell with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &state)| (self.coord_of(idx), state))
    }

    pub fn busy_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|s| s.contains(CellState::BUSY))
            .count()
    }

    pub fn blocked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|s| s.intersects(CellState::BLOCK))
            .count()
    }
}

impl RoutingGrid for RouterCells {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    fn state(&self, coord: GridCoord) -> CellState {
        match self.index(coord) {
            Some(idx) => self.cells[idx],
            None => CellState::BLOCK,
        }
    }

    fn mark_busy(&mut self, coord: GridCoord) {
        self.update(coord, |s| s.insert(CellState::BUSY));
    }

    fn mark_private(&mut self, coord: GridCoord, axis: Axis) {
        self.update(coord, |s| s.remove(CellState::public(axis)));
    }

    fn mark_public(&mut self, coord: GridCoord, axis: Axis) {
        self.update(coord, |s| s.insert(CellState::public(axis)));
    }

    fn mark_blocked(&mut self, coord: GridCoord, axis: Axis) {
        self.update(coord, |s| s.insert(CellState::block(axis)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cells_are_public_and_free() {
        let cells = RouterCells::new(3, 2);
        let c = GridCoord::new(2, 1);
        assert_eq!(cells.len(), 6);
        assert!(cells.is_public(c, Axis::Horizontal));
        assert!(cells.is_public(c, Axis::Vertical));
        assert!(!cells.is_busy(c));
        assert!(cells.can_turn(c));
    }

    #[test]
    fn straight_pass_leaves_orthogonal_axis_open() {
        let mut cells = RouterCells::new(3, 3);
        let c = GridCoord::new(1, 1);
        cells.mark_busy(c);
        cells.mark_private(c, Axis::Horizontal);

        assert!(!cells.can_enter(c, Axis::Horizontal));
        assert!(cells.can_enter(c, Axis::Vertical));
        assert!(!cells.can_turn(c));
    }

    #[test]
    fn bend_consumes_both_axes() {
        let mut cells = RouterCells::new(3, 3);
        let c = GridCoord::new(0, 2);
        cells.mark_busy(c);
        cells.mark_private(c, Axis::Horizontal);
        cells.mark_private(c, Axis::Vertical);

        assert!(!cells.can_enter(c, Axis::Horizontal));
        assert!(!cells.can_enter(c, Axis::Vertical));
        cells.mark_public(c, Axis::Vertical);
        assert!(cells.can_enter(c, Axis::Vertical));
    }

    #[test]
    fn blocked_axis_and_out_of_range() {
        let mut cells = RouterCells::new(2, 2);
        let c = GridCoord::new(1, 0);
        cells.mark_blocked(c, Axis::Vertical);
        assert!(cells.is_blocked(c, Axis::Vertical));
        assert!(cells.can_enter(c, Axis::Horizontal));
        assert!(!cells.can_turn(c));
        assert_eq!(cells.blocked_count(), 1);

        let outside = GridCoord::new(5, 0);
        assert!(!cells.can_enter(outside, Axis::Horizontal));
        cells.mark_busy(outside);
        assert_eq!(cells.busy_count(), 0);
    }
}
