pub mod cells;
pub mod coordinates;

pub use cells::RouterCells;
pub use coordinates::CoordinatesRegistry;

use orthoroute_common::geom::{Axis, GridCoord};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Packed per-cell routing flags. A missing `*_PUBLIC` flag means that axis
/// has been claimed exclusively by one route.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct CellState(u8);

impl CellState {
    pub const EMPTY: Self = Self(0);
    pub const BUSY: Self = Self(1 << 0);
    pub const VERTICAL_PUBLIC: Self = Self(1 << 1);
    pub const HORIZONTAL_PUBLIC: Self = Self(1 << 2);
    pub const VERTICAL_BLOCK: Self = Self(1 << 3);
    pub const HORIZONTAL_BLOCK: Self = Self(1 << 4);

    pub const PUBLIC: Self = Self(Self::VERTICAL_PUBLIC.0 | Self::HORIZONTAL_PUBLIC.0);
    pub const BLOCK: Self = Self(Self::VERTICAL_BLOCK.0 | Self::HORIZONTAL_BLOCK.0);

    #[inline(always)]
    pub fn public(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::HORIZONTAL_PUBLIC,
            Axis::Vertical => Self::VERTICAL_PUBLIC,
        }
    }

    #[inline(always)]
    pub fn block(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::HORIZONTAL_BLOCK,
            Axis::Vertical => Self::VERTICAL_BLOCK,
        }
    }

    #[inline(always)]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline(always)]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for CellState {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CellState {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(CellState, &str); 5] = [
            (CellState::BUSY, "BUSY"),
            (CellState::VERTICAL_PUBLIC, "VERTICAL_PUBLIC"),
            (CellState::HORIZONTAL_PUBLIC, "HORIZONTAL_PUBLIC"),
            (CellState::VERTICAL_BLOCK, "VERTICAL_BLOCK"),
            (CellState::HORIZONTAL_BLOCK, "HORIZONTAL_BLOCK"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "CellState({})", set.join(" | "))
    }
}

pub trait RoutingGrid: Sync + Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Out-of-range coordinates report a fully blocked cell.
    fn state(&self, coord: GridCoord) -> CellState;

    fn mark_busy(&mut self, coord: GridCoord);
    fn mark_private(&mut self, coord: GridCoord, axis: Axis);
    fn mark_public(&mut self, coord: GridCoord, axis: Axis);
    fn mark_blocked(&mut self, coord: GridCoord, axis: Axis);

    fn is_busy(&self, coord: GridCoord) -> bool {
        self.state(coord).contains(CellState::BUSY)
    }

    fn is_public(&self, coord: GridCoord, axis: Axis) -> bool {
        self.state(coord).contains(CellState::public(axis))
    }

    fn is_private(&self, coord: GridCoord, axis: Axis) -> bool {
        !self.is_public(coord, axis)
    }

    fn is_blocked(&self, coord: GridCoord, axis: Axis) -> bool {
        self.state(coord).contains(CellState::block(axis))
    }

    /// A wire may occupy `coord` along `axis`: the axis is not blocked and no
    /// other wire holds it privately.
    fn can_enter(&self, coord: GridCoord, axis: Axis) -> bool {
        let s = self.state(coord);
        !s.contains(CellState::block(axis))
            && !(s.contains(CellState::BUSY) && !s.contains(CellState::public(axis)))
    }

    /// A bend consumes the whole cell, so it needs a free, unblocked cell.
    fn can_turn(&self, coord: GridCoord) -> bool {
        !self
            .state(coord)
            .intersects(CellState::BUSY | CellState::BLOCK)
    }
}
