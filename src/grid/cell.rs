// src/grid/cell.rs

use std::fmt;

/// A (row, col) coordinate on the grid, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offsets the cell by `(dr, dc)`, returning `None` on underflow.
    /// Upper bounds are the grid's business.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Cell> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Cell { row, col })
    }

    /// The cell halfway between `self` and `other`. Only meaningful for two
    /// lattice cells two steps apart on one axis.
    pub fn midpoint(&self, other: &Cell) -> Cell {
        Cell {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Occupancy of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Open,
    Wall,
}

impl CellState {
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    /// Flips open <-> wall.
    pub fn toggled(self) -> Self {
        match self {
            CellState::Open => CellState::Wall,
            CellState::Wall => CellState::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_underflow() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -2), None);
        assert_eq!(origin.offset(2, 1), Some(Cell::new(2, 1)));
    }

    #[test]
    fn test_midpoint_and_adjacency() {
        let a = Cell::new(1, 1);
        let b = Cell::new(1, 3);
        assert_eq!(a.midpoint(&b), Cell::new(1, 2));
        assert!(a.is_adjacent(&Cell::new(2, 1)));
        assert!(!a.is_adjacent(&b));
        assert!(!a.is_adjacent(&Cell::new(2, 2)));
        assert!(!a.is_adjacent(&a));
    }

    #[test]
    fn test_toggle() {
        assert_eq!(CellState::Open.toggled(), CellState::Wall);
        assert_eq!(CellState::Wall.toggled(), CellState::Open);
        assert!(CellState::Wall.is_wall());
    }
}
