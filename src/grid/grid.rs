// src/grid/grid.rs

use log::debug;
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::error::GridError;
use crate::grid::{Cell, CellState};

/// Neighbor offsets in the fixed visiting order up, down, left, right.
/// The pathfinder's tie-breaking depends on this order.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The occupancy grid plus its start and end markers.
///
/// Dimensions are odd in both axes so that maze carving works on a lattice of
/// odd coordinates separated by wall corridors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    start: Cell,
    end: Cell,
}

/// Rounds an even count down to the previous odd number.
fn force_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n.saturating_sub(1)
    } else {
        n
    }
}

impl Grid {
    /// Creates an all-open grid. Even dimensions are decremented to the next
    /// odd value, so `new(10, 10)` yields a 9x9 grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let (odd_rows, odd_cols) = (force_odd(rows), force_odd(cols));
        if odd_rows == 0 || odd_cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        debug!("Creating {}x{} grid (requested {}x{})", odd_rows, odd_cols, rows, cols);
        Ok(Self {
            rows: odd_rows,
            cols: odd_cols,
            cells: vec![CellState::Open; odd_rows * odd_cols],
            start: default_start(odd_rows, odd_cols),
            end: default_end(odd_rows, odd_cols),
        })
    }

    /// Sizes the grid from a display area in pixels and a square cell size.
    pub fn from_display(width: u32, height: u32, cell_size: u32) -> Result<Self, GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        Self::new((height / cell_size) as usize, (width / cell_size) as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Inverse of [`Grid::index`].
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    /// Returns the state of a cell, or `None` when it lies outside the grid.
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        if self.in_bounds(cell) {
            Some(self.cells[self.index(cell)])
        } else {
            None
        }
    }

    /// Out-of-bounds cells count as neither wall nor open.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Wall)
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Open)
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// Iterates every cell with its state in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, state)| (self.cell_at(i), *state))
    }

    // --- Edits ---

    /// Flips a cell between open and wall. Refused on the start and end
    /// markers and outside the grid. Returns whether the grid changed.
    pub fn toggle_wall(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) || cell == self.start || cell == self.end {
            return false;
        }
        let idx = self.index(cell);
        self.cells[idx] = self.cells[idx].toggled();
        true
    }

    /// Moves the start marker. Refused on walls, on the end marker and
    /// outside the grid.
    pub fn set_start(&mut self, cell: Cell) -> bool {
        if !self.is_open(cell) || cell == self.end {
            return false;
        }
        self.start = cell;
        true
    }

    /// Moves the end marker. Same rules as [`Grid::set_start`].
    pub fn set_end(&mut self, cell: Cell) -> bool {
        if !self.is_open(cell) || cell == self.start {
            return false;
        }
        self.end = cell;
        true
    }

    /// Opens every cell and puts the markers back at their defaults.
    pub fn clear(&mut self) {
        self.fill(CellState::Open);
        self.start = default_start(self.rows, self.cols);
        self.end = default_end(self.rows, self.cols);
    }

    // --- Crate-internal writes used by the maze generator ---

    pub(crate) fn fill(&mut self, state: CellState) {
        self.cells.iter_mut().for_each(|c| *c = state);
    }

    pub(crate) fn set_state(&mut self, cell: Cell, state: CellState) {
        let idx = self.index(cell);
        self.cells[idx] = state;
    }

    /// Installs both markers at once, bypassing the coincidence check. The
    /// farthest-point search may legitimately return the same cell twice on
    /// a grid with a single open cell.
    pub(crate) fn place_markers(&mut self, start: Cell, end: Cell) {
        debug_assert!(self.is_open(start) && self.is_open(end));
        self.start = start;
        self.end = end;
    }

    // --- Queries ---

    /// In-bounds, non-wall 4-neighbors in [`DIRECTIONS`] order.
    pub fn open_neighbors(&self, cell: Cell) -> Vec<Cell> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| cell.offset(dr, dc))
            .filter(|n| self.is_open(*n))
            .collect()
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_wall()).count()
    }

    /// True when all open cells form a single 4-connected component.
    /// A grid without open cells counts as connected.
    pub fn is_connected(&self) -> bool {
        let mut uf: QuickUnionUf<UnionBySize> = QuickUnionUf::new(self.cells.len());
        for (cell, state) in self.iter() {
            if state.is_wall() {
                continue;
            }
            let idx = self.index(cell);
            // Right and down are enough to cover every edge once.
            for (dr, dc) in [(0, 1), (1, 0)] {
                if let Some(n) = cell.offset(dr, dc) {
                    if self.is_open(n) {
                        uf.union(idx, self.index(n));
                    }
                }
            }
        }

        let mut open = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_wall())
            .map(|(i, _)| i);
        let Some(first) = open.next() else {
            return true;
        };
        let root = uf.find(first);
        open.all(|i| uf.find(i) == root)
    }

    /// Plain-text rendering: `#` wall, `.` open, `S`/`E` markers, `*` path.
    pub fn to_ascii(&self, path: &[Cell]) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                let ch = if cell == self.start {
                    'S'
                } else if cell == self.end {
                    'E'
                } else if self.is_wall(cell) {
                    '#'
                } else if path.contains(&cell) {
                    '*'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

fn default_start(rows: usize, cols: usize) -> Cell {
    Cell::new(1usize.min(rows - 1), 1usize.min(cols - 1))
}

fn default_end(rows: usize, cols: usize) -> Cell {
    Cell::new(rows.saturating_sub(2), cols.saturating_sub(2))
}
