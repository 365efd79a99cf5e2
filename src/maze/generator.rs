// src/maze/generator.rs

use log::{debug, info};
use rand::Rng;

use crate::error::GridError;
use crate::grid::{Cell, CellState, Grid};
use crate::maze::farthest::diameter_endpoints;

/// Lattice neighbors two cells away, in the order they are considered:
/// left, right, up, down.
const LATTICE_STEPS: [(isize, isize); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Outcome of one frontier pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveStep {
    /// The frontier entry consumed this step.
    pub frontier: Cell,
    /// The already-open lattice cell it was joined to, if any.
    pub linked_to: Option<Cell>,
}

impl CarveStep {
    /// The wall cell opened between `frontier` and `linked_to`.
    pub fn passage(&self) -> Option<Cell> {
        self.linked_to.map(|n| self.frontier.midpoint(&n))
    }

    pub fn carved(&self) -> bool {
        self.linked_to.is_some()
    }
}

/// Counters collected while a maze is being carved.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub steps: usize,
    pub carved: usize,
    pub skipped: usize,
}

/// Randomized Prim's maze generator working in place on a [`Grid`].
///
/// Carving happens on the odd-coordinate lattice: lattice cells become
/// passages and the even cells between them stay walls unless a passage is
/// cut through. The generator is driven one frontier pick at a time so that a
/// caller can animate it; [`MazeGenerator::run`] drives it to completion.
///
/// The random source is injected, so a seeded RNG reproduces the same maze.
pub struct MazeGenerator<R: Rng> {
    rng: R,
    frontier: Vec<Cell>,
    origin: Cell,
    rows: usize,
    cols: usize,
    stats: GenerationStats,
}

impl<R: Rng> MazeGenerator<R> {
    /// Walls in the whole grid, opens a random lattice cell and seeds the
    /// frontier around it.
    pub fn new(grid: &mut Grid, mut rng: R) -> Result<Self, GridError> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows < 3 || cols < 3 {
            return Err(GridError::TooSmallForMaze { rows, cols });
        }

        grid.fill(CellState::Wall);

        let col = 1 + 2 * rng.random_range(0..(cols - 1) / 2);
        let row = 1 + 2 * rng.random_range(0..(rows - 1) / 2);
        let origin = Cell::new(row, col);
        grid.set_state(origin, CellState::Open);

        let mut generator = Self {
            rng,
            frontier: Vec::new(),
            origin,
            rows,
            cols,
            stats: GenerationStats::default(),
        };
        generator.add_frontier(grid, origin);
        info!("Generating {}x{} maze from {}", rows, cols, origin);
        Ok(generator)
    }

    /// The first cell carved.
    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn frontier(&self) -> &[Cell] {
        &self.frontier
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// True while frontier entries remain.
    pub fn has_more(&self) -> bool {
        !self.frontier.is_empty()
    }

    /// Lattice cells two steps from `cell` that lie on the grid's inner area.
    fn lattice_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        LATTICE_STEPS.iter().filter_map(move |&(dr, dc)| {
            let next = cell.offset(dr, dc)?;
            // Stay off the outer border: lattice cells are odd, so the
            // last usable index is `dim - 2`.
            (next.row >= 1 && next.row <= self.rows - 2 && next.col >= 1 && next.col <= self.cols - 2)
                .then_some(next)
        })
    }

    fn add_frontier(&mut self, grid: &Grid, cell: Cell) {
        let walls: Vec<Cell> = self
            .lattice_neighbors(cell)
            .filter(|n| grid.is_wall(*n))
            .collect();
        self.frontier.extend(walls);
    }

    /// Consumes one random frontier entry. If it borders carved cells, it is
    /// joined to one of them at random and its own walled neighbors join the
    /// frontier; otherwise it is just dropped. Returns `None` once the
    /// frontier is empty.
    pub fn step(&mut self, grid: &mut Grid) -> Option<CarveStep> {
        debug_assert_eq!((grid.rows(), grid.cols()), (self.rows, self.cols));
        if self.frontier.is_empty() {
            return None;
        }

        let index = self.rng.random_range(0..self.frontier.len());
        let cell = self.frontier.remove(index);
        self.stats.steps += 1;

        let open: Vec<Cell> = self
            .lattice_neighbors(cell)
            .filter(|n| grid.is_open(*n))
            .collect();

        if open.is_empty() {
            self.stats.skipped += 1;
            return Some(CarveStep { frontier: cell, linked_to: None });
        }

        let neighbor = open[self.rng.random_range(0..open.len())];
        grid.set_state(cell, CellState::Open);
        grid.set_state(cell.midpoint(&neighbor), CellState::Open);
        self.add_frontier(grid, cell);
        self.stats.carved += 1;

        Some(CarveStep {
            frontier: cell,
            linked_to: Some(neighbor),
        })
    }

    /// Picks start and end with the two-pass farthest-point search from the
    /// origin and installs them on the grid. Meant to be called once
    /// [`MazeGenerator::has_more`] turns false.
    pub fn finalize(self, grid: &mut Grid) -> (Cell, Cell) {
        if self.has_more() {
            debug!("Finalizing maze with {} frontier entries left", self.frontier.len());
        }
        let (start, end) = diameter_endpoints(grid, self.origin);
        grid.place_markers(start, end);
        info!(
            "Maze done in {} steps ({} carved, {} skipped); start {} end {}",
            self.stats.steps, self.stats.carved, self.stats.skipped, start, end
        );
        (start, end)
    }

    /// Carves until the frontier is empty, reporting each step, then
    /// finalizes.
    pub fn run<F>(mut self, grid: &mut Grid, mut on_step: F) -> (Cell, Cell)
    where
        F: FnMut(&CarveStep),
    {
        while let Some(step) = self.step(grid) {
            on_step(&step);
        }
        self.finalize(grid)
    }
}

/// Generates a complete maze in one call.
pub fn generate<R: Rng>(grid: &mut Grid, rng: R) -> Result<(Cell, Cell), GridError> {
    Ok(MazeGenerator::new(grid, rng)?.run(grid, |_| {}))
}
