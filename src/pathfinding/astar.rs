// src/pathfinding/astar.rs

use log::debug;

use crate::grid::{Cell, Grid};
use crate::pathfinding::heuristic::euclidean;

/// What one expansion did, for a renderer to animate.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// The node taken off the open set this step. It is closed once the
    /// step returns.
    pub current: Cell,
    /// Every passable 4-neighbor of `current`, in visiting order.
    pub neighbors: Vec<Cell>,
    /// Neighbors that entered the open set during this step.
    pub discovered: Vec<Cell>,
}

impl StepReport {
    /// The node finalized by this step.
    pub fn closed(&self) -> Cell {
        self.current
    }
}

/// Result of a single call to [`AStar::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    /// A node was expanded; the search continues.
    Expanded(StepReport),
    /// The end node was reached. The path runs start to end inclusive.
    Found(Vec<Cell>),
    /// The open set ran dry without reaching the end.
    NoPath,
}

impl SearchStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchStatus::Expanded(_))
    }
}

/// Incremental A* over a [`Grid`], one node expansion per [`AStar::step`].
///
/// Scores live in flat arrays indexed like the grid. The open set is a plain
/// vector kept in insertion order; selection scans it linearly and takes the
/// *first* node with the lowest f, so ties go to whichever node was
/// discovered earliest. That makes runs reproducible at O(n) per step, which
/// is fine for canvas-sized grids.
#[derive(Debug, Clone)]
pub struct AStar {
    rows: usize,
    cols: usize,
    start: Cell,
    end: Cell,
    g_score: Vec<f64>,
    f_score: Vec<f64>,
    came_from: Vec<Option<usize>>,
    open: Vec<usize>,
    in_open: Vec<bool>,
    closed: Vec<bool>,
    outcome: Option<SearchStatus>,
    expansions: usize,
}

impl AStar {
    /// Prepares a search from the grid's start marker to its end marker.
    pub fn new(grid: &Grid) -> Self {
        let len = grid.len();
        let (start, end) = (grid.start(), grid.end());
        let mut search = Self {
            rows: grid.rows(),
            cols: grid.cols(),
            start,
            end,
            g_score: vec![f64::INFINITY; len],
            f_score: vec![f64::INFINITY; len],
            came_from: vec![None; len],
            open: Vec::new(),
            in_open: vec![false; len],
            closed: vec![false; len],
            outcome: None,
            expansions: 0,
        };

        let s = grid.index(start);
        search.g_score[s] = 0.0;
        search.f_score[s] = euclidean(start, end);
        search.open.push(s);
        search.in_open[s] = true;
        search
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// True once a terminal status has been produced.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of nodes expanded so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.row < self.rows && cell.col < self.cols {
            Some(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    fn cell(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    /// Best known cost from the start, `f64::INFINITY` when undiscovered.
    pub fn g_score(&self, cell: Cell) -> f64 {
        self.index(cell).map_or(f64::INFINITY, |i| self.g_score[i])
    }

    /// Estimated total cost through `cell`.
    pub fn f_score(&self, cell: Cell) -> f64 {
        self.index(cell).map_or(f64::INFINITY, |i| self.f_score[i])
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.in_open[i])
    }

    pub fn is_closed(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.closed[i])
    }

    /// Open set contents in insertion order.
    pub fn open_cells(&self) -> Vec<Cell> {
        self.open.iter().map(|&i| self.cell(i)).collect()
    }

    /// Expands one node. Once the search has finished, every further call
    /// returns the same terminal status.
    ///
    /// `grid` must be the grid the search was created from; editing it
    /// mid-run is not supported.
    pub fn step(&mut self, grid: &Grid) -> SearchStatus {
        debug_assert_eq!((grid.rows(), grid.cols()), (self.rows, self.cols));

        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        // First minimum in insertion order.
        let mut best: Option<(usize, f64)> = None;
        for (pos, &idx) in self.open.iter().enumerate() {
            let f = self.f_score[idx];
            if best.map_or(true, |(_, best_f)| f < best_f) {
                best = Some((pos, f));
            }
        }
        let Some((pos, _)) = best else {
            debug!("A* exhausted the open set after {} expansions", self.expansions);
            self.outcome = Some(SearchStatus::NoPath);
            return SearchStatus::NoPath;
        };

        let current_idx = self.open[pos];
        let current = self.cell(current_idx);

        if current == self.end {
            let path = self.reconstruct_path(current_idx);
            debug!(
                "A* reached {} after {} expansions, path of {} cells",
                self.end,
                self.expansions,
                path.len()
            );
            let status = SearchStatus::Found(path);
            self.outcome = Some(status.clone());
            return status;
        }

        self.open.remove(pos);
        self.in_open[current_idx] = false;
        self.closed[current_idx] = true;
        self.expansions += 1;

        let neighbors = grid.open_neighbors(current);
        let mut discovered = Vec::new();
        let tentative = self.g_score[current_idx] + 1.0;

        for &neighbor in &neighbors {
            let n = grid.index(neighbor);
            if tentative < self.g_score[n] {
                self.came_from[n] = Some(current_idx);
                self.g_score[n] = tentative;
                self.f_score[n] = tentative + euclidean(neighbor, self.end);
                if !self.in_open[n] {
                    self.open.push(n);
                    self.in_open[n] = true;
                    // A closed node only reopens if its cost dropped.
                    self.closed[n] = false;
                    discovered.push(neighbor);
                }
            }
        }

        SearchStatus::Expanded(StepReport {
            current,
            neighbors,
            discovered,
        })
    }

    fn reconstruct_path(&self, end_idx: usize) -> Vec<Cell> {
        let mut path = vec![self.cell(end_idx)];
        let mut cursor = end_idx;
        while let Some(prev) = self.came_from[cursor] {
            path.push(self.cell(prev));
            cursor = prev;
        }
        path.reverse();
        path
    }

    /// Steps to completion, handing every expansion to `on_step`. Returns the
    /// path, or an empty vector when the end is unreachable.
    pub fn run<F>(&mut self, grid: &Grid, mut on_step: F) -> Vec<Cell>
    where
        F: FnMut(&StepReport),
    {
        loop {
            match self.step(grid) {
                SearchStatus::Expanded(report) => on_step(&report),
                SearchStatus::Found(path) => return path,
                SearchStatus::NoPath => return Vec::new(),
            }
        }
    }
}

/// Shortest 4-connected path from the grid's start to its end, or an empty
/// vector if there is none.
pub fn find_path(grid: &Grid) -> Vec<Cell> {
    AStar::new(grid).run(grid, |_| {})
}
