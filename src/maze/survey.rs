// src/maze/survey.rs

use std::ops::Range;
use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::GridError;
use crate::grid::Grid;
use crate::maze::generator::MazeGenerator;
use crate::pathfinding::AStar;

/// Measurements for a single seeded maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeSample {
    pub seed: u64,
    pub open_cells: usize,
    pub connected: bool,
    /// Cells on the start→end path, 0 when unsolvable.
    pub path_len: usize,
    pub expansions: usize,
}

/// Aggregate over a batch of mazes.
#[derive(Debug, Clone, Default)]
pub struct SurveyReport {
    pub rows: usize,
    pub cols: usize,
    pub samples: Vec<MazeSample>,
    pub elapsed_secs: f64,
}

impl SurveyReport {
    pub fn all_connected(&self) -> bool {
        self.samples.iter().all(|s| s.connected)
    }

    pub fn mean_path_len(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.path_len as f64).sum::<f64>() / self.samples.len() as f64
    }

    pub fn longest(&self) -> Option<&MazeSample> {
        self.samples.iter().max_by_key(|s| s.path_len)
    }

    /// Share of open cells the pathfinder expanded, averaged over samples.
    pub fn mean_expansion_ratio(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples
            .iter()
            .map(|s| s.expansions as f64 / s.open_cells.max(1) as f64)
            .sum::<f64>()
            / self.samples.len() as f64
    }
}

/// Generates and solves one maze per seed in parallel. Each worker owns its
/// grid and RNG, so results match a sequential run seed for seed.
pub fn survey(rows: usize, cols: usize, seeds: Range<u64>) -> Result<SurveyReport, GridError> {
    // Validate the size once up front instead of failing in every worker.
    let template = Grid::new(rows, cols)?;
    if template.rows() < 3 || template.cols() < 3 {
        return Err(GridError::TooSmallForMaze {
            rows: template.rows(),
            cols: template.cols(),
        });
    }

    let started = Instant::now();
    let samples: Vec<MazeSample> = seeds
        .into_par_iter()
        .map(|seed| sample(&template, seed))
        .collect::<Result<_, _>>()?;

    let report = SurveyReport {
        rows: template.rows(),
        cols: template.cols(),
        samples,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };

    if !report.all_connected() {
        warn!("Survey found disconnected mazes");
    }
    info!(
        "Surveyed {} mazes of {}x{} in {:.3}s, mean path {:.1}",
        report.samples.len(),
        report.rows,
        report.cols,
        report.elapsed_secs,
        report.mean_path_len()
    );
    Ok(report)
}

fn sample(template: &Grid, seed: u64) -> Result<MazeSample, GridError> {
    let mut grid = template.clone();
    MazeGenerator::new(&mut grid, StdRng::seed_from_u64(seed))?.run(&mut grid, |_| {});

    let mut search = AStar::new(&grid);
    let path = search.run(&grid, |_| {});

    Ok(MazeSample {
        seed,
        open_cells: grid.open_cell_count(),
        connected: grid.is_connected(),
        path_len: path.len(),
        expansions: search.expansions(),
    })
}
