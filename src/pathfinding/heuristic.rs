// src/pathfinding/heuristic.rs

use crate::grid::Cell;

/// Straight-line distance between two cells.
///
/// Movement is 4-connected, so Manhattan distance would be tight; Euclidean
/// distance never exceeds it, which keeps the estimate admissible while
/// changing which of several equal-cost paths gets explored first.
pub fn euclidean(a: Cell, b: Cell) -> f64 {
    let dr = a.row.abs_diff(b.row) as f64;
    let dc = a.col.abs_diff(b.col) as f64;
    (dr * dr + dc * dc).sqrt()
}
