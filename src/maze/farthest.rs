// src/maze/farthest.rs

use std::collections::VecDeque;

use crate::grid::{Cell, Grid};

/// Visiting order for the breadth-first search: left, right, up, down.
/// It differs from the pathfinder's order and decides which of several
/// equally distant cells wins.
const BFS_DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// The most distant open cell found by a breadth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Farthest {
    pub cell: Cell,
    /// Number of steps from the search origin.
    pub distance: usize,
}

/// Breadth-first search over open cells from `from`, returning the first
/// cell reached at the greatest distance. When nothing else is reachable the
/// origin itself comes back with distance 0.
pub fn farthest_open_cell(grid: &Grid, from: Cell) -> Farthest {
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    let mut farthest = Farthest { cell: from, distance: 0 };

    if !grid.in_bounds(from) {
        return farthest;
    }
    visited[grid.index(from)] = true;
    queue.push_back((from, 0usize));

    while let Some((current, dist)) = queue.pop_front() {
        // Strictly greater: the first cell seen at a distance keeps it.
        if dist > farthest.distance && grid.is_open(current) {
            farthest = Farthest { cell: current, distance: dist };
        }

        for (dr, dc) in BFS_DIRECTIONS {
            let Some(next) = current.offset(dr, dc) else {
                continue;
            };
            if grid.is_open(next) && !visited[grid.index(next)] {
                visited[grid.index(next)] = true;
                queue.push_back((next, dist + 1));
            }
        }
    }

    farthest
}

/// Two-pass farthest-point search: the cell farthest from `origin`, then the
/// cell farthest from that one. Approximates the endpoints of the longest
/// shortest path through the open cells without guaranteeing it.
pub fn diameter_endpoints(grid: &Grid, origin: Cell) -> (Cell, Cell) {
    let start = farthest_open_cell(grid, origin).cell;
    let end = farthest_open_cell(grid, start).cell;
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor() {
        let grid = Grid::new(1, 5).unwrap();
        let result = farthest_open_cell(&grid, Cell::new(0, 0));
        assert_eq!(result, Farthest { cell: Cell::new(0, 4), distance: 4 });
        assert_eq!(
            diameter_endpoints(&grid, Cell::new(0, 2)),
            (Cell::new(0, 0), Cell::new(0, 4))
        );
    }

    #[test]
    fn test_first_seen_wins_ties() {
        // From the centre every corner is two steps away; left-first
        // expansion reaches the top-left corner first.
        let grid = Grid::new(3, 3).unwrap();
        let result = farthest_open_cell(&grid, Cell::new(1, 1));
        assert_eq!(result, Farthest { cell: Cell::new(0, 0), distance: 2 });
    }

    #[test]
    fn test_isolated_origin() {
        let mut grid = Grid::new(5, 5).unwrap();
        // Wall the corner (0, 0) off.
        grid.toggle_wall(Cell::new(0, 1));
        grid.toggle_wall(Cell::new(1, 0));
        let result = farthest_open_cell(&grid, Cell::new(0, 0));
        assert_eq!(result, Farthest { cell: Cell::new(0, 0), distance: 0 });
    }

    #[test]
    fn test_walls_block_search() {
        let mut grid = Grid::new(3, 5).unwrap();
        for row in 0..3 {
            grid.toggle_wall(Cell::new(row, 2));
        }
        let result = farthest_open_cell(&grid, Cell::new(0, 0));
        assert_eq!(result, Farthest { cell: Cell::new(2, 1), distance: 3 });
    }
}
