// src/grid/mod.rs
pub mod cell;
#[allow(clippy::module_inception)]
pub mod grid;

pub use cell::{Cell, CellState};
pub use grid::{Grid, DIRECTIONS};
