// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod maze;
pub mod palette;
pub mod pathfinding;
pub mod session;
#[cfg(feature = "gui")]
pub mod ui;

pub use config::AppConfig;
pub use error::{AppError, GridError};
pub use grid::{Cell, CellState, Grid};
pub use maze::MazeGenerator;
pub use pathfinding::{find_path, AStar, SearchStatus};
pub use session::Session;
