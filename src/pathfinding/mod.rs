// src/pathfinding/mod.rs
pub mod astar;
pub mod heuristic;

pub use astar::{find_path, AStar, SearchStatus, StepReport};
pub use heuristic::euclidean;
