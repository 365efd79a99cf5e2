// src/maze/mod.rs
pub mod farthest;
pub mod generator;
pub mod survey;

pub use farthest::{diameter_endpoints, farthest_open_cell, Farthest};
pub use generator::{generate, CarveStep, GenerationStats, MazeGenerator};
pub use survey::{survey, MazeSample, SurveyReport};
