// src/config.rs

//! Application settings, loaded from an optional JSON file. Every field has
//! a default, so a config file only needs the keys it wants to change.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, GridError};
use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Drawing area in pixels. The grid gets one cell per `cell_size`
    /// pixels in each direction.
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    /// Pause between two carve steps when animating maze generation.
    pub maze_step_delay_ms: u64,
    /// Pause between two A* expansions when animating a search.
    pub search_step_delay_ms: u64,
    /// Fixed RNG seed for maze generation; random when absent.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            cell_size: 20,
            maze_step_delay_ms: 10,
            search_step_delay_ms: 50,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| AppError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn maze_step_delay(&self) -> Duration {
        Duration::from_millis(self.maze_step_delay_ms)
    }

    pub fn search_step_delay(&self) -> Duration {
        Duration::from_millis(self.search_step_delay_ms)
    }

    /// A fresh grid sized for the configured canvas.
    pub fn build_grid(&self) -> Result<Grid, GridError> {
        Grid::from_display(self.canvas_width, self.canvas_height, self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = AppConfig::from_json(r#"{ "cell_size": 10, "seed": 42 }"#).unwrap();
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.search_step_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_json_round_trip() {
        let config = AppConfig {
            seed: Some(7),
            maze_step_delay_ms: 0,
            ..AppConfig::default()
        };
        let parsed = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_build_grid() {
        let grid = AppConfig::default().build_grid().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (29, 39));

        let broken = AppConfig { cell_size: 0, ..AppConfig::default() };
        assert_eq!(broken.build_grid(), Err(GridError::ZeroCellSize));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/rust_astar.json").unwrap_err();
        assert!(matches!(err, AppError::ConfigIo { .. }));
    }

    #[test]
    fn test_load_bad_json() {
        let path = std::env::temp_dir().join("rust_astar_bad_config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
        let _ = fs::remove_file(&path);
    }
}
