// src/error.rs

use std::io;
use thiserror::Error;

/// Errors raised while constructing or preparing a grid.
///
/// Edits on an existing grid never produce these; a rejected edit is reported
/// through the `bool` returned by the mutating method instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one row and one column (requested {rows}x{cols})")]
    Empty { rows: usize, cols: usize },

    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("maze generation needs at least a 3x3 grid, got {rows}x{cols}")]
    TooSmallForMaze { rows: usize, cols: usize },
}

/// Top-level error for the binary: configuration, export and grid setup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write image {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_messages() {
        let err = GridError::TooSmallForMaze { rows: 1, cols: 5 };
        assert_eq!(
            err.to_string(),
            "maze generation needs at least a 3x3 grid, got 1x5"
        );
        assert_eq!(
            GridError::ZeroCellSize.to_string(),
            "cell size must be greater than zero"
        );
    }

    #[test]
    fn test_app_error_wraps_grid_error() {
        let err: AppError = GridError::Empty { rows: 0, cols: 3 }.into();
        assert!(matches!(err, AppError::Grid(GridError::Empty { .. })));
        assert!(err.to_string().contains("0x3"));
    }
}
