// src/export/png.rs

use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;

use crate::error::AppError;
use crate::grid::{Cell, Grid};
use crate::palette;

/// Paints the grid into an image, one `cell_size` square per cell with a
/// one-pixel grid line, path cells highlighted and the markers on top.
pub fn render_image(grid: &Grid, path: &[Cell], cell_size: u32) -> RgbImage {
    let cell_size = cell_size.max(1);
    let width = grid.cols() as u32 * cell_size;
    let height = grid.rows() as u32 * cell_size;
    let mut img = RgbImage::new(width, height);

    for (cell, state) in grid.iter() {
        let color = if cell == grid.start() {
            palette::START
        } else if cell == grid.end() {
            palette::END
        } else if state.is_wall() {
            palette::WALL
        } else if path.contains(&cell) {
            palette::PATH
        } else {
            palette::EMPTY
        };
        fill_cell(&mut img, cell, cell_size, color);
    }
    img
}

fn fill_cell(img: &mut RgbImage, cell: Cell, cell_size: u32, color: palette::Rgb) {
    let x0 = cell.col as u32 * cell_size;
    let y0 = cell.row as u32 * cell_size;
    for dy in 0..cell_size {
        for dx in 0..cell_size {
            let edge = cell_size > 2 && (dx == 0 || dy == 0 || dx == cell_size - 1 || dy == cell_size - 1);
            let rgb = if edge { palette::GRID_LINE } else { color };
            img.put_pixel(x0 + dx, y0 + dy, Rgb(rgb));
        }
    }
}

/// Renders and writes a PNG to `file`.
pub fn save_png(grid: &Grid, path: &[Cell], cell_size: u32, file: impl AsRef<Path>) -> Result<(), AppError> {
    let file = file.as_ref();
    render_image(grid, path, cell_size)
        .save(file)
        .map_err(|source| AppError::Export {
            path: file.display().to_string(),
            source,
        })?;
    info!("Wrote {}", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_and_colors() {
        let mut grid = Grid::new(3, 5).unwrap();
        grid.toggle_wall(Cell::new(0, 4));
        let img = render_image(&grid, &[Cell::new(1, 2)], 4);
        assert_eq!(img.dimensions(), (20, 12));

        // Interior pixel of each cell.
        let at = |cell: Cell| *img.get_pixel(cell.col as u32 * 4 + 1, cell.row as u32 * 4 + 1);
        assert_eq!(at(grid.start()), Rgb(palette::START));
        assert_eq!(at(grid.end()), Rgb(palette::END));
        assert_eq!(at(Cell::new(0, 4)), Rgb(palette::WALL));
        assert_eq!(at(Cell::new(1, 2)), Rgb(palette::PATH));
        assert_eq!(at(Cell::new(0, 0)), Rgb(palette::EMPTY));
        // Cell border.
        assert_eq!(*img.get_pixel(0, 0), Rgb(palette::GRID_LINE));
    }

    #[test]
    fn test_tiny_cells_skip_grid_lines() {
        let grid = Grid::new(1, 1).unwrap();
        let img = render_image(&grid, &[], 1);
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(*img.get_pixel(0, 0), Rgb(palette::START));
    }

    #[test]
    fn test_save_png() {
        let grid = Grid::new(5, 5).unwrap();
        let file = std::env::temp_dir().join("rust_astar_export_test.png");
        save_png(&grid, &[], 3, &file).unwrap();
        let loaded = image::open(&file).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (15, 15));
        let _ = std::fs::remove_file(&file);
    }
}
