//! Central panel UI module: paints the grid with the search overlay and
//! forwards clicks on the canvas to the session's current tool.

use std::sync::Arc;

use eframe::egui::{self, Color32, Context, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use parking_lot::RwLock;

use crate::grid::Cell;
use crate::palette;
use crate::session::{Overlay, Session};

/// Converts a palette entry into an egui color.
pub fn color(rgb: palette::Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Maps a position relative to the canvas origin to the cell under it.
pub fn cell_at(offset: Vec2, cell_size: f32, rows: usize, cols: usize) -> Option<Cell> {
    if offset.x < 0.0 || offset.y < 0.0 || cell_size <= 0.0 {
        return None;
    }
    let col = (offset.x / cell_size).floor() as usize;
    let row = (offset.y / cell_size).floor() as usize;
    (row < rows && col < cols).then_some(Cell::new(row, col))
}

/// The `CentralPanel` struct provides the canvas: one square per grid cell.
pub struct CentralPanel {
    session: Arc<RwLock<Session>>,
    /// Edge length of a cell in points.
    cell_size: f32,
}

impl CentralPanel {
    pub fn new(session: Arc<RwLock<Session>>, cell_size: f32) -> Self {
        Self { session, cell_size }
    }

    /// Called each frame to paint the grid and handle clicks.
    pub fn update(&mut self, ctx: &Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let (rows, cols) = {
                    let session = self.session.read();
                    (session.grid().rows(), session.grid().cols())
                };
                let size = Vec2::new(cols as f32 * self.cell_size, rows as f32 * self.cell_size);
                let (response, painter) = ui.allocate_painter(size, Sense::click());
                let origin = response.rect.min;

                self.draw_grid(&painter, origin);

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        if let Some(cell) = cell_at(pos - origin, self.cell_size, rows, cols) {
                            let mut session = self.session.write();
                            if session.click(cell) {
                                ctx.request_repaint();
                            }
                        }
                    }
                }
            });
        });
    }

    fn cell_rect(&self, origin: Pos2, cell: Cell) -> Rect {
        Rect::from_min_size(
            origin + Vec2::new(cell.col as f32 * self.cell_size, cell.row as f32 * self.cell_size),
            Vec2::splat(self.cell_size),
        )
    }

    fn draw_grid(&self, painter: &Painter, origin: Pos2) {
        let session = self.session.read();
        let grid = session.grid();
        let line = Stroke::new(1.0, color(palette::GRID_LINE));

        for (cell, state) in grid.iter() {
            let rect = self.cell_rect(origin, cell);
            painter.rect_filled(rect, 0.0, color(fill_for(&session, cell, state.is_wall())));
            painter.rect_stroke(rect, 0.0, line);
        }
    }
}

/// Picks the fill for one cell. Markers win over everything, then the path,
/// the node being expanded, its neighbors, and finally the open/closed
/// overlay on top of the plain wall/empty base.
fn fill_for(session: &Session, cell: Cell, is_wall: bool) -> palette::Rgb {
    let grid = session.grid();
    if cell == grid.start() {
        return palette::START;
    }
    if cell == grid.end() {
        return palette::END;
    }
    if is_wall {
        return palette::WALL;
    }
    let overlay = session.overlay_at(cell);
    if overlay == Overlay::Path {
        return palette::PATH;
    }
    if session.current() == Some(cell) {
        return palette::CURRENT;
    }
    if overlay != Overlay::Frontier && session.neighbors().contains(&cell) {
        return palette::NEIGHBOR;
    }
    match overlay {
        Overlay::Frontier => palette::FRONTIER,
        Overlay::Visited => palette::VISITED,
        Overlay::Path => palette::PATH,
        Overlay::None => palette::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::grid::Grid;
    use crate::session::Tool;

    #[test]
    fn test_cell_at() {
        assert_eq!(cell_at(Vec2::new(0.0, 0.0), 20.0, 5, 5), Some(Cell::new(0, 0)));
        assert_eq!(cell_at(Vec2::new(45.0, 21.0), 20.0, 5, 5), Some(Cell::new(1, 2)));
        assert_eq!(cell_at(Vec2::new(100.0, 0.0), 20.0, 5, 5), None);
        assert_eq!(cell_at(Vec2::new(-1.0, 0.0), 20.0, 5, 5), None);
    }

    #[test]
    fn test_fill_for_markers_and_walls() {
        let mut session = Session::with_grid(AppConfig::default(), Grid::new(5, 5).unwrap());
        session.set_current_tool(Tool::Wall);
        session.click(Cell::new(0, 0));
        assert_eq!(fill_for(&session, Cell::new(1, 1), false), palette::START);
        assert_eq!(fill_for(&session, Cell::new(3, 3), false), palette::END);
        assert_eq!(fill_for(&session, Cell::new(0, 0), true), palette::WALL);
        assert_eq!(fill_for(&session, Cell::new(4, 4), false), palette::EMPTY);
    }

    #[test]
    fn test_fill_for_search_progress() {
        let mut session = Session::with_grid(AppConfig::default(), Grid::new(5, 5).unwrap());
        session.start_search();
        session.tick();
        // Start expanded first; its neighbors were just discovered.
        assert_eq!(fill_for(&session, Cell::new(0, 1), false), palette::FRONTIER);
        session.tick();
        let current = session.current().unwrap();
        assert_eq!(fill_for(&session, current, false), palette::CURRENT);

        session.run_to_completion();
        assert_eq!(fill_for(&session, Cell::new(2, 1), false), palette::PATH);
    }
}
