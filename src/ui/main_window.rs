//! # Main Window Module
//!
//! The visualizer window: a left side panel for tools and actions, a central
//! canvas painting the grid, and a bottom status bar. The window also acts as
//! the step driver, ticking the session's running job at the configured
//! cadence and asking egui to repaint in time for the next step.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use log::info;
use parking_lot::RwLock;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::Session;
use crate::ui::{CentralPanel, SidePanel, StatusBar};

/// Upper bound on steps taken in one frame, so a zero delay still lets the
/// window repaint while a large job runs.
const MAX_STEPS_PER_FRAME: u32 = 64;

/// How many steps are due after `elapsed` with one step every `delay`.
pub fn steps_due(elapsed: Duration, delay: Duration) -> u32 {
    if delay.is_zero() {
        return MAX_STEPS_PER_FRAME;
    }
    let due = elapsed.as_nanos() / delay.as_nanos();
    due.min(MAX_STEPS_PER_FRAME as u128) as u32
}

/// MainWindow holds the panels and the shared session.
pub struct MainWindow {
    session: Arc<RwLock<Session>>,
    side_panel: SidePanel,
    central_panel: CentralPanel,
    status_bar: StatusBar,
    last_step: Instant,
}

impl MainWindow {
    pub fn new(session: Session) -> Self {
        let cell_size = session.config().cell_size as f32;
        let session = Arc::new(RwLock::new(session));
        Self {
            side_panel: SidePanel::new(Arc::clone(&session)),
            central_panel: CentralPanel::new(Arc::clone(&session), cell_size),
            status_bar: StatusBar::new(Arc::clone(&session)),
            session,
            last_step: Instant::now(),
        }
    }

    /// Ticks the running job as far as the elapsed time allows.
    fn drive_job(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let mut session = self.session.write();
        let Some(delay) = session.step_delay() else {
            self.last_step = now;
            return;
        };

        let due = steps_due(now.duration_since(self.last_step), delay);
        if due > 0 {
            for _ in 0..due {
                if session.tick().is_final() {
                    break;
                }
            }
            self.last_step = now;
        }
        ctx.request_repaint_after(delay);
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_job(ctx);
        self.side_panel.update(ctx);
        self.status_bar.update(ctx);
        self.central_panel.update(ctx);
    }
}

/// Opens the visualizer window and blocks until it is closed.
pub fn run_main_window(config: AppConfig) -> Result<(), AppError> {
    let session = Session::new(config)?;
    let window_size = egui::vec2(
        session.config().canvas_width as f32 + 220.0,
        session.config().canvas_height as f32 + 60.0,
    );
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(window_size),
        ..Default::default()
    };

    info!("Opening visualizer window");
    let window = MainWindow::new(session);
    eframe::run_native(
        "A* Pathfinding",
        native_options,
        Box::new(move |_cc| Box::new(window)),
    );
    // run_native returns () so we simply return Ok.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_due() {
        let delay = Duration::from_millis(10);
        assert_eq!(steps_due(Duration::from_millis(5), delay), 0);
        assert_eq!(steps_due(Duration::from_millis(10), delay), 1);
        assert_eq!(steps_due(Duration::from_millis(35), delay), 3);
        assert_eq!(steps_due(Duration::from_secs(60), delay), MAX_STEPS_PER_FRAME);
        assert_eq!(steps_due(Duration::ZERO, Duration::ZERO), MAX_STEPS_PER_FRAME);
    }
}
