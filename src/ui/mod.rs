// src/ui/mod.rs
pub mod central_panel;
pub mod main_window;
pub mod side_panel;
pub mod status_bar;

pub use central_panel::CentralPanel;
pub use main_window::{run_main_window, MainWindow};
pub use side_panel::SidePanel;
pub use status_bar::StatusBar;
