// src/ui/side_panel.rs

use std::sync::Arc;

use eframe::egui::{self, Context, Ui};
use log::error;
use parking_lot::RwLock;

use crate::session::{Session, Tool};

/// Manages the left-side panel with the tool buttons and the job controls.
pub struct SidePanel {
    session: Arc<RwLock<Session>>,
}

impl SidePanel {
    pub fn new(session: Arc<RwLock<Session>>) -> Self {
        Self { session }
    }

    /// Called each frame to draw the panel.
    pub fn update(&mut self, ctx: &Context) {
        egui::SidePanel::left("tools_panel")
            .default_width(180.0)
            .resizable(false)
            .show(ctx, |ui| {
                let busy = self.session.read().is_busy();
                ui.add_enabled_ui(!busy, |ui| {
                    self.show_tools(ui);
                    ui.separator();
                    self.show_actions(ui);
                });
                ui.separator();
                if busy && ui.button("Cancel").clicked() {
                    self.session.write().cancel();
                }
            });
    }

    /// Lists the editing tools; the active one is highlighted.
    fn show_tools(&self, ui: &mut Ui) {
        ui.heading("Tools");

        let current = self.session.read().current_tool();
        for &tool in Tool::all() {
            if ui.selectable_label(current == Some(tool), tool.name()).clicked() {
                self.session.write().set_current_tool(tool);
            }
        }
    }

    fn show_actions(&self, ui: &mut Ui) {
        ui.heading("Actions");

        if ui.button("Clear").clicked() {
            self.session.write().clear();
        }

        if ui.button("Generate Maze").clicked() {
            let mut session = self.session.write();
            if let Err(err) = session.start_maze() {
                error!("Maze generation failed: {}", err);
                session.status_message = err.to_string();
            }
        }

        if ui.button("Run A*").clicked() {
            self.session.write().start_search();
        }
    }
}
