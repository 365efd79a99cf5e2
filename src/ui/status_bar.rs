// src/ui/status_bar.rs

use std::sync::Arc;

use eframe::egui::{self, Context};
use parking_lot::RwLock;

use crate::session::Session;

pub struct StatusBar {
    session: Arc<RwLock<Session>>,
}

impl StatusBar {
    pub fn new(session: Arc<RwLock<Session>>) -> Self {
        Self { session }
    }

    pub fn update(&mut self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let session = self.session.read(); // Keep the read lock short.

            let tool_label = session
                .current_tool()
                .map_or("none", |tool| tool.name());
            let grid = session.grid();

            ui.horizontal(|ui| {
                ui.label(&session.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Tool: {}", tool_label));
                    ui.label(format!("Grid: {}x{}", grid.rows(), grid.cols()));
                });
            });
        });
    }
}
