use std::sync::Arc;

use eframe::egui;

use crate::config::DashConfig;
use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(config: DashConfig, dataset: Arc<LaunchDataset>) -> Self {
        Self {
            state: AppState::new(config, dataset),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + slider ----
        let events = egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::control_panel(ui, &mut self.state))
            .inner;
        for event in events {
            self.state.apply(event);
        }

        // ---- Bottom panel: filtered launches ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("launch_table")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    panels::launch_table(ui, &self.state);
                });
        }

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(&self.state.config.title).size(28.0));
            });
            ui.add_space(8.0);

            let chart_height = ((ui.available_height() - 60.0) / 2.0).max(120.0);
            plot::pie_chart(ui, &self.state, chart_height);
            ui.add_space(8.0);
            plot::scatter_chart(ui, &self.state, chart_height);
        });
    }
}
