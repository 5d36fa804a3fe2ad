mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use config::DashConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = DashConfig::load().context("loading configuration")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.dataset_path = PathBuf::from(path);
    }

    let dataset = data::loader::load_file(&config.dataset_path)
        .with_context(|| format!("loading dataset {}", config.dataset_path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    let dataset = Arc::new(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
