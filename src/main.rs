mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::AppState;

const TITLE: &str = "Henley Passport Index Dashboard";

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();

    let dataset = data::loader::load_file(&config.data)?;
    let background = config
        .background_path()
        .map(|p| ui::background::load_image(p))
        .transpose()?;

    let state = AppState::new(dataset);
    log::info!(
        "Starting with {} countries over {} years, showing {} / {}",
        state.countries.len(),
        state.years.len(),
        state.filter.country,
        state.filter.year
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, state, background)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}
