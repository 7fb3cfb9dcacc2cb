mod app;
mod atlas;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::MapConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sector_atlas=info")),
        )
        .init();

    let config = MapConfig::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Sector Atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::SectorAtlasApp::new(cc, config)))),
    )
}
