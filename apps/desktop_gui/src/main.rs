use std::path::PathBuf;

mod bridge;
mod ui;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

#[derive(Parser, Debug)]
struct Cli {
    /// Config file path; falls back to cube-duel.toml in the working
    /// directory when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let config = battle_core::load_config(cli.config.as_deref())?;
    tracing::info!(
        players = config.player_count,
        variant = %config.variant,
        "starting cube duel"
    );
    let handle = bridge::launch(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Cube Duel")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Cube Duel",
        options,
        Box::new(|_cc| Ok(Box::new(ui::CubeDuelApp::new(handle)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop ui: {err}"))
}
