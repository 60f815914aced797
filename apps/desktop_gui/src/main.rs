mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use client_core::config::load_settings;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use ui::OracleApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let language = settings.language;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Star Oracle")
            .with_inner_size([1100.0, 860.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Star Oracle",
        options,
        Box::new(move |cc| {
            ui::theme::install_fonts(&cc.egui_ctx);
            Ok(Box::new(OracleApp::new(cmd_tx, ui_rx, language)))
        }),
    )
}
