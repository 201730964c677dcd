mod app;
mod config;
mod control;
mod data;
mod error;
mod processing;
mod render;
mod state;
mod ui;

use app::BoundmarkApp;
use clap::Parser;
use config::Cli;
use control::session::Session;
use data::archive::{load_orbit_list, DataSource, SpecArchive};
use data::persistence::JsonFile;
use eframe::egui;
use eframe::egui_wgpu;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let session = match open_session(&cli) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("boundmark: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Boundmark")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            ..Default::default()
        },
        ..Default::default()
    };

    eframe::run_native(
        "Boundmark",
        options,
        Box::new(|cc| Ok(Box::new(BoundmarkApp::new(cc, session)))),
    )
}

/// Load the archive, the orbit list and the stored annotations.
fn open_session(cli: &Cli) -> error::Result<Session> {
    let archive = SpecArchive::open(&cli.data)?;
    let orbits = match &cli.orbits {
        Some(path) => load_orbit_list(path)?,
        None => archive.orbit_ids(),
    };
    let store = JsonFile::new(&cli.annotations);
    tracing::info!(
        "{} navigable orbits, annotations in {:?}",
        orbits.len(),
        store.path()
    );
    Session::new(
        Box::new(archive),
        Box::new(store),
        orbits,
        &cli.session_config(),
    )
}
