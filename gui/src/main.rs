mod app;
mod cli;

use app::GlyphtoneApp;
use clap::{CommandFactory, Parser, error::ErrorKind};
use cli::Cli;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    let cli = Cli::parse();
    let config = cli
        .resolve_config()
        .unwrap_or_else(|e| Cli::command().error(ErrorKind::InvalidValue, e).exit());

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("glyphtone")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "glyphtone",
        options,
        Box::new(move |cc| {
            let mut app = GlyphtoneApp::new(cc, config);
            if let Some(path) = &cli.image {
                app.load_image(path);
            }
            Ok(Box::new(app))
        }),
    )
}

/// Application icon: a 4x4 grid of cells stepping from black to white
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let cell = icon_size / 4;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;
            let step = (y / cell) * 4 + x / cell;
            let level = (step * 255 / 15) as u8;

            pixels[idx] = level;
            pixels[idx + 1] = level;
            pixels[idx + 2] = level;
            pixels[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
