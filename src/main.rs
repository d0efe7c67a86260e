mod error;
mod ops;
mod renderer;
mod types;
mod ui;

use crate::error::ConfigError;
use crate::types::site_config::{CONFIG_FILE_NAME, SiteConfig};
use crate::ui::app::ArtistCardApp;
use crate::ui::shell::Route;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const INIT_CONFIG_FLAG: &str = "--init-config";

/// Writes the built-in profile as a starting point for editing. Never
/// overwrites an existing file.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }
    SiteConfig::default().save_to_file(path)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artistcard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some(INIT_CONFIG_FLAG) {
        let path = Path::new(CONFIG_FILE_NAME);
        if let Err(err) = write_default_config(path) {
            tracing::error!(path = %path.display(), error = %err, "failed to write site config");
            std::process::exit(1);
        }
        tracing::info!(path = %path.display(), "wrote default site config");
        return Ok(());
    }

    let route = Route::parse(arg.as_deref());
    let config = SiteConfig::discover();
    tracing::info!(artist = %config.profile.name, ?route, "starting");

    let app = ArtistCardApp::new(config, route);

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "artistcard",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
