//! Application entry point for the Hyperion backdrop viewer.
//!
//! Sets up logging and configuration, then hands the window to
//! [`Viewer`] from the `viewer` module.
//!
//! # Configuration
//!
//! - `BACKDROP_CONFIG`: path to a TOML config (default: `./backdrop.toml`)
//! - `RUST_LOG`: log filter (default: `backdrop_core=info,backdrop_view=info`)
//!
//! Run with `--print-config` to print a documented default config and exit.

mod viewer;

use backdrop_core::config::{Config, generate_default_config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    if std::env::args().skip(1).any(|a| a == "--print-config") {
        print!("{}", generate_default_config());
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backdrop_core=info,backdrop_view=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting backdrop viewer v{}", env!("CARGO_PKG_VERSION"));

    let cfg = Config::load_default();
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Hyperion",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}
