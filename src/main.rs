mod app;
mod config;
mod core;
mod screen;
mod theme;
mod ui;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "showdetails", about = "Show details for a tracked TV show")]
struct Cli {
    /// Show to open; defaults to the configured show
    #[arg(long)]
    show_id: Option<i64>,

    /// Library file to read shows from
    #[arg(long)]
    library: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> iced::Result {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let (mut config, config_error) = match AppConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("ShowDetails starting...");
    if let Some(e) = config_error {
        tracing::warn!("Falling back to default config: {e}");
    }

    if let Some(library) = cli.library {
        config.library_path = library;
    }
    let show_id = cli.show_id.unwrap_or(config.default_show_id);
    let window_size = (config.window_width, config.window_height);

    let boot = app::Boot { config, show_id };

    iced::application(move || app::App::new(boot.clone()), app::App::update, app::App::view)
        .title(app::App::title)
        .subscription(app::App::subscription)
        .theme(app::App::theme)
        .window_size(window_size)
        .antialiasing(true)
        .run()
}
