// GUI main entry point using Dioxus
#![allow(non_snake_case)]

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = match AppConfig::load_default() {
        Ok(cfg) => {
            tracing::info!(version = %cfg.version, "Loaded default configuration");
            cfg
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Failed to load default configuration");
            std::process::exit(1);
        }
    };

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(1560.0, 1200.0)),
    );

    tracing::info!("Starting {}", app_config.app.title);
    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .launch(App);
}
