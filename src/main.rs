mod animator;
mod catalog;
mod config;
mod error;
mod input;
mod planner;
mod ui;

use std::env;
use color_eyre::eyre;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::MissionConfig;
use crate::ui::Window;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Optional TOML config as the only argument
    let config = match env::args().nth(1) {
        Some(path) => MissionConfig::load(path)?,
        None => MissionConfig::default(),
    };
    let catalog = config.catalog()?;

    info!(bodies = catalog.bodies().len(), gravitational_parameter = config.gravitational_parameter,
          "Starting planner");

    let mut window = Window::init(&catalog, config.gravitational_parameter, config.clock());
    window.run();

    Ok(())
}
