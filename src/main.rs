mod gui;
mod support;

use clap::Parser;

use resourcehub::config::Config;
use resourcehub::{tracing_config, Dashboard, ResourceHub};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    tracing_config::configure(config.log_format)?;

    let seed = config.load_seed()?;
    let hub = ResourceHub::new(seed, config.ids);
    let anchor = config.anchor_or(chrono::Local::now().date_naive());
    let dashboard = Dashboard::new(anchor, config.view, config.schedule);
    tracing::info!(%anchor, view = ?config.view, "Starting ResourceHub");

    gui::Gui::new(hub, dashboard).run()
}
