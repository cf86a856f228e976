mod config_file;
mod monitor;
mod transport;

use std::io;
use std::path::PathBuf;

use poller_logging::{poller_info, poller_warn, LogDestination};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config_file::DEFAULT_CONFIG_PATH));
    let config = config_file::load(&path)?;

    poller_logging::initialize(LogDestination::Both, poller_logging::level_for(config.debug));
    poller_info!(
        "Config loaded urls={} interval={}ms server={} debug={}",
        config.link_count(),
        config.update_interval,
        config.enable_server,
        config.debug
    );
    for warning in config.warnings() {
        poller_warn!("{}", warning);
    }

    let state = monitor::run(config, io::stdin().lock())?;
    poller_info!("Event stream closed, final status {}", state.effective_status().label());
    Ok(())
}
