//! Read-only loading of the scraper configuration file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use poller_core::Config;
use poller_logging::poller_info;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Loads, defaults and validates the config at `path`. A missing file yields
/// the default config; writing it back belongs to the config owner.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            poller_info!("Config file {:?} not found, using defaults", path);
            return Ok(Config::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to open config file {path:?}"))
        }
    };

    let mut config: Config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {path:?}"))?;
    config.apply_defaults();
    config
        .validate()
        .with_context(|| format!("invalid config file {path:?}"))?;
    Ok(config)
}
