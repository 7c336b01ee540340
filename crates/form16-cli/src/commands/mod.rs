//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;
pub mod render;
pub mod summary;

mod input;
mod output;

use std::path::Path;

use form16_core::models::config::Form16Config;
use tracing::debug;

/// Load the configuration from `--config`, the default location, or defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<Form16Config> {
    if let Some(path) = config_path {
        return Ok(Form16Config::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(Form16Config::from_file(&default_path)?)
    } else {
        Ok(Form16Config::default())
    }
}
