//! TOML project settings
//!
//! ```toml
//! network_file = "SiouxFalls_net.tntp"
//! demand_file = "SiouxFalls_trips.tntp"
//!
//! [network]
//! length_unit = "km"
//! speed_unit = "km/h"
//! free_flow_time_unit = "min"
//! default_maximum_speed = 25.0
//! node_coordinate_file = "SiouxFalls_node.tntp"
//!
//! [network.capacity_period]
//! duration = 1.0
//! unit = "h"
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;
use tntp_core::{TntpModel, TntpModelConfig, create_tntp_model};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings '{}': {source}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Model(#[from] tntp_core::Error),
}

/// Parses settings from TOML text, resolving relative paths against `base_dir`
pub fn parse_settings(text: &str, base_dir: &Path) -> Result<TntpModelConfig, SettingsError> {
    let mut config: TntpModelConfig = toml::from_str(text)?;

    let resolve = |path: &mut PathBuf| {
        if path.is_relative() {
            *path = base_dir.join(&*path);
        }
    };
    if let Some(network_file) = config.network_file.as_mut() {
        resolve(network_file);
    }
    resolve(&mut config.demand_file);
    if let Some(node_file) = config.network.node_coordinate_file.as_mut() {
        resolve(node_file);
    }

    config.network.validate()?;
    debug!("Settings: {config:?}");
    Ok(config)
}

/// Reads a settings file; data file paths are relative to its directory
pub fn load_settings(path: &Path) -> Result<TntpModelConfig, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        file: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_settings(&text, base_dir)
}

/// Loads the settings file at `path` and decodes the dataset it describes
pub fn read_tntp_project(path: &Path) -> Result<TntpModel, SettingsError> {
    info!("Reading TNTP project settings: {}", path.display());
    let config = load_settings(path)?;
    Ok(create_tntp_model(&config)?)
}
