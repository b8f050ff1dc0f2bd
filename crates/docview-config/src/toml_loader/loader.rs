//! Read settings from a path or the platform default.

use crate::schema::ViewerConfig;
use crate::validation;
use docview_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load settings from a specific TOML file.
///
/// Missing fields use serde defaults. A validation failure is logged and
/// the parsed settings are returned as-is.
pub fn load_from_path(path: &Path) -> Result<ViewerConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ViewerConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load settings from the platform default path.
///
/// On Linux: `~/.config/docview/config.toml`
/// On macOS: `~/Library/Application Support/docview/config.toml`
///
/// Creates a commented default file when none exists.
pub fn load_default() -> Result<ViewerConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(ViewerConfig::default())
        }
        Err(e) => Err(e),
    }
}
