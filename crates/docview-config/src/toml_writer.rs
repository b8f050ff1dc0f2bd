//! Write settings to TOML on disk.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place.

use std::path::Path;

use docview_common::ConfigError;

use crate::schema::ViewerConfig;
use crate::toml_loader::default_config_path;

/// Write settings to the platform default path.
pub fn save_config(config: &ViewerConfig) -> Result<(), ConfigError> {
    let path = default_config_path()?;
    save_config_to_path(config, &path)
}

/// Write settings to a specific path, creating parent directories.
pub fn save_config_to_path(config: &ViewerConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config to TOML: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &toml_str).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Windows refuses to rename over an open file
        tracing::warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, &toml_str).map_err(|e2| {
            ConfigError::ParseError(format!(
                "failed to write config to {}: {e2}",
                path.display()
            ))
        })?;
    }

    tracing::info!("saved config to {}", path.display());
    Ok(())
}
