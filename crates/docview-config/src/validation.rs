//! Settings validation. Collects every problem into one `ConfigError`.

use docview_common::{Color, ConfigError};

use crate::schema::ViewerConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn validate(config: &ViewerConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let theme = &config.theme;
    for (name, value) in [
        ("theme.background", &theme.background),
        ("theme.foreground", &theme.foreground),
        ("theme.icons", &theme.icons),
    ] {
        if Color::from_hex(value).is_none() {
            errors.push(format!("{name} must be #RRGGBB or #RRGGBBAA, got '{value}'"));
        }
    }

    if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level must be one of {}, got '{}'",
            VALID_LOG_LEVELS.join(", "),
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
