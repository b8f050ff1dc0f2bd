//! Settings schema.

use docview_common::Color;
use serde::{Deserialize, Serialize};

/// Icon color used when custom colors are off.
pub const DEFAULT_ICON_COLOR: &str = "#afb1b3";

/// Root settings object, deserialized from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub theme: ThemeConfig,
    pub document: DocumentConfig,
    pub logging: LoggingConfig,
}

/// Colors pushed into the renderer.
///
/// `background`/`foreground` are used only when `use_custom_colors` is set;
/// otherwise the host's panel colors apply and `icons` falls back to
/// [`DEFAULT_ICON_COLOR`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub use_custom_colors: bool,
    pub background: String,
    pub foreground: String,
    pub icons: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_custom_colors: false,
            background: "#3c3f41".into(),
            foreground: "#bbbbbb".into(),
            icons: DEFAULT_ICON_COLOR.into(),
        }
    }
}

/// Resolved `(background, foreground, icons)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub background: Color,
    pub foreground: Color,
    pub icons: Color,
}

impl ThemeConfig {
    /// Resolve the colors to push, given the host's own panel colors.
    ///
    /// Unparseable custom colors fall back to the host colors.
    pub fn resolve(&self, host_background: Color, host_foreground: Color) -> ResolvedTheme {
        let default_icons = Color::from_hex(DEFAULT_ICON_COLOR).unwrap_or(host_foreground);
        if !self.use_custom_colors {
            return ResolvedTheme {
                background: host_background,
                foreground: host_foreground,
                icons: default_icons,
            };
        }
        ResolvedTheme {
            background: Color::from_hex(&self.background).unwrap_or(host_background),
            foreground: Color::from_hex(&self.foreground).unwrap_or(host_foreground),
            icons: Color::from_hex(&self.icons).unwrap_or(default_icons),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Reload the document when it changes on disk.
    pub auto_reload: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self { auto_reload: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}
