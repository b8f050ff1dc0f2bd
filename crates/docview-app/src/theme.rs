//! Host colors the renderer theme falls back to.

use docview_common::Color;
use docview_config::schema::ResolvedTheme;
use docview_config::ViewerConfig;

/// Panel background of the host window.
pub const HOST_BACKGROUND: Color = Color {
    r: 0x2b,
    g: 0x2b,
    b: 0x2b,
    a: 0xff,
};

/// Label foreground of the host window.
pub const HOST_FOREGROUND: Color = Color {
    r: 0xbb,
    g: 0xbb,
    b: 0xbb,
    a: 0xff,
};

pub fn resolve_theme(config: &ViewerConfig) -> ResolvedTheme {
    config.theme.resolve(HOST_BACKGROUND, HOST_FOREGROUND)
}
