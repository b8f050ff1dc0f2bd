/// Default settings file, every value commented out.
pub(crate) fn default_config_toml() -> String {
    r##"# Docview Configuration
# Only override what you want to change -- missing fields use defaults.

[theme]
# use_custom_colors = false
# background = "#3c3f41"   # used only with use_custom_colors
# foreground = "#bbbbbb"
# icons = "#afb1b3"

[document]
# auto_reload = true       # reload when the file changes on disk

[logging]
# level = "info"           # trace, debug, info, warn, error
"##
    .to_string()
}
