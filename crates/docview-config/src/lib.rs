//! Docview settings.
//!
//! TOML-based viewer settings (theme colors, document auto-reload, logging)
//! with validation, a `notify` file watcher, and live reload. Every section
//! has defaults so a partial file works.
//!
//! ```rust,no_run
//! use docview_config::toml_loader;
//!
//! let config = toml_loader::load_default().expect("failed to load config");
//! println!("auto reload: {}", config.document.auto_reload);
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{DocumentConfig, LoggingConfig, ThemeConfig, ViewerConfig};
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::FileWatcher;
