mod app_state;
mod cli;
mod headless;
mod panel;
mod theme;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use docview_common::DocviewError;
use docview_config::toml_loader;
use docview_config::{save_config, save_config_to_path, ViewerConfig};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- docview crashed ---");
        eprintln!("Re-run with --log-level debug and include the log when reporting.");
        eprintln!("-----------------------\n");

        default_hook(info);
    }));
}

fn load_settings(path: Option<&PathBuf>) -> (ViewerConfig, Option<String>) {
    let loaded = match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (ViewerConfig::default(), Some(e.to_string())),
    }
}

/// Persist `config` to `path`, or to the platform default path.
///
/// A settings file that failed to load is never replaced: the defaults in
/// `config` would overwrite whatever the user had written.
fn write_settings(config: &ViewerConfig, path: Option<&Path>, load_failed: bool) -> Result<(), DocviewError> {
    if load_failed {
        return Err(DocviewError::Other(
            "settings did not load, refusing to overwrite them".into(),
        ));
    }
    match path {
        Some(path) => save_config_to_path(config, path)?,
        None => save_config(config)?,
    }
    Ok(())
}

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        "docview=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();

    // Settings first: the log level may come from them
    let (config, load_error) = load_settings(args.config.as_ref());
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("docview={}", config.logging.level));
    init_logging(&directive);

    tracing::info!("docview v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = &load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if args.write_config {
        return match write_settings(&config, args.config.as_deref(), load_error.is_some()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Failed to write settings: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let Some(requested) = args.document.as_deref() else {
        tracing::error!("No document given");
        return ExitCode::FAILURE;
    };
    let document = match requested.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            tracing::error!(path = %requested.display(), "Cannot open document: {e}");
            return ExitCode::FAILURE;
        }
    };

    let viewer_dir = match args.assets.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()
            .unwrap_or_default()
            .join("assets")
            .join("viewer"),
    };

    if args.headless {
        return match headless::run(&config, &document, &viewer_dir) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Headless load failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config_path = args
        .config
        .clone()
        .or_else(|| toml_loader::default_config_path().ok());

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = app_state::DocviewApp::new(config, document, viewer_dir, config_path)
        .with_search(args.find.clone());

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
